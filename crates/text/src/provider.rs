//! Candidate ranges for grow/shrink.

use climb_config::Config;
use climb_primitives::{BoxFutureLocal, Position, Range, ViewId};
use climb_select::{ProviderError, RangeProvider, SelectionHost};
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::brackets::RopeBrackets;
use crate::document::TextDocument;

/// Offers, innermost first: the word at the cursor, each enclosing bracket
/// pair's interior and full span, the line's content, and the whole
/// document. Which kinds appear is set by [`CandidateConfig`](climb_config::CandidateConfig).
#[derive(Debug, Clone, Copy)]
pub struct TextRangeProvider<'a> {
	doc: &'a TextDocument,
	config: &'a Config,
}

impl<'a> TextRangeProvider<'a> {
	pub fn new(doc: &'a TextDocument, config: &'a Config) -> Self {
		Self { doc, config }
	}

	/// Candidates around `pos`, ordered by size and without duplicates.
	pub fn candidates(&self, pos: Position) -> Vec<Range> {
		let kinds = self.config.candidates;
		let mut spans: Vec<(usize, usize)> = Vec::new();

		if kinds.words
			&& let Some(word) = self.word_at(pos)
		{
			spans.push(word);
		}
		if kinds.brackets {
			let brackets = RopeBrackets::new(self.doc, &self.config.brackets);
			for (open, close) in brackets.enclosing_pairs(pos) {
				spans.push((open + 1, close));
				spans.push((open, close + 1));
			}
		}
		if kinds.lines
			&& let Some(len) = self.doc.line_len(pos.line)
			&& len > 0
		{
			let start = self.doc.rope().line_to_char(pos.line - 1);
			spans.push((start, start + len));
		}
		if kinds.document && self.doc.rope().len_chars() > 0 {
			spans.push((0, self.doc.rope().len_chars()));
		}

		spans.sort_by_key(|&(start, end)| (end - start, start));
		spans.dedup();
		spans
			.into_iter()
			.map(|(start, end)| Range::new(self.doc.position_of(start), self.doc.position_of(end)))
			.collect()
	}

	/// Char span of the word containing or ending at `pos`.
	fn word_at(&self, pos: Position) -> Option<(usize, usize)> {
		let line_len = self.doc.line_len(pos.line)?;
		let line_start = self.doc.rope().line_to_char(pos.line - 1);
		let line = self.doc.rope().slice(line_start..line_start + line_len).to_string();
		let caret = pos.column.saturating_sub(1).min(line_len);

		let mut column = 0;
		let mut touching = None;
		for segment in line.split_word_bounds() {
			let start = column;
			column += segment.chars().count();
			if !segment.chars().any(|ch| ch.is_alphanumeric() || ch == '_') {
				continue;
			}
			if start <= caret && caret < column {
				return Some((line_start + start, line_start + column));
			}
			if column == caret {
				touching = Some((line_start + start, line_start + column));
			}
		}
		touching
	}
}

impl RangeProvider for TextRangeProvider<'_> {
	fn ranges_to_position(
		&self,
		view: ViewId,
		position: Position,
	) -> BoxFutureLocal<'_, Result<Vec<Range>, ProviderError>> {
		let result = if view == self.doc.view_id() {
			let ranges = self.candidates(position);
			trace!(%view, %position, count = ranges.len(), "Computed selection candidates");
			Ok(ranges)
		} else {
			Err(ProviderError::Unavailable { view })
		};
		Box::pin(std::future::ready(result))
	}
}
