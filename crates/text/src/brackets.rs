//! Bracket oracle over a [`TextDocument`].

use climb_config::{BracketConfig, BracketPair};
use climb_primitives::{Position, Range};
use climb_select::{BracketKind, BracketMatch, BracketOracle, BracketToken};

use crate::document::TextDocument;

/// Finds and matches single-character brackets in a document.
///
/// Matching counts nesting of the same pair only, so `( [ )` pairs the
/// parentheses and leaves the square bracket unmatched.
#[derive(Debug, Clone, Copy)]
pub struct RopeBrackets<'a> {
	doc: &'a TextDocument,
	config: &'a BracketConfig,
}

impl<'a> RopeBrackets<'a> {
	pub fn new(doc: &'a TextDocument, config: &'a BracketConfig) -> Self {
		Self { doc, config }
	}

	fn kind_of(&self, ch: char) -> Option<(BracketKind, BracketPair)> {
		if let Some(pair) = self.config.pair_opened_by(ch) {
			return Some((BracketKind::Open, pair));
		}
		self.config.pair_closed_by(ch).map(|pair| (BracketKind::Close, pair))
	}

	fn token_at(&self, idx: usize) -> Option<BracketToken> {
		let (kind, _) = self.kind_of(self.doc.char_at(idx)?)?;
		Some(BracketToken::new(self.char_range(idx), kind))
	}

	fn char_range(&self, idx: usize) -> Range {
		Range::new(self.doc.position_of(idx), self.doc.position_of(idx + 1))
	}

	/// Char index of the bracket pairing with the one at `idx`.
	pub fn partner(&self, idx: usize) -> Option<usize> {
		let (kind, pair) = self.kind_of(self.doc.char_at(idx)?)?;
		let rope = self.doc.rope();
		let mut depth = 0usize;
		match kind {
			BracketKind::Open => {
				for (offset, ch) in rope.chars_at(idx + 1).enumerate() {
					if ch == pair.open {
						depth += 1;
					} else if ch == pair.close {
						if depth == 0 {
							return Some(idx + 1 + offset);
						}
						depth -= 1;
					}
				}
				None
			}
			BracketKind::Close => {
				let mut chars = rope.chars_at(idx);
				let mut at = idx;
				while let Some(ch) = chars.prev() {
					at -= 1;
					if ch == pair.close {
						depth += 1;
					} else if ch == pair.open {
						if depth == 0 {
							return Some(at);
						}
						depth -= 1;
					}
				}
				None
			}
		}
	}

	/// The enclosing pairs of `pos` as `(open, close)` char indices,
	/// innermost first.
	pub fn enclosing_pairs(&self, pos: Position) -> Vec<(usize, usize)> {
		let Some(idx) = self.doc.char_index(pos) else {
			return Vec::new();
		};
		let mut depths = vec![0usize; self.config.pairs.len()];
		let mut found = Vec::new();
		let mut chars = self.doc.rope().chars_at(idx);
		let mut at = idx;
		while let Some(ch) = chars.prev() {
			at -= 1;
			let Some(slot) = self.config.pairs.iter().position(|pair| pair.open == ch || pair.close == ch) else {
				continue;
			};
			if self.config.pairs[slot].close == ch {
				depths[slot] += 1;
			} else if depths[slot] > 0 {
				depths[slot] -= 1;
			} else if let Some(close) = self.partner(at)
				&& close >= idx
			{
				found.push((at, close));
			}
		}
		found
	}
}

impl BracketOracle for RopeBrackets<'_> {
	fn find_prev_bracket(&self, pos: Position) -> Option<BracketToken> {
		let idx = self.doc.char_index(pos)?;
		let mut chars = self.doc.rope().chars_at(idx);
		let mut at = idx;
		while let Some(ch) = chars.prev() {
			at -= 1;
			if self.kind_of(ch).is_some() {
				return self.token_at(at);
			}
		}
		None
	}

	fn find_next_bracket(&self, pos: Position) -> Option<BracketToken> {
		let idx = self.doc.char_index(pos)?;
		self.doc
			.rope()
			.chars_at(idx)
			.enumerate()
			.find(|(_, ch)| self.kind_of(*ch).is_some())
			.and_then(|(offset, _)| self.token_at(idx + offset))
	}

	/// Brackets are one char wide, so only the bracket ending at `pos`
	/// (directly left of it) can match.
	fn match_bracket(&self, pos: Position) -> Option<BracketMatch> {
		let idx = self.doc.char_index(pos)?.checked_sub(1)?;
		let partner = self.partner(idx)?;
		let (open, close) = if partner > idx { (idx, partner) } else { (partner, idx) };
		Some(BracketMatch::new(self.char_range(open), self.char_range(close)))
	}
}
