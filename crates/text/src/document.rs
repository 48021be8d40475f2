//! Rope-backed document view.

use std::cell::{Cell, RefCell};

use climb_primitives::{Position, Range, Selection, SelectionSet, ViewId};
use climb_select::{CursorChannel, CursorMoved, HostError, SelectionHost};
use ropey::Rope;
use tracing::trace;

/// A read-only document shown in one view.
///
/// Positions are 1-based; columns count chars and stop at the line ending,
/// so a line of `n` chars has valid columns `1..=n + 1`.
pub struct TextDocument {
	id: ViewId,
	text: Rope,
	selections: RefCell<SelectionSet>,
	channel: CursorChannel,
	attached: Cell<bool>,
}

impl std::fmt::Debug for TextDocument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TextDocument")
			.field("id", &self.id)
			.field("chars", &self.text.len_chars())
			.field("selections", &self.selections.borrow())
			.finish_non_exhaustive()
	}
}

impl TextDocument {
	/// Creates a view over `text` with a caret at the start.
	pub fn new(id: ViewId, text: &str) -> Self {
		Self {
			id,
			text: Rope::from_str(text),
			selections: RefCell::new(SelectionSet::default()),
			channel: CursorChannel::new(),
			attached: Cell::new(true),
		}
	}

	pub fn rope(&self) -> &Rope {
		&self.text
	}

	/// Number of lines, counting a trailing empty line after a final newline.
	pub fn line_count(&self) -> usize {
		self.text.len_lines()
	}

	/// Chars on `line` (1-based), excluding the line ending.
	pub fn line_len(&self, line: usize) -> Option<usize> {
		let idx = line.checked_sub(1)?;
		if idx >= self.text.len_lines() {
			return None;
		}
		let slice = self.text.line(idx);
		let mut len = slice.len_chars();
		while len > 0 && is_line_ending(slice.char(len - 1)) {
			len -= 1;
		}
		Some(len)
	}

	/// Char index of `pos`, clamping the column to the line.
	pub fn char_index(&self, pos: Position) -> Option<usize> {
		let len = self.line_len(pos.line)?;
		let column = pos.column.saturating_sub(1).min(len);
		Some(self.text.line_to_char(pos.line - 1) + column)
	}

	/// Char index of `pos`, or `None` if the position lies outside the text.
	pub fn checked_char_index(&self, pos: Position) -> Option<usize> {
		let len = self.line_len(pos.line)?;
		(pos.column >= 1 && pos.column <= len + 1).then(|| self.text.line_to_char(pos.line - 1) + pos.column - 1)
	}

	/// Position of char index `idx`, clamped to the end of the text.
	pub fn position_of(&self, idx: usize) -> Position {
		let idx = idx.min(self.text.len_chars());
		let line = self.text.char_to_line(idx);
		Position::new(line + 1, idx - self.text.line_to_char(line) + 1)
	}

	/// Char at `idx`, if any.
	pub fn char_at(&self, idx: usize) -> Option<char> {
		(idx < self.text.len_chars()).then(|| self.text.char(idx))
	}

	/// The text covered by `range`.
	pub fn slice(&self, range: Range) -> String {
		let start = self.char_index(range.start()).unwrap_or(0);
		let end = self.char_index(range.end()).unwrap_or(self.text.len_chars());
		self.text.slice(start..end.max(start)).to_string()
	}

	pub fn primary(&self) -> Selection {
		self.selections.borrow().primary()
	}

	/// Replaces the selections as the user would, notifying listeners.
	pub fn move_cursor(&self, selection: Selection) -> Result<(), HostError> {
		self.apply(SelectionSet::single(selection))
	}

	/// Detaches the document model; selection changes are refused afterwards.
	pub fn detach(&self) {
		self.attached.set(false);
	}

	fn apply(&self, selections: SelectionSet) -> Result<(), HostError> {
		if !self.attached.get() {
			return Err(HostError::NoModel);
		}
		for selection in selections.iter() {
			for pos in [selection.anchor, selection.active] {
				if self.checked_char_index(pos).is_none() {
					return Err(HostError::OutOfBounds(pos));
				}
			}
		}
		let primary = selections.primary();
		*self.selections.borrow_mut() = selections;
		trace!(view = %self.id, selection = %primary.range(), "Selection changed");
		self.channel.emit(&CursorMoved {
			view: self.id,
			selection: primary,
		});
		Ok(())
	}
}

impl SelectionHost for TextDocument {
	fn view_id(&self) -> ViewId {
		self.id
	}

	fn selections(&self) -> SelectionSet {
		self.selections.borrow().clone()
	}

	fn set_selection(&self, selection: Selection) -> Result<(), HostError> {
		self.apply(SelectionSet::single(selection))
	}

	fn set_selections(&self, selections: SelectionSet) -> Result<(), HostError> {
		self.apply(selections)
	}

	fn has_model(&self) -> bool {
		self.attached.get()
	}

	fn cursor_events(&self) -> &CursorChannel {
		&self.channel
	}
}

/// Line terminators recognized by ropey's line indexing.
fn is_line_ending(ch: char) -> bool {
	matches!(ch, '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}')
}
