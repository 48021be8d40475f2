use std::fmt;

use crate::position::Position;

/// A text range between two positions, normalized so `start <= end`.
///
/// The end position is exclusive when the range is used to select text:
/// the range `1:2-1:5` covers the characters at columns 2, 3, and 4.
/// Containment queries treat both boundaries inclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
	start: Position,
	end: Position,
}

impl Range {
	/// Creates a range between two positions given in either order.
	pub fn new(a: Position, b: Position) -> Self {
		if a <= b {
			Self { start: a, end: b }
		} else {
			Self { start: b, end: a }
		}
	}

	/// Creates a zero-width range at `pos`.
	pub const fn empty(pos: Position) -> Self {
		Self { start: pos, end: pos }
	}

	/// Creates a range on a single line from `start_column` to `end_column`.
	pub fn on_line(line: usize, start_column: usize, end_column: usize) -> Self {
		Self::new(Position::new(line, start_column), Position::new(line, end_column))
	}

	/// Returns the start position.
	#[inline]
	pub const fn start(&self) -> Position {
		self.start
	}

	/// Returns the end position.
	#[inline]
	pub const fn end(&self) -> Position {
		self.end
	}

	/// Returns true if start equals end.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if `pos` lies within the range, boundaries included.
	pub fn contains_position(&self, pos: Position) -> bool {
		self.start <= pos && pos <= self.end
	}

	/// Returns true if `other` lies within this range, boundaries included.
	///
	/// Every range contains itself.
	pub fn contains_range(&self, other: &Range) -> bool {
		self.start <= other.start && other.end <= self.end
	}

	/// Returns true if `other` lies within this range and is not equal to it.
	pub fn strictly_contains_range(&self, other: &Range) -> bool {
		self.contains_range(other) && self != other
	}
}

impl Default for Range {
	fn default() -> Self {
		Self::empty(Position::MIN)
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.start, self.end)
	}
}
