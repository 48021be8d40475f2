use std::cmp::Ordering;
use std::fmt;

/// A position in a document: (line, column), both 1-based.
///
/// `column` counts chars from the start of the line, so the position after
/// the last character of `"abc"` is column 4.
///
/// Positions are ordered lexicographically: line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
	/// Line number, starting at 1.
	pub line: usize,
	/// Column number, starting at 1.
	pub column: usize,
}

impl Position {
	/// The first position of any document.
	pub const MIN: Self = Self { line: 1, column: 1 };

	/// Creates a new position.
	#[inline]
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}

}

impl Default for Position {
	fn default() -> Self {
		Self::MIN
	}
}

impl Ord for Position {
	#[inline]
	fn cmp(&self, other: &Self) -> Ordering {
		self.line.cmp(&other.line).then(self.column.cmp(&other.column))
	}
}

impl PartialOrd for Position {
	#[inline]
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

impl From<(usize, usize)> for Position {
	fn from((line, column): (usize, usize)) -> Self {
		Self::new(line, column)
	}
}
