//! Oracle ports consumed by the engines.
//!
//! The engines never look at text. Candidate ranges come from a
//! [`RangeProvider`] and bracket structure from a [`BracketOracle`].

use climb_primitives::{BoxFutureLocal, Position, Range, ViewId};

use crate::error::ProviderError;

/// Supplies candidate syntactic ranges around a position.
pub trait RangeProvider {
	/// Returns candidate ranges anchored at `position`, innermost first.
	///
	/// Candidates need not be hierarchical. The chain builder drops anything
	/// that does not enclose the current selection.
	fn ranges_to_position(
		&self,
		view: ViewId,
		position: Position,
	) -> BoxFutureLocal<'_, Result<Vec<Range>, ProviderError>>;
}

/// Whether a bracket token opens or closes a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
	/// An opening delimiter such as `(`.
	Open,
	/// A closing delimiter such as `)`.
	Close,
}

/// One bracket token in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BracketToken {
	/// The characters the token occupies.
	pub range: Range,
	/// Opening or closing.
	pub kind: BracketKind,
}

impl BracketToken {
	/// Creates a token.
	pub const fn new(range: Range, kind: BracketKind) -> Self {
		Self { range, kind }
	}

	/// Creates an opening token.
	pub const fn open(range: Range) -> Self {
		Self::new(range, BracketKind::Open)
	}

	/// Creates a closing token.
	pub const fn close(range: Range) -> Self {
		Self::new(range, BracketKind::Close)
	}
}

/// A matched bracket pair, opening side first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BracketMatch {
	/// Range of the opening delimiter.
	pub open: Range,
	/// Range of the closing delimiter.
	pub close: Range,
}

impl BracketMatch {
	/// Creates a pair from its two delimiter ranges.
	pub const fn new(open: Range, close: Range) -> Self {
		Self { open, close }
	}

	/// The full span, delimiters included.
	pub fn outer(&self) -> Range {
		Range::new(self.open.start(), self.close.end())
	}

	/// The span strictly between the delimiters.
	pub fn interior(&self) -> Range {
		Range::new(self.open.end(), self.close.start())
	}
}

/// Bracket queries against a live document model.
pub trait BracketOracle {
	/// Nearest bracket token whose range ends at or before `pos`.
	fn find_prev_bracket(&self, pos: Position) -> Option<BracketToken>;

	/// Nearest bracket token whose range starts at or after `pos`.
	fn find_next_bracket(&self, pos: Position) -> Option<BracketToken>;

	/// The pair of the bracket token ending exactly at `pos` or strictly containing it.
	///
	/// A token that merely starts at `pos` does not count.
	fn match_bracket(&self, pos: Position) -> Option<BracketMatch>;
}

impl<T: BracketOracle + ?Sized> BracketOracle for &T {
	fn find_prev_bracket(&self, pos: Position) -> Option<BracketToken> {
		(**self).find_prev_bracket(pos)
	}

	fn find_next_bracket(&self, pos: Position) -> Option<BracketToken> {
		(**self).find_next_bracket(pos)
	}

	fn match_bracket(&self, pos: Position) -> Option<BracketMatch> {
		(**self).match_bracket(pos)
	}
}
