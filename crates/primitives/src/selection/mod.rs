use smallvec::{SmallVec, smallvec};

use crate::position::Position;
use crate::range::Range;


/// Selection direction (anchor to active end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Active end is at or after the anchor.
	Forward,
	/// Active end is before the anchor.
	Backward,
}

/// A range with directionality.
///
/// The anchor is the fixed end, the active end is where the caret sits.
/// Comparisons go through [`Selection::range`]; the direction only matters
/// when building a replacement so the anchor does not visually jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
	/// The fixed end of the selection.
	pub anchor: Position,
	/// The moving end of the selection (caret position).
	pub active: Position,
}

impl Selection {
	/// Creates a selection from anchor to active.
	pub const fn new(anchor: Position, active: Position) -> Self {
		Self { anchor, active }
	}

	/// Creates a zero-width selection (caret) at `pos`.
	pub const fn caret(pos: Position) -> Self {
		Self::new(pos, pos)
	}

	/// Creates a selection covering `range` in the given direction.
	pub fn from_range(range: Range, direction: Direction) -> Self {
		match direction {
			Direction::Forward => Self::new(range.start(), range.end()),
			Direction::Backward => Self::new(range.end(), range.start()),
		}
	}

	/// Returns the earlier of anchor and active.
	#[inline]
	pub fn start(&self) -> Position {
		self.anchor.min(self.active)
	}

	/// Returns the later of anchor and active.
	#[inline]
	pub fn end(&self) -> Position {
		self.anchor.max(self.active)
	}

	/// Returns the covered range.
	#[inline]
	pub fn range(&self) -> Range {
		Range::new(self.anchor, self.active)
	}

	/// Returns true for a zero-width caret.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.anchor == self.active
	}

	/// Returns the direction of this selection.
	///
	/// A caret counts as forward.
	#[inline]
	pub fn direction(&self) -> Direction {
		if self.active < self.anchor {
			Direction::Backward
		} else {
			Direction::Forward
		}
	}

	/// Returns a selection covering `range` that keeps this selection's direction.
	pub fn with_range(&self, range: Range) -> Self {
		Self::from_range(range, self.direction())
	}
}

impl Default for Selection {
	fn default() -> Self {
		Self::caret(Position::MIN)
	}
}

impl From<Range> for Selection {
	fn from(range: Range) -> Self {
		Self::from_range(range, Direction::Forward)
	}
}

/// An ordered, non-empty list of selections with a designated primary.
///
/// Input order is significant: multi-cursor operations return one result per
/// input selection in the same order, so the set never sorts or merges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
	/// The selections in caller order (always non-empty).
	selections: SmallVec<[Selection; 1]>,
	/// Index of the primary selection within `selections`.
	primary_index: usize,
}

impl SelectionSet {
	/// Creates a set whose primary is the first selection.
	pub fn new(primary: Selection, others: impl IntoIterator<Item = Selection>) -> Self {
		let mut selections: SmallVec<[Selection; 1]> = smallvec![primary];
		selections.extend(others);
		Self {
			selections,
			primary_index: 0,
		}
	}

	/// Creates a set from a vector, or `None` when the vector is empty.
	///
	/// An out-of-range `primary_index` falls back to the first selection.
	pub fn from_vec(selections: Vec<Selection>, primary_index: usize) -> Option<Self> {
		if selections.is_empty() {
			return None;
		}
		let primary_index = if primary_index < selections.len() {
			primary_index
		} else {
			0
		};
		Some(Self {
			selections: selections.into_iter().collect(),
			primary_index,
		})
	}

	/// Creates a single-selection set.
	pub fn single(selection: Selection) -> Self {
		Self {
			selections: smallvec![selection],
			primary_index: 0,
		}
	}

	/// Returns the primary selection.
	pub fn primary(&self) -> Selection {
		self.selections[self.primary_index]
	}

	/// Returns all selections as a slice.
	pub fn as_slice(&self) -> &[Selection] {
		&self.selections
	}

	/// Returns the number of selections.
	///
	/// This is always at least 1.
	#[allow(clippy::len_without_is_empty, reason = "SelectionSet is never empty")]
	pub fn len(&self) -> usize {
		self.selections.len()
	}

	/// Iterates over the selections in order.
	pub fn iter(&self) -> impl Iterator<Item = &Selection> {
		self.selections.iter()
	}

	/// Maps every selection, preserving order and the primary index.
	pub fn map<F>(&self, f: F) -> Self
	where
		F: FnMut(&Selection) -> Selection,
	{
		Self {
			selections: self.selections.iter().map(f).collect(),
			primary_index: self.primary_index,
		}
	}
}

impl Default for SelectionSet {
	fn default() -> Self {
		Self::single(Selection::default())
	}
}

impl From<Selection> for SelectionSet {
	fn from(selection: Selection) -> Self {
		Self::single(selection)
	}
}

impl<'a> IntoIterator for &'a SelectionSet {
	type Item = &'a Selection;
	type IntoIter = std::slice::Iter<'a, Selection>;

	fn into_iter(self) -> Self::IntoIter {
		self.selections.iter()
	}
}
