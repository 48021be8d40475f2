//! Document view port.
//!
//! The [`SelectionHost`] trait abstracts the view operations the engines
//! need, so they run against any editor surface (or a test double) without
//! owning it.

use climb_primitives::{Selection, SelectionSet, ViewId};

use crate::error::HostError;
use crate::events::CursorChannel;

/// Operations the engines need from a document view.
///
/// Methods take `&self`: views are shared handles on the event thread, and a
/// grow/shrink step keeps the view borrowed across its suspend point.
pub trait SelectionHost {
	/// Identifies the view the selections belong to.
	fn view_id(&self) -> ViewId;

	/// Returns the current selections in caller order.
	fn selections(&self) -> SelectionSet;

	/// Replaces all selections with a single one.
	///
	/// Implementations emit a [`CursorMoved`](crate::CursorMoved) event on
	/// [`cursor_events`](Self::cursor_events) before returning.
	fn set_selection(&self, selection: Selection) -> Result<(), HostError>;

	/// Replaces all selections at once, preserving order.
	fn set_selections(&self, selections: SelectionSet) -> Result<(), HostError>;

	/// Returns false when no document model is attached to the view.
	fn has_model(&self) -> bool;

	/// Channel notified on every selection change in this view.
	fn cursor_events(&self) -> &CursorChannel;
}
