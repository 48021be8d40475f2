//! Error types crossing the engine ports.
//!
//! Neither engine returns these to its caller: they are logged and the
//! operation degrades to a no-op.

use climb_primitives::{Position, ViewId};
use thiserror::Error;

/// Errors reported by a [`RangeProvider`](crate::RangeProvider).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
	/// The provider has no model for the requested view.
	#[error("no range candidates available for {view}")]
	Unavailable {
		/// The view that was asked about.
		view: ViewId,
	},

	/// Computing candidates failed.
	#[error("range provider failed: {0}")]
	Failed(String),
}

/// Errors reported by a [`SelectionHost`](crate::SelectionHost) when applying a selection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
	/// The view has no document model attached.
	#[error("view has no active model")]
	NoModel,

	/// A selection endpoint lies outside the document.
	#[error("position {0} is outside the document")]
	OutOfBounds(Position),

	/// The view refused the change for another reason.
	#[error("selection rejected: {0}")]
	Rejected(String),
}
