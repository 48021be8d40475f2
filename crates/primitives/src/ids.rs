use std::fmt;

/// Opaque handle identifying one open document view.
///
/// Selection sessions record the view they were built for and discard their
/// state when a step arrives from a different view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "view#{}", self.0)
	}
}
