//! Containment chain of selection states.
//!
//! The chain is an arena of nodes addressed by [`NodeIdx`]. Each node links
//! outward through `next` and inward through `previous`, which gives O(1)
//! traversal in both directions without reference cycles.
//!
//! ```text
//! head (current selection) ─next─► candidate ─next─► candidate ─► ∅
//!                      ∅ ◄─previous─┘      ◄─previous─┘
//! ```

use climb_primitives::{Range, ViewId};
use tracing::trace;

/// Index of a node within a [`SelectionChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(usize);

impl NodeIdx {
	/// The innermost node of every chain.
	pub const HEAD: Self = Self(0);

	/// Position of the node counted from the head.
	pub const fn depth(self) -> usize {
		self.0
	}
}

#[derive(Debug, Clone)]
struct ChainNode {
	range: Range,
	next: Option<NodeIdx>,
	previous: Option<NodeIdx>,
}

/// An immutable ladder of nested ranges built for one view.
///
/// Read from the head outward, every range contains (or equals) the one
/// before it, and the head is the selection the chain was built from.
#[derive(Debug, Clone)]
pub struct SelectionChain {
	owner: ViewId,
	nodes: Vec<ChainNode>,
}

impl SelectionChain {
	/// Builds a chain from the current selection and ordered candidates.
	///
	/// A candidate survives only when it encloses both ends of `selection`
	/// and the previously kept range. Candidates equal to the previously kept
	/// range are dropped, so every step changes the selection.
	pub fn build(owner: ViewId, selection: Range, candidates: impl IntoIterator<Item = Range>) -> Self {
		let mut nodes = vec![ChainNode {
			range: selection,
			next: None,
			previous: None,
		}];

		for candidate in candidates {
			let last = nodes.len() - 1;
			let innermost = nodes[last].range;
			let encloses = candidate.contains_position(selection.start())
				&& candidate.contains_position(selection.end())
				&& candidate.contains_range(&innermost);
			if !encloses || candidate == innermost {
				trace!(%candidate, %selection, "Dropping non-enclosing selection candidate");
				continue;
			}
			let idx = NodeIdx(nodes.len());
			nodes[last].next = Some(idx);
			nodes.push(ChainNode {
				range: candidate,
				next: None,
				previous: Some(NodeIdx(last)),
			});
		}

		Self { owner, nodes }
	}

	/// The view this chain belongs to.
	pub fn owner(&self) -> ViewId {
		self.owner
	}

	/// The innermost node.
	pub fn head(&self) -> NodeIdx {
		NodeIdx::HEAD
	}

	/// Number of nodes, head included.
	#[allow(clippy::len_without_is_empty, reason = "a chain always has its head")]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// The range stored at `idx`, if the index belongs to this chain.
	pub fn range(&self, idx: NodeIdx) -> Option<Range> {
		self.nodes.get(idx.0).map(|node| node.range)
	}

	/// The next larger node.
	pub fn next(&self, idx: NodeIdx) -> Option<NodeIdx> {
		self.nodes.get(idx.0).and_then(|node| node.next)
	}

	/// The next smaller node.
	pub fn previous(&self, idx: NodeIdx) -> Option<NodeIdx> {
		self.nodes.get(idx.0).and_then(|node| node.previous)
	}

	/// Ranges from the head outward.
	pub fn ranges(&self) -> impl Iterator<Item = Range> + '_ {
		let mut cursor = Some(self.head());
		std::iter::from_fn(move || {
			let idx = cursor?;
			cursor = self.next(idx);
			self.range(idx)
		})
	}
}
