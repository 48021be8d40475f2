//! Grow/shrink session over a [`SelectionChain`].
//!
//! A [`SmartSelect`] owns at most one chain at a time:
//!
//! ```text
//!            step (no chain / other view)
//!   Empty ───────────────────────────────► Building ──fetch done──► Active
//!     ▲                                      │                       │
//!     └──── reset / external cursor move ────┴───────────────────────┘
//! ```
//!
//! While a build is in flight, further steps from the same view are ignored
//! ([`StepOutcome::Busy`]); a step from another view supersedes the build.
//! Once active, the chain is discarded by the first cursor move in its view
//! that the session did not cause itself; the session's own selection changes
//! run under a [`GuardFlag`] scope.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use climb_primitives::{Range, ViewId};
use tracing::{debug, trace, warn};

use crate::chain::{NodeIdx, SelectionChain};
use crate::events::{CursorChannel, ListenerControl, Subscription};
use crate::guard::GuardFlag;
use crate::host::SelectionHost;
use crate::oracle::RangeProvider;


/// Which way to walk the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
	/// Outward, to the next larger range.
	Grow,
	/// Inward, to the next smaller range.
	Shrink,
}

/// Result of one [`SmartSelect::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
	/// The view now selects this range.
	Applied(Range),
	/// Nothing changed: chain end reached, no candidates, or the build was superseded.
	Unchanged,
	/// A chain build is still in flight; the step was ignored.
	Busy,
}

struct ActiveChain {
	chain: SelectionChain,
	current: NodeIdx,
	generation: u64,
	/// Dropped together with the chain, which disposes the listener.
	_subscription: Subscription,
}

enum ChainState {
	Empty,
	Building { generation: u64, view: ViewId },
	Active(ActiveChain),
}

struct SessionInner {
	state: ChainState,
	generation: u64,
}

/// Grow/shrink session for one controller.
///
/// Cloning is not supported; a controller owns its session and hands out
/// references. All state lives on the event thread.
pub struct SmartSelect {
	inner: Rc<RefCell<SessionInner>>,
	guard: GuardFlag,
}

impl Default for SmartSelect {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for SmartSelect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		let state = match &inner.state {
			ChainState::Empty => "empty",
			ChainState::Building { .. } => "building",
			ChainState::Active(_) => "active",
		};
		f.debug_struct("SmartSelect")
			.field("state", &state)
			.field("generation", &inner.generation)
			.finish()
	}
}

impl SmartSelect {
	/// Creates a session with no chain.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(SessionInner {
				state: ChainState::Empty,
				generation: 0,
			})),
			guard: GuardFlag::new(),
		}
	}

	/// Returns true while a chain is active.
	pub fn is_active(&self) -> bool {
		matches!(self.inner.borrow().state, ChainState::Active(_))
	}

	/// Returns true while a chain build awaits its candidates.
	pub fn is_building(&self) -> bool {
		matches!(self.inner.borrow().state, ChainState::Building { .. })
	}

	/// The view owning the active chain.
	pub fn owner(&self) -> Option<ViewId> {
		match &self.inner.borrow().state {
			ChainState::Active(active) => Some(active.chain.owner()),
			_ => None,
		}
	}

	/// The range of the current chain node.
	pub fn current_range(&self) -> Option<Range> {
		match &self.inner.borrow().state {
			ChainState::Active(active) => active.chain.range(active.current),
			_ => None,
		}
	}

	/// All ranges of the active chain, innermost first.
	pub fn chain_ranges(&self) -> Option<Vec<Range>> {
		match &self.inner.borrow().state {
			ChainState::Active(active) => Some(active.chain.ranges().collect()),
			_ => None,
		}
	}

	/// The guard flag held while the session applies its own selections.
	pub fn guard(&self) -> &GuardFlag {
		&self.guard
	}

	/// Discards any chain, including one still being built.
	pub fn reset(&self) {
		let discarded = {
			let mut inner = self.inner.borrow_mut();
			inner.generation += 1;
			std::mem::replace(&mut inner.state, ChainState::Empty)
		};
		if matches!(discarded, ChainState::Active(_)) {
			debug!("Selection chain reset");
		}
	}

	/// Moves one node along the chain and applies the resulting selection.
	///
	/// Builds a fresh chain first when none exists or the active one belongs
	/// to another view. Never fails: every dead end yields
	/// [`StepOutcome::Unchanged`].
	pub async fn step<H, P>(&self, host: &H, provider: &P, direction: StepDirection) -> StepOutcome
	where
		H: SelectionHost + ?Sized,
		P: RangeProvider + ?Sized,
	{
		let view = host.view_id();
		let needs_build = {
			let mut inner = self.inner.borrow_mut();
			let stale_owner = match &inner.state {
				ChainState::Building { view: building, .. } if *building == view => {
					trace!(%view, ?direction, "Ignoring step while chain build is in flight");
					return StepOutcome::Busy;
				}
				ChainState::Building { view: building, .. } => Some(*building),
				ChainState::Active(active) => Some(active.chain.owner()).filter(|owner| *owner != view),
				ChainState::Empty => None,
			};
			if let Some(owner) = stale_owner {
				debug!(%owner, %view, "Discarding selection chain of another view");
				inner.generation += 1;
				inner.state = ChainState::Empty;
			}
			!matches!(inner.state, ChainState::Active(_))
		};

		if needs_build && !self.build(host, provider, view).await {
			return StepOutcome::Unchanged;
		}

		self.advance(host, direction)
	}

	/// Fetches candidates and installs a new chain. Returns false if the
	/// build was superseded while awaiting the provider.
	async fn build<H, P>(&self, host: &H, provider: &P, view: ViewId) -> bool
	where
		H: SelectionHost + ?Sized,
		P: RangeProvider + ?Sized,
	{
		let generation = {
			let mut inner = self.inner.borrow_mut();
			inner.generation += 1;
			let generation = inner.generation;
			inner.state = ChainState::Building { generation, view };
			generation
		};
		let mut pending = PendingBuild {
			session: Rc::downgrade(&self.inner),
			generation,
			armed: true,
		};

		let selection = host.selections().primary();
		let candidates = match provider.ranges_to_position(view, selection.start()).await {
			Ok(candidates) => candidates,
			Err(error) => {
				debug!(%view, %error, "Range provider failed; treating as no candidates");
				Vec::new()
			}
		};

		if !pending.is_current() {
			trace!(%view, generation, "Chain build superseded");
			return false;
		}
		if host.view_id() != view || host.selections().primary() != selection {
			debug!(%view, "Selection moved while candidates were fetched; abandoning chain build");
			return false;
		}

		let chain = SelectionChain::build(view, selection.range(), candidates);
		debug!(%view, nodes = chain.len(), "Built selection chain");
		let subscription = self.watch_cursor(host.cursor_events(), view, generation);
		pending.disarm();
		self.inner.borrow_mut().state = ChainState::Active(ActiveChain {
			chain,
			current: NodeIdx::HEAD,
			generation,
			_subscription: subscription,
		});
		true
	}

	/// Subscribes the one-shot invalidation listener for a new chain.
	fn watch_cursor(&self, channel: &CursorChannel, view: ViewId, generation: u64) -> Subscription {
		let session = Rc::downgrade(&self.inner);
		let guard = self.guard.clone();
		channel.subscribe(view, move |event| {
			if guard.is_held() {
				return ListenerControl::Keep;
			}
			if let Some(session) = session.upgrade() {
				let stale = {
					let mut inner = session.borrow_mut();
					let owned = matches!(&inner.state, ChainState::Active(active) if active.generation == generation);
					owned.then(|| std::mem::replace(&mut inner.state, ChainState::Empty))
				};
				if stale.is_some() {
					debug!(view = %event.view, "Cursor moved externally; discarding selection chain");
				}
			}
			ListenerControl::Remove
		})
	}

	fn advance<H>(&self, host: &H, direction: StepDirection) -> StepOutcome
	where
		H: SelectionHost + ?Sized,
	{
		let (target, range, generation) = {
			let inner = self.inner.borrow();
			let ChainState::Active(active) = &inner.state else {
				return StepOutcome::Unchanged;
			};
			let target = match direction {
				StepDirection::Grow => active.chain.next(active.current),
				StepDirection::Shrink => active.chain.previous(active.current),
			};
			let Some(target) = target else {
				trace!(?direction, depth = active.current.depth(), "Selection chain end reached");
				return StepOutcome::Unchanged;
			};
			let Some(range) = active.chain.range(target) else {
				return StepOutcome::Unchanged;
			};
			(target, range, active.generation)
		};

		let selection = host.selections().primary().with_range(range);
		let applied = {
			let _scope = self.guard.acquire();
			host.set_selection(selection)
		};
		if let Err(error) = applied {
			warn!(%error, %range, "View rejected selection chain step");
			return StepOutcome::Unchanged;
		}

		let mut inner = self.inner.borrow_mut();
		if let ChainState::Active(active) = &mut inner.state
			&& active.generation == generation
		{
			active.current = target;
		}
		trace!(?direction, %range, depth = target.depth(), "Applied selection chain step");
		StepOutcome::Applied(range)
	}
}

/// Keeps the chain state consistent when a build is dropped or unwinds
/// before it installs its chain.
struct PendingBuild {
	session: Weak<RefCell<SessionInner>>,
	generation: u64,
	armed: bool,
}

impl PendingBuild {
	fn is_current(&self) -> bool {
		self.session.upgrade().is_some_and(|session| {
			matches!(session.borrow().state, ChainState::Building { generation, .. } if generation == self.generation)
		})
	}

	fn disarm(&mut self) {
		self.armed = false;
	}
}

impl Drop for PendingBuild {
	fn drop(&mut self) {
		if !self.armed {
			return;
		}
		let Some(session) = self.session.upgrade() else {
			return;
		};
		let Ok(mut inner) = session.try_borrow_mut() else {
			return;
		};
		if matches!(inner.state, ChainState::Building { generation, .. } if generation == self.generation) {
			inner.state = ChainState::Empty;
		}
	}
}
