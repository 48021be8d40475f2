//! Cursor-move notification channel.
//!
//! Views emit a [`CursorMoved`] event on every selection change. Listeners
//! subscribe per view and decide after each event whether to stay
//! registered, which gives one-shot subscriptions without a second call.
//!
//! Emission runs listeners without holding the channel borrowed, so a
//! listener may subscribe, dispose its own [`Subscription`], or drop other
//! subscriptions while it runs.

use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use climb_primitives::{Selection, ViewId};
use tracing::warn;

/// A selection change in one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMoved {
	/// The view whose selection changed.
	pub view: ViewId,
	/// The new primary selection.
	pub selection: Selection,
}

/// What a listener wants after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerControl {
	/// Stay subscribed.
	Keep,
	/// Unsubscribe now.
	Remove,
}

type Listener = Box<dyn FnMut(&CursorMoved) -> ListenerControl>;

struct Entry {
	id: u64,
	view: ViewId,
	listener: Listener,
}

#[derive(Default)]
struct ChannelInner {
	next_id: u64,
	listeners: Vec<Entry>,
	/// Nesting depth of in-progress `emit` calls.
	emitting: usize,
	/// Ids disposed while their entry was checked out by `emit`.
	disposed_during_emit: Vec<u64>,
}

/// Per-view cursor-move broadcast.
///
/// Cloning yields another handle to the same channel.
#[derive(Clone, Default)]
pub struct CursorChannel {
	inner: Rc<RefCell<ChannelInner>>,
}

impl fmt::Debug for CursorChannel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CursorChannel")
			.field("listeners", &self.listener_count())
			.finish()
	}
}

impl CursorChannel {
	/// Creates an empty channel.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` for events of `view`.
	///
	/// The listener stays registered until it returns
	/// [`ListenerControl::Remove`] or the returned handle is disposed.
	pub fn subscribe(
		&self,
		view: ViewId,
		listener: impl FnMut(&CursorMoved) -> ListenerControl + 'static,
	) -> Subscription {
		let mut inner = self.inner.borrow_mut();
		inner.next_id += 1;
		let id = inner.next_id;
		inner.listeners.push(Entry {
			id,
			view,
			listener: Box::new(listener),
		});
		Subscription {
			id,
			channel: Rc::downgrade(&self.inner),
			disposed: false,
		}
	}

	/// Delivers `event` to every listener registered for its view.
	///
	/// Listeners registered while the event is being delivered first see the
	/// next event.
	///
	/// A panicking listener is unsubscribed. The remaining listeners still
	/// see the event, and the first panic is resumed once the channel is
	/// consistent again.
	pub fn emit(&self, event: &CursorMoved) {
		let checked_out = {
			let mut inner = self.inner.borrow_mut();
			inner.emitting += 1;
			std::mem::take(&mut inner.listeners)
		};

		let mut kept = Vec::with_capacity(checked_out.len());
		let mut first_panic = None;
		for mut entry in checked_out {
			if entry.view != event.view || self.was_disposed_during_emit(entry.id) {
				kept.push(entry);
				continue;
			}
			match panic::catch_unwind(AssertUnwindSafe(|| (entry.listener)(event))) {
				Ok(ListenerControl::Keep) => kept.push(entry),
				Ok(ListenerControl::Remove) => {}
				Err(payload) => {
					warn!(view = %event.view, id = entry.id, "Cursor listener panicked; unsubscribing it");
					if first_panic.is_none() {
						first_panic = Some(payload);
					}
				}
			}
		}

		self.check_in(kept);
		if let Some(payload) = first_panic {
			panic::resume_unwind(payload);
		}
	}

	/// Returns listeners checked out by `emit` and closes its nesting level.
	fn check_in(&self, mut kept: Vec<Entry>) {
		let mut inner = self.inner.borrow_mut();
		let disposed = std::mem::take(&mut inner.disposed_during_emit);
		kept.retain(|entry| !disposed.contains(&entry.id));
		kept.append(&mut inner.listeners);
		inner.listeners = kept;
		inner.emitting -= 1;
		if inner.emitting > 0 {
			inner.disposed_during_emit = disposed;
		}
	}

	/// Number of registered listeners across all views.
	pub fn listener_count(&self) -> usize {
		self.inner.borrow().listeners.len()
	}

	fn was_disposed_during_emit(&self, id: u64) -> bool {
		self.inner.borrow().disposed_during_emit.contains(&id)
	}
}

fn dispose_id(inner: &RefCell<ChannelInner>, id: u64) {
	let mut inner = inner.borrow_mut();
	if let Some(index) = inner.listeners.iter().position(|entry| entry.id == id) {
		inner.listeners.remove(index);
	} else if inner.emitting > 0 {
		inner.disposed_during_emit.push(id);
	}
}

/// Handle to a registered listener.
///
/// Disposing is idempotent and also happens on drop, so a subscription owned
/// by a session is released exactly once whichever way the session ends.
#[must_use = "dropping a subscription unsubscribes its listener"]
pub struct Subscription {
	id: u64,
	channel: Weak<RefCell<ChannelInner>>,
	disposed: bool,
}

impl Subscription {
	/// Unregisters the listener if it is still registered.
	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.disposed = true;
		if let Some(inner) = self.channel.upgrade() {
			dispose_id(&inner, self.id);
		}
	}

	/// Returns true once [`dispose`](Self::dispose) has run.
	pub fn is_disposed(&self) -> bool {
		self.disposed
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("id", &self.id)
			.field("disposed", &self.disposed)
			.finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.dispose();
	}
}
