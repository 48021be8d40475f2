use std::cell::Cell;
use std::rc::Rc;

/// Marks selection changes made by the engine itself.
///
/// While a [`GuardScope`] is alive, cursor-move listeners that check the flag
/// treat incoming events as self-inflicted. Scopes nest; the flag clears when
/// the last one drops, including during unwinding.
#[derive(Debug, Clone, Default)]
pub struct GuardFlag {
	depth: Rc<Cell<usize>>,
}

impl GuardFlag {
	/// Creates a released flag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Holds the flag until the returned scope is dropped.
	pub fn acquire(&self) -> GuardScope {
		self.depth.set(self.depth.get() + 1);
		GuardScope { flag: self.clone() }
	}

	/// Returns true while any scope is alive.
	pub fn is_held(&self) -> bool {
		self.depth.get() > 0
	}
}

/// Scoped acquisition of a [`GuardFlag`].
#[must_use = "the guard is released as soon as the scope is dropped"]
#[derive(Debug)]
pub struct GuardScope {
	flag: GuardFlag,
}

impl Drop for GuardScope {
	fn drop(&mut self) {
		let depth = &self.flag.depth;
		depth.set(depth.get().saturating_sub(1));
	}
}
