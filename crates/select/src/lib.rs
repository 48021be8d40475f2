//! Selection navigation engines.
//!
//! Two engines sit on top of the document ports defined here:
//!
//! - [`SmartSelect`] builds a containment chain of candidate ranges around the
//!   caret and steps outward (grow) or inward (shrink) through it.
//! - [`BracketExpander`] selects the interior or full span of the nearest
//!   adjacent or enclosing bracket pair, one result per cursor.
//!
//! ```text
//! SelectionController
//! ┌──────────────────┐   RangeProvider      BracketOracle
//! │ SmartSelect      │──►(async candidates) (prev/next/match)
//! │ BracketExpander  │─────────────────────►
//! └───────┬──────────┘
//!         │ set_selection(s)          CursorChannel
//!         ▼                           (one-shot invalidation)
//!    SelectionHost ─────────────────► emit(CursorMoved)
//! ```
//!
//! Both engines degrade every "nothing applicable" case to a no-op; callers
//! observe outcomes, never errors.

pub mod bracket;
pub mod chain;
pub mod controller;
pub mod error;
pub mod events;
pub mod guard;
pub mod host;
pub mod oracle;
pub mod smart_select;

#[cfg(test)]
pub(crate) mod test_support;

pub use bracket::{BracketExpander, DEFAULT_SCAN_LIMIT, Expansion, ExpansionRule};
pub use chain::{NodeIdx, SelectionChain};
pub use controller::SelectionController;
pub use error::{HostError, ProviderError};
pub use events::{CursorChannel, CursorMoved, ListenerControl, Subscription};
pub use guard::{GuardFlag, GuardScope};
pub use host::SelectionHost;
pub use oracle::{BracketKind, BracketMatch, BracketOracle, BracketToken, RangeProvider};
pub use smart_select::{SmartSelect, StepDirection, StepOutcome};
