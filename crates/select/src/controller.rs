//! Command-layer entry point.

use tracing::{Instrument, debug_span};

use crate::bracket::BracketExpander;
use crate::host::SelectionHost;
use crate::oracle::{BracketOracle, RangeProvider};
use crate::smart_select::{SmartSelect, StepDirection, StepOutcome};

/// Runs selection commands for one editor surface.
///
/// Holds the grow/shrink session, so every command issued through the same
/// controller shares one chain.
#[derive(Debug, Default)]
pub struct SelectionController {
	session: SmartSelect,
	brackets: BracketExpander,
}

impl SelectionController {
	pub fn new() -> Self {
		Self::default()
	}

	/// Uses `brackets` for bracket expansion.
	pub fn with_expander(brackets: BracketExpander) -> Self {
		Self {
			session: SmartSelect::new(),
			brackets,
		}
	}

	pub fn session(&self) -> &SmartSelect {
		&self.session
	}

	pub fn expander(&self) -> &BracketExpander {
		&self.brackets
	}

	pub async fn step<H, P>(&self, host: &H, provider: &P, direction: StepDirection) -> StepOutcome
	where
		H: SelectionHost + ?Sized,
		P: RangeProvider + ?Sized,
	{
		let span = debug_span!("smart_select", view = %host.view_id(), ?direction);
		self.session.step(host, provider, direction).instrument(span).await
	}

	pub async fn grow<H, P>(&self, host: &H, provider: &P) -> StepOutcome
	where
		H: SelectionHost + ?Sized,
		P: RangeProvider + ?Sized,
	{
		self.step(host, provider, StepDirection::Grow).await
	}

	pub async fn shrink<H, P>(&self, host: &H, provider: &P) -> StepOutcome
	where
		H: SelectionHost + ?Sized,
		P: RangeProvider + ?Sized,
	{
		self.step(host, provider, StepDirection::Shrink).await
	}

	/// Expands every selection to its bracket pair. Returns true if any
	/// selection changed.
	pub fn expand_brackets<H, O>(&self, host: &H, oracle: &O) -> bool
	where
		H: SelectionHost + ?Sized,
		O: BracketOracle + ?Sized,
	{
		let _span = debug_span!("expand_brackets", view = %host.view_id(), cursors = host.selections().len()).entered();
		self.brackets.expand(host, oracle)
	}

	/// Drops the grow/shrink chain.
	pub fn reset(&self) {
		self.session.reset();
	}
}
