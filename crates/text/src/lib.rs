//! Text-backed views and oracles for the selection engines.
//!
//! [`TextDocument`] is a [`SelectionHost`](climb_select::SelectionHost) over a
//! rope. [`RopeBrackets`] and [`TextRangeProvider`] answer the bracket and
//! range queries from the same text, configured by [`climb_config::Config`].

pub mod brackets;
pub mod document;
pub mod provider;

pub use brackets::RopeBrackets;
use climb_config::Config;
use climb_select::{BracketExpander, SelectionController};
pub use document::TextDocument;
pub use provider::TextRangeProvider;

/// A controller whose bracket scans honor the configured limit.
pub fn controller_for(config: &Config) -> SelectionController {
	SelectionController::with_expander(BracketExpander::with_scan_limit(config.brackets.scan_limit))
}

#[cfg(test)]
mod tests;
