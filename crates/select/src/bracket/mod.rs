//! Bracket-pair expansion.
//!
//! For each selection, the first applicable rule wins:
//!
//! 1. A bracket ends exactly at the selection start: an opening bracket
//!    selects its whole pair, a closing one selects the pair's interior.
//! 2. Both ends resolve to the same pair and the selection is not already its
//!    interior: select the whole pair.
//! 3. A caret touching a bracket selects its whole pair.
//! 4. Otherwise scan outward on both sides for the nearest unmatched opening
//!    (left) and closing (right) bracket, counting nesting in between.
//! 5. Nothing found: keep the selection.
//! 6. One side found: select that bracket's whole pair.
//! 7. Both found: select the interior of the outermost of the two pairs.

use climb_primitives::{Direction, Position, Range, Selection};
use tracing::trace;

use crate::host::SelectionHost;
use crate::oracle::{BracketKind, BracketMatch, BracketOracle, BracketToken};

#[cfg(test)]
mod tests;

/// Default cap on bracket tokens visited by one outward scan.
pub const DEFAULT_SCAN_LIMIT: usize = 100_000;

/// Which rule produced an [`Expansion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionRule {
	/// Opening bracket directly left of the selection.
	AdjacentOpening,
	/// Closing bracket directly left of the selection.
	AdjacentClosing,
	/// Both ends resolve to one pair.
	SpansPair,
	/// Caret touching a bracket.
	CaretOnBracket,
	/// Only one side of the outward scan found a bracket.
	OneSided,
	/// Both sides of the outward scan found a bracket.
	Enclosing,
}

/// A computed bracket selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
	/// The range to select.
	pub range: Range,
	/// The rule that produced it.
	pub rule: ExpansionRule,
}

/// Computes bracket-pair selections.
///
/// Stateless between calls; each selection is expanded independently.
#[derive(Debug, Clone, Copy)]
pub struct BracketExpander {
	scan_limit: usize,
}

impl Default for BracketExpander {
	fn default() -> Self {
		Self::new()
	}
}

impl BracketExpander {
	/// Creates an expander with [`DEFAULT_SCAN_LIMIT`].
	pub const fn new() -> Self {
		Self {
			scan_limit: DEFAULT_SCAN_LIMIT,
		}
	}

	/// Caps the number of tokens one outward scan may visit.
	pub const fn with_scan_limit(scan_limit: usize) -> Self {
		Self { scan_limit }
	}

	/// Returns the scan cap.
	pub const fn scan_limit(&self) -> usize {
		self.scan_limit
	}

	/// Expands every selection of `host` and applies the results at once.
	///
	/// Returns true if any selection changed. A view without a model, or one
	/// that rejects the new selections, is left untouched.
	pub fn expand<H, O>(&self, host: &H, oracle: &O) -> bool
	where
		H: SelectionHost + ?Sized,
		O: BracketOracle + ?Sized,
	{
		if !host.has_model() {
			trace!(view = %host.view_id(), "Bracket expansion skipped: no model");
			return false;
		}
		let current = host.selections();
		let expanded = current.map(|selection| self.expand_selection(oracle, *selection));
		if expanded == current {
			return false;
		}
		match host.set_selections(expanded) {
			Ok(()) => true,
			Err(error) => {
				tracing::warn!(%error, "View rejected bracket expansion");
				false
			}
		}
	}

	/// Expands one selection, keeping its direction.
	///
	/// A caret expanded from a closing bracket directly to its left becomes a
	/// backward selection anchored at that bracket; every other caret result
	/// is forward.
	pub fn expand_selection<O>(&self, oracle: &O, selection: Selection) -> Selection
	where
		O: BracketOracle + ?Sized,
	{
		let Some(expansion) = self.expansion(oracle, selection.start(), selection.end()) else {
			return selection;
		};
		if !selection.is_empty() {
			return selection.with_range(expansion.range);
		}
		let direction = match expansion.rule {
			ExpansionRule::AdjacentClosing => Direction::Backward,
			_ => Direction::Forward,
		};
		Selection::from_range(expansion.range, direction)
	}

	/// Computes the bracket range for the selection `start..end`.
	pub fn expansion<O>(&self, oracle: &O, start: Position, end: Position) -> Option<Expansion>
	where
		O: BracketOracle + ?Sized,
	{
		let found = |range: Range, rule: ExpansionRule| {
			trace!(?rule, %range, "Bracket expansion");
			Some(Expansion { range, rule })
		};

		if let Some(prev) = oracle.find_prev_bracket(start)
			&& prev.range.end() == start
			&& let Some(pair) = oracle.match_bracket(start)
		{
			return match prev.kind {
				BracketKind::Open => found(pair.outer(), ExpansionRule::AdjacentOpening),
				BracketKind::Close => found(pair.interior(), ExpansionRule::AdjacentClosing),
			};
		}

		let at_start = oracle.match_bracket(start);
		if let Some(pair) = at_start
			&& let Some(other) = oracle.match_bracket(end)
			&& pair.close == other.close
			&& Range::new(start, end) != pair.interior()
		{
			return found(pair.outer(), ExpansionRule::SpansPair);
		}

		if start == end
			&& let Some(pair) = at_start
		{
			return found(pair.outer(), ExpansionRule::CaretOnBracket);
		}

		let left = self.scan_left(oracle, start);
		let right = self.scan_right(oracle, end);
		match (left, right) {
			(None, None) => {
				trace!(%start, %end, "No enclosing bracket found");
				None
			}
			(Some(token), None) | (None, Some(token)) => {
				let pair = oracle.match_bracket(token.range.end())?;
				found(pair.outer(), ExpansionRule::OneSided)
			}
			(Some(left), Some(right)) => {
				let left = oracle.match_bracket(left.range.end());
				let right = oracle.match_bracket(right.range.end());
				let pair = outermost(left, right)?;
				found(pair.interior(), ExpansionRule::Enclosing)
			}
		}
	}

	/// Nearest opening bracket left of `from` not closed before `from`.
	fn scan_left<O>(&self, oracle: &O, from: Position) -> Option<BracketToken>
	where
		O: BracketOracle + ?Sized,
	{
		let mut depth = 0usize;
		let mut pos = from;
		for _ in 0..self.scan_limit {
			let token = oracle.find_prev_bracket(pos)?;
			if token.range.start() >= pos {
				trace!(%pos, "Bracket scan made no progress");
				return None;
			}
			match token.kind {
				BracketKind::Close => depth += 1,
				BracketKind::Open if depth == 0 => return Some(token),
				BracketKind::Open => depth -= 1,
			}
			pos = token.range.start();
		}
		trace!(%from, limit = self.scan_limit, "Bracket scan limit reached");
		None
	}

	/// Nearest closing bracket right of `from` not opened after `from`.
	fn scan_right<O>(&self, oracle: &O, from: Position) -> Option<BracketToken>
	where
		O: BracketOracle + ?Sized,
	{
		let mut depth = 0usize;
		let mut pos = from;
		for _ in 0..self.scan_limit {
			let token = oracle.find_next_bracket(pos)?;
			if token.range.end() <= pos {
				trace!(%pos, "Bracket scan made no progress");
				return None;
			}
			match token.kind {
				BracketKind::Open => depth += 1,
				BracketKind::Close if depth == 0 => return Some(token),
				BracketKind::Close => depth -= 1,
			}
			pos = token.range.end();
		}
		trace!(%from, limit = self.scan_limit, "Bracket scan limit reached");
		None
	}
}

/// Picks the pair reaching furthest outward.
///
/// The right pair wins only if it strictly encloses the left one; equal or
/// crossing pairs resolve to the left pair.
fn outermost(left: Option<BracketMatch>, right: Option<BracketMatch>) -> Option<BracketMatch> {
	match (left, right) {
		(Some(left), Some(right)) => {
			if right.outer().strictly_contains_range(&left.outer()) {
				Some(right)
			} else {
				Some(left)
			}
		}
		(pair @ Some(_), None) | (None, pair @ Some(_)) => pair,
		(None, None) => None,
	}
}
