//! Test doubles for the engine ports.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use climb_primitives::{BoxFutureLocal, Position, Range, Selection, SelectionSet, ViewId};
use tokio::sync::Notify;

use crate::error::{HostError, ProviderError};
use crate::events::{CursorChannel, CursorMoved};
use crate::host::SelectionHost;
use crate::oracle::{BracketMatch, BracketOracle, BracketToken, RangeProvider};

/// In-memory view that emits cursor events like a real one.
pub struct MockView {
	id: ViewId,
	selections: RefCell<SelectionSet>,
	channel: CursorChannel,
	has_model: Cell<bool>,
	reject_next: Cell<bool>,
	applied: Cell<usize>,
}

impl MockView {
	pub fn new(id: ViewId, selection: Selection) -> Self {
		Self {
			id,
			selections: RefCell::new(SelectionSet::single(selection)),
			channel: CursorChannel::new(),
			has_model: Cell::new(true),
			reject_next: Cell::new(false),
			applied: Cell::new(0),
		}
	}

	pub fn with_channel(id: ViewId, selection: Selection, channel: CursorChannel) -> Self {
		Self {
			channel,
			..Self::new(id, selection)
		}
	}

	pub fn caret(id: ViewId, line: usize, column: usize) -> Self {
		Self::new(id, Selection::caret(Position::new(line, column)))
	}

	pub fn primary(&self) -> Selection {
		self.selections.borrow().primary()
	}

	pub fn range(&self) -> Range {
		self.primary().range()
	}

	/// Simulates a user moving the cursor.
	pub fn move_cursor(&self, selection: Selection) {
		*self.selections.borrow_mut() = SelectionSet::single(selection);
		self.notify();
	}

	pub fn set_all(&self, selections: SelectionSet) {
		*self.selections.borrow_mut() = selections;
	}

	pub fn detach_model(&self) {
		self.has_model.set(false);
	}

	pub fn reject_next(&self) {
		self.reject_next.set(true);
	}

	pub fn applied(&self) -> usize {
		self.applied.get()
	}

	fn notify(&self) {
		let event = CursorMoved {
			view: self.id,
			selection: self.primary(),
		};
		self.channel.emit(&event);
	}
}

impl SelectionHost for MockView {
	fn view_id(&self) -> ViewId {
		self.id
	}

	fn selections(&self) -> SelectionSet {
		self.selections.borrow().clone()
	}

	fn set_selection(&self, selection: Selection) -> Result<(), HostError> {
		self.set_selections(SelectionSet::single(selection))
	}

	fn set_selections(&self, selections: SelectionSet) -> Result<(), HostError> {
		if self.reject_next.replace(false) {
			return Err(HostError::Rejected("test view refused".into()));
		}
		*self.selections.borrow_mut() = selections;
		self.applied.set(self.applied.get() + 1);
		self.notify();
		Ok(())
	}

	fn has_model(&self) -> bool {
		self.has_model.get()
	}

	fn cursor_events(&self) -> &CursorChannel {
		&self.channel
	}
}

/// Provider returning a fixed candidate list, counting requests.
#[derive(Default)]
pub struct StaticProvider {
	ranges: Vec<Range>,
	calls: Cell<usize>,
	fail: bool,
}

impl StaticProvider {
	pub fn new(ranges: impl IntoIterator<Item = Range>) -> Self {
		Self {
			ranges: ranges.into_iter().collect(),
			..Self::default()
		}
	}

	pub fn failing() -> Self {
		Self {
			fail: true,
			..Self::default()
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.get()
	}
}

impl RangeProvider for StaticProvider {
	fn ranges_to_position(
		&self,
		_view: ViewId,
		_position: Position,
	) -> BoxFutureLocal<'_, Result<Vec<Range>, ProviderError>> {
		self.calls.set(self.calls.get() + 1);
		let result = if self.fail {
			Err(ProviderError::Failed("scripted failure".into()))
		} else {
			Ok(self.ranges.clone())
		};
		Box::pin(async move { result })
	}
}

/// Provider whose answer is held back until [`GatedProvider::open`].
pub struct GatedProvider {
	ranges: Vec<Range>,
	gate: Rc<Notify>,
}

impl GatedProvider {
	pub fn new(ranges: impl IntoIterator<Item = Range>) -> Self {
		Self {
			ranges: ranges.into_iter().collect(),
			gate: Rc::new(Notify::new()),
		}
	}

	pub fn open(&self) {
		self.gate.notify_one();
	}
}

impl RangeProvider for GatedProvider {
	fn ranges_to_position(
		&self,
		_view: ViewId,
		_position: Position,
	) -> BoxFutureLocal<'_, Result<Vec<Range>, ProviderError>> {
		let gate = self.gate.clone();
		let ranges = self.ranges.clone();
		Box::pin(async move {
			gate.notified().await;
			Ok(ranges)
		})
	}
}

/// Single-line bracket oracle over a string, pairing same-kind brackets.
///
/// Columns are 1-based char offsets. Tokens may also be scripted directly
/// to exercise oracles that disagree with plain character scanning.
#[derive(Debug, Default, Clone)]
pub struct ScriptedBrackets {
	tokens: Vec<BracketToken>,
	pairs: Vec<BracketMatch>,
}

const OPENERS: [char; 3] = ['(', '[', '{'];
const CLOSERS: [char; 3] = [')', ']', '}'];

impl ScriptedBrackets {
	pub fn parse(text: &str) -> Self {
		let mut oracle = Self::default();
		let mut stacks: [Vec<Range>; 3] = Default::default();
		for (idx, ch) in text.chars().enumerate() {
			let range = Range::on_line(1, idx + 1, idx + 2);
			if let Some(kind) = OPENERS.iter().position(|&c| c == ch) {
				oracle.tokens.push(BracketToken::open(range));
				stacks[kind].push(range);
			} else if let Some(kind) = CLOSERS.iter().position(|&c| c == ch) {
				oracle.tokens.push(BracketToken::close(range));
				if let Some(open) = stacks[kind].pop() {
					oracle.pairs.push(BracketMatch::new(open, range));
				}
			}
		}
		oracle
	}

	pub fn from_parts(tokens: Vec<BracketToken>, pairs: Vec<BracketMatch>) -> Self {
		Self { tokens, pairs }
	}

	fn pair_of(&self, token: Range) -> Option<BracketMatch> {
		self.pairs.iter().copied().find(|pair| pair.open == token || pair.close == token)
	}
}

impl BracketOracle for ScriptedBrackets {
	fn find_prev_bracket(&self, pos: Position) -> Option<BracketToken> {
		self.tokens
			.iter()
			.copied()
			.filter(|token| token.range.end() <= pos)
			.max_by_key(|token| token.range.end())
	}

	fn find_next_bracket(&self, pos: Position) -> Option<BracketToken> {
		self.tokens
			.iter()
			.copied()
			.filter(|token| token.range.start() >= pos)
			.min_by_key(|token| token.range.start())
	}

	fn match_bracket(&self, pos: Position) -> Option<BracketMatch> {
		let token = self.tokens.iter().find(|token| {
			token.range.end() == pos || (token.range.start() < pos && pos < token.range.end())
		})?;
		self.pair_of(token.range)
	}
}

/// Parses a single-line fixture using `|` for a caret and `«`/`»` for a
/// forward selection (`»`/`«` for a backward one).
pub fn fixture(marked: &str) -> (String, Selection) {
	let mut text = String::new();
	let mut marks = Vec::new();
	let mut backward = None;
	for ch in marked.chars() {
		match ch {
			'|' => marks.push(text.chars().count() + 1),
			'«' | '»' => {
				backward.get_or_insert(ch == '»');
				marks.push(text.chars().count() + 1);
			}
			_ => text.push(ch),
		}
	}
	let at = |column: usize| Position::new(1, column);
	let selection = match (marks.as_slice(), backward) {
		([caret], None) => Selection::caret(at(*caret)),
		([a, b], Some(false)) => Selection::new(at(*a), at(*b)),
		([a, b], Some(true)) => Selection::new(at(*b), at(*a)),
		_ => panic!("fixture needs exactly one caret or one selection: {marked}"),
	};
	(text, selection)
}

/// Renders a selection back into fixture notation.
pub fn render(text: &str, selection: Selection) -> String {
	let start = selection.start().column;
	let end = selection.end().column;
	let (open, close) = if selection.direction() == climb_primitives::Direction::Backward {
		('»', '«')
	} else {
		('«', '»')
	};
	let mut out = String::new();
	for (idx, ch) in text.chars().enumerate() {
		let column = idx + 1;
		if selection.is_empty() && column == start {
			out.push('|');
		} else if !selection.is_empty() && column == start {
			out.push(open);
		}
		if !selection.is_empty() && column == end {
			out.push(close);
		}
		out.push(ch);
	}
	let past_end = text.chars().count() + 1;
	if selection.is_empty() && start == past_end {
		out.push('|');
	} else if !selection.is_empty() {
		if start == past_end {
			out.push(open);
		}
		if end == past_end {
			out.push(close);
		}
	}
	out
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
