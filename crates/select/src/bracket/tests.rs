use climb_primitives::{Position, Range, Selection, SelectionSet, ViewId};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::test_support::{MockView, ScriptedBrackets, fixture, render};

fn expand_fixture(marked: &str) -> String {
	let (text, selection) = fixture(marked);
	let oracle = ScriptedBrackets::parse(&text);
	let expanded = BracketExpander::new().expand_selection(&oracle, selection);
	render(&text, expanded)
}

#[rstest]
#[case::after_opening("(|abc)", "«(abc)»")]
#[case::before_closing("(abc|)", "(«abc»)")]
#[case::after_closing("(abc)|", "(»abc«)")]
#[case::inside_word("(a|bc)", "(«abc»)")]
#[case::interior_grows_to_pair("(«abc»)", "«(abc)»")]
#[case::nested_interior("[(«abc»)]", "[«(abc)»]")]
#[case::pair_inside_pair("(«(abc)»)", "«((abc))»")]
#[case::nesting_between("(x (a) |y)", "(«x (a) y»)")]
#[case::mixed_kinds("{ [a] |b }", "{« [a] b »}")]
#[case::backward_keeps_direction("(a»b«c)", "(»abc«)")]
#[case::no_brackets("ab|c", "ab|c")]
#[case::caret_before_pair("|(abc)", "|(abc)")]
#[case::empty_pair("(|)", "«()»")]
fn expands(#[case] input: &str, #[case] expected: &str) {
	assert_eq!(expand_fixture(input), expected);
}

#[test]
fn unterminated_outer_bracket_is_a_noop() {
	assert_eq!(expand_fixture("( (a) «b»"), "( (a) «b»");
}

#[test]
fn closed_outer_bracket_selects_its_interior() {
	assert_eq!(expand_fixture("( (a) «b»)"), "(« (a) b»)");
}

#[test]
fn crossing_pairs_resolve_to_the_left_pair() {
	assert_eq!(expand_fixture("[ ( |x ] )"), "[ (« x ] »)");
}

fn r(start: usize, end: usize) -> Range {
	Range::on_line(1, start, end)
}

#[test]
fn enclosing_right_pair_wins() {
	// Left scan stops at 1:3-1:4, whose partner closes at 1:5; the right
	// candidate pairs with 1:1-1:2 and encloses it.
	let oracle = ScriptedBrackets::from_parts(
		vec![BracketToken::open(r(1, 2)), BracketToken::open(r(3, 4)), BracketToken::close(r(9, 10))],
		vec![BracketMatch::new(r(3, 4), r(5, 6)), BracketMatch::new(r(1, 2), r(9, 10))],
	);
	let caret = Position::new(1, 7);
	let expansion = BracketExpander::new().expansion(&oracle, caret, caret);
	assert_eq!(
		expansion,
		Some(Expansion {
			range: r(2, 9),
			rule: ExpansionRule::Enclosing,
		})
	);
}

#[test]
fn selection_spanning_multi_char_tokens_grows_to_pair() {
	// `begin x end` with both selection ends inside a keyword.
	let oracle = ScriptedBrackets::from_parts(
		vec![BracketToken::open(r(1, 6)), BracketToken::close(r(9, 12))],
		vec![BracketMatch::new(r(1, 6), r(9, 12))],
	);
	let expansion = BracketExpander::new().expansion(&oracle, Position::new(1, 3), Position::new(1, 10));
	assert_eq!(
		expansion,
		Some(Expansion {
			range: r(1, 12),
			rule: ExpansionRule::SpansPair,
		})
	);
}

#[test]
fn one_sided_scan_selects_whole_pair() {
	// The closing partner lies on another line the right scan never reaches.
	let close = Range::new(Position::new(3, 1), Position::new(3, 2));
	let oracle = ScriptedBrackets::from_parts(vec![BracketToken::open(r(1, 2))], vec![BracketMatch::new(r(1, 2), close)]);
	let caret = Position::new(1, 5);
	let expansion = BracketExpander::new().expansion(&oracle, caret, caret);
	assert_eq!(
		expansion,
		Some(Expansion {
			range: Range::new(Position::new(1, 1), Position::new(3, 2)),
			rule: ExpansionRule::OneSided,
		})
	);
}

/// Reports the same token for every query, never advancing.
struct StuckOracle;

impl BracketOracle for StuckOracle {
	fn find_prev_bracket(&self, _pos: Position) -> Option<BracketToken> {
		Some(BracketToken::close(r(1, 2)))
	}

	fn find_next_bracket(&self, _pos: Position) -> Option<BracketToken> {
		Some(BracketToken::open(r(1, 2)))
	}

	fn match_bracket(&self, _pos: Position) -> Option<BracketMatch> {
		None
	}
}

#[test]
fn scan_stops_when_oracle_does_not_advance() {
	let caret = Position::new(1, 1);
	assert_eq!(BracketExpander::new().expansion(&StuckOracle, caret, caret), None);
}

#[test]
fn scan_limit_caps_long_runs() {
	let pairs = "()".repeat(20);
	let (text, selection) = fixture(&format!("({pairs} |)"));
	let oracle = ScriptedBrackets::parse(&text);

	let unlimited = BracketExpander::new().expand_selection(&oracle, selection);
	assert_eq!(render(&text, unlimited), format!("(«{pairs} »)"));

	// Forty balanced tokens exhaust the left scan; only the closing side is found.
	let capped = BracketExpander::with_scan_limit(10).expand_selection(&oracle, selection);
	assert_eq!(render(&text, capped), format!("«({pairs} )»"));
}

#[test]
fn expand_preserves_order_and_count() {
	let (text, _) = fixture("(ab) [c|d]");
	let oracle = ScriptedBrackets::parse(&text);
	let first = Selection::caret(Position::new(1, 3));
	let second = Selection::caret(Position::new(1, 8));
	let third = Selection::caret(Position::new(1, 1));
	let view = MockView::new(ViewId(1), first);
	view.set_all(SelectionSet::from_vec(vec![first, second, third], 1).unwrap());

	assert!(BracketExpander::new().expand(&view, &oracle));
	let after = view.selections();
	assert_eq!(after.len(), 3);
	assert_eq!(after.primary().range(), r(7, 9));
	let ranges: Vec<Range> = after.iter().map(Selection::range).collect();
	assert_eq!(ranges, vec![r(2, 4), r(7, 9), r(1, 1)]);
	assert_eq!(view.applied(), 1);
}

#[test]
fn expand_without_model_is_a_noop() {
	let (text, selection) = fixture("(a|b)");
	let oracle = ScriptedBrackets::parse(&text);
	let view = MockView::new(ViewId(1), selection);
	view.detach_model();

	assert!(!BracketExpander::new().expand(&view, &oracle));
	assert_eq!(view.primary(), selection);
	assert_eq!(view.applied(), 0);
}

#[test]
fn rejected_expansion_reports_no_change() {
	let (text, selection) = fixture("(a|b)");
	let oracle = ScriptedBrackets::parse(&text);
	let view = MockView::new(ViewId(1), selection);
	view.reject_next();

	assert!(!BracketExpander::new().expand(&view, &oracle));
	assert_eq!(view.primary(), selection);
}

#[test]
fn unchanged_selections_are_not_reapplied() {
	let (text, selection) = fixture("ab|c");
	let oracle = ScriptedBrackets::parse(&text);
	let view = MockView::new(ViewId(1), selection);

	assert!(!BracketExpander::new().expand(&view, &oracle));
	assert_eq!(view.applied(), 0);
}
