use std::cell::Cell;
use std::rc::Rc;

use climb_primitives::{Range, SelectionSet};
use climb_select::{HostError, ListenerControl, SelectionHost};
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn line_lengths_exclude_line_endings() {
	let doc = TextDocument::new(VIEW, "ab\r\ncd\n");
	assert_eq!(doc.line_count(), 3);
	assert_eq!(doc.line_len(1), Some(2));
	assert_eq!(doc.line_len(2), Some(2));
	assert_eq!(doc.line_len(3), Some(0));
	assert_eq!(doc.line_len(4), None);
	assert_eq!(doc.line_len(0), None);
}

#[test]
fn char_index_clamps_but_checked_index_refuses() {
	let doc = TextDocument::new(VIEW, "ab\ncd");
	assert_eq!(doc.char_index(pos(1, 10)), Some(2));
	assert_eq!(doc.checked_char_index(pos(1, 10)), None);
	assert_eq!(doc.checked_char_index(pos(1, 3)), Some(2));
	assert_eq!(doc.checked_char_index(pos(2, 1)), Some(3));
	assert_eq!(doc.char_index(pos(3, 1)), None);
}

#[test]
fn positions_round_trip_through_char_indices() {
	let doc = TextDocument::new(VIEW, "fn α() {\n\tβ\n}");
	for idx in 0..=doc.rope().len_chars() {
		assert_eq!(doc.char_index(doc.position_of(idx)), Some(idx), "char {idx}");
	}
	assert_eq!(doc.position_of(usize::MAX), pos(3, 2));
}

#[test]
fn slice_reads_across_lines() {
	let doc = TextDocument::new(VIEW, "one\ntwo\nthree");
	assert_eq!(doc.slice(Range::new(pos(1, 2), pos(2, 3))), "ne\ntw");
	assert_eq!(doc.slice(Range::empty(pos(2, 2))), "");
}

#[test]
fn selection_changes_notify_listeners() {
	let doc = TextDocument::new(VIEW, "hello");
	let seen = Rc::new(Cell::new(None));
	let sink = seen.clone();
	let _sub = doc.cursor_events().subscribe(VIEW, move |event| {
		sink.set(Some(event.selection));
		ListenerControl::Keep
	});

	let selection = Selection::new(pos(1, 2), pos(1, 4));
	doc.set_selection(selection).unwrap();
	assert_eq!(seen.get(), Some(selection));
	assert_eq!(doc.primary(), selection);
}

#[test]
fn out_of_bounds_selection_is_rejected() {
	let doc = TextDocument::new(VIEW, "hello");
	let err = doc.set_selection(Selection::caret(pos(1, 7))).unwrap_err();
	assert_eq!(err, HostError::OutOfBounds(pos(1, 7)));
	assert_eq!(doc.primary(), Selection::caret(pos(1, 1)));
}

#[test]
fn detached_document_refuses_changes() {
	let doc = TextDocument::new(VIEW, "hello");
	doc.detach();
	assert!(!doc.has_model());
	assert_eq!(
		doc.set_selections(SelectionSet::single(Selection::caret(pos(1, 2)))),
		Err(HostError::NoModel)
	);
}
