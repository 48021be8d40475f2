//! Document, oracle and end-to-end engine tests over real text.

use climb_primitives::{Position, Selection, ViewId};

use super::*;

mod document;

const VIEW: ViewId = ViewId(1);

/// Builds a document from text with one `|` caret marker and places the caret.
fn doc_with_caret(marked: &str) -> TextDocument {
	let idx = marked.chars().position(|ch| ch == '|').expect("fixture needs a caret");
	let doc = TextDocument::new(VIEW, &marked.replacen('|', "", 1));
	let caret = doc.position_of(idx);
	doc.move_cursor(Selection::caret(caret)).unwrap();
	doc
}

fn pos(line: usize, column: usize) -> Position {
	Position::new(line, column)
}
