// SPDX-License-Identifier: MIT

use pretty_assertions::assert_eq;

use lines_diff::diff::sequences::{CharSequence, LineSequence, SliceContext};
use lines_diff::diff::{OffsetRange, Position, Range, Sequence};

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn char_sequence_keeps_document_newlines() {
    let doc = lines(&["ab", "cd", "ef"]);
    let seq = CharSequence::new(&doc, OffsetRange::new(0, 2), true, SliceContext::FollowedByText);

    assert_eq!(seq.text(OffsetRange::new(0, seq.len())), "ab\ncd\n");
    assert_eq!(seq.count_lines_in(OffsetRange::new(0, seq.len())), 2);

    assert_eq!(seq.translate_offset(0, false), Position::new(1, 1));
    assert_eq!(seq.translate_offset(2, false), Position::new(1, 3));
    assert_eq!(seq.translate_offset(3, false), Position::new(2, 1));
    assert_eq!(seq.translate_offset(5, false), Position::new(2, 3));
    // The offset past the final newline belongs to the next line.
    assert_eq!(seq.translate_offset(6, false), Position::new(3, 1));
}

#[test]
fn char_sequence_at_document_end_owns_the_preceding_newline() {
    let doc = lines(&["ab", "cd", "ef"]);
    let seq = CharSequence::new(&doc, OffsetRange::new(1, 3), true, SliceContext::AtDocumentEnd);

    assert_eq!(seq.text(OffsetRange::new(0, seq.len())), "\ncd\nef");

    // Element 0 is the newline terminating the line before the slice.
    assert_eq!(seq.translate_offset(0, false), Position::new(1, 3));
    assert_eq!(seq.translate_offset(1, false), Position::new(2, 1));
    assert_eq!(seq.translate_offset(6, false), Position::new(3, 3));
}

#[test]
fn char_sequence_mixed_context_keeps_to_its_own_lines() {
    let doc = lines(&["ab", "cd", "ef"]);
    let seq = CharSequence::new(&doc, OffsetRange::new(1, 3), true, SliceContext::Mixed);

    // When only one side of a refinement reaches its document end, neither
    // slice owns a newline beyond its own lines.
    assert_eq!(seq.text(OffsetRange::new(0, seq.len())), "cd\nef");
    assert_eq!(seq.translate_offset(0, false), Position::new(2, 1));
    assert_eq!(seq.translate_offset(5, false), Position::new(3, 3));
}

#[test]
fn char_sequence_trims_whitespace_but_keeps_columns() {
    let doc = lines(&["  ab  "]);
    let seq = CharSequence::new(&doc, OffsetRange::new(0, 1), false, SliceContext::AtDocumentEnd);

    assert_eq!(seq.text(OffsetRange::new(0, seq.len())), "ab");
    assert_eq!(seq.translate_offset(0, false), Position::new(1, 3));
    assert_eq!(seq.translate_offset(1, false), Position::new(1, 4));
    assert_eq!(seq.translate_offset(2, false), Position::new(1, 5));

    // An exclusive range end at a line start maps to column 1.
    assert_eq!(seq.translate_offset(0, true), Position::new(1, 1));

    assert_eq!(
        seq.translate_range(OffsetRange::new(0, 2)),
        Range::new(Position::new(1, 3), Position::new(1, 5))
    );
}

#[test]
fn char_sequence_empty_slice_fallback() {
    let doc = lines(&["a", "b"]);

    let mid = CharSequence::new(&doc, OffsetRange::new(1, 1), true, SliceContext::FollowedByText);
    assert_eq!(mid.translate_offset(0, false), Position::new(2, 1));

    // An insertion point past the last line anchors at the document end.
    let end = CharSequence::new(&doc, OffsetRange::new(2, 2), true, SliceContext::AtDocumentEnd);
    assert_eq!(end.translate_offset(0, false), Position::new(2, 2));
}

#[test]
fn word_lookup() {
    let doc = lines(&["foo bar9"]);
    let seq = CharSequence::new(&doc, OffsetRange::new(0, 1), true, SliceContext::AtDocumentEnd);

    assert_eq!(seq.find_word_containing(0), Some(OffsetRange::new(0, 3)));
    assert_eq!(seq.find_word_containing(5), Some(OffsetRange::new(4, 8)));
    assert_eq!(seq.find_word_containing(3), None);
    assert_eq!(seq.find_word_containing(100), None);
}

#[test]
fn sub_word_lookup() {
    let doc = lines(&["fooBarBaz"]);
    let seq = CharSequence::new(&doc, OffsetRange::new(0, 1), true, SliceContext::AtDocumentEnd);

    assert_eq!(seq.find_subword_containing(1), Some(OffsetRange::new(0, 3)));
    assert_eq!(seq.find_subword_containing(4), Some(OffsetRange::new(3, 6)));
    assert_eq!(seq.find_subword_containing(6), Some(OffsetRange::new(6, 9)));
    // Whole-word lookup spans all sub-words.
    assert_eq!(seq.find_word_containing(4), Some(OffsetRange::new(0, 9)));
}

#[test]
fn char_boundary_scores_prefer_separators() {
    let doc = lines(&["ab, cd"]);
    let seq = CharSequence::new(&doc, OffsetRange::new(0, 1), true, SliceContext::AtDocumentEnd);

    let within_word = seq.get_boundary_score(1);
    let before_comma = seq.get_boundary_score(2);
    let after_space = seq.get_boundary_score(4);

    assert!(before_comma > within_word);
    assert!(after_space > within_word);
    assert!(before_comma > after_space);
}

#[test]
fn line_boundary_scores_prefer_unindented_lines() {
    let doc = lines(&["fn main() {", "    let x = 1;", "    let y = 2;", "}"]);
    let seq = LineSequence::new(vec![0, 1, 2, 3], &doc);

    let at_scope_start = seq.get_boundary_score(1);
    let inside_body = seq.get_boundary_score(2);
    let at_document_end = seq.get_boundary_score(4);

    assert!(at_scope_start > inside_body);
    assert!(at_document_end > inside_body);
    assert_eq!(seq.get_element(2), 2);
}
