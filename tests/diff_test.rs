// SPDX-License-Identifier: MIT

use pretty_assertions::assert_eq;

use lines_diff::diff::{
    compute_diff, DiffOptions, LineRange, Position, Range, RangeMapping,
};

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn options() -> DiffOptions {
    DiffOptions {
        ignore_trim_whitespace: false,
        ..Default::default()
    }
}

fn range(
    start_line: u32,
    start_column: u32,
    end_line: u32,
    end_column: u32,
) -> Range {
    Range::new(
        Position::new(start_line, start_column),
        Position::new(end_line, end_column),
    )
}

#[test]
fn equal_documents() {
    for doc in [vec![], lines(&[""]), lines(&["a"]), lines(&["a", "b", "c"])] {
        let diff = compute_diff(&doc, &doc, &options());
        assert!(diff.changes.is_empty());
        assert!(diff.moves.is_empty());
        assert!(!diff.hit_timeout);
    }
}

#[test]
fn single_line_replacement() {
    let original = lines(&["a", "b", "c"]);
    let modified = lines(&["a", "x", "c"]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(2, 3));
    assert_eq!(change.modified, LineRange::new(2, 3));
    assert_eq!(
        change.inner_changes.as_deref(),
        Some(&[RangeMapping::new(range(2, 1, 2, 2), range(2, 1, 2, 2))][..])
    );
}

#[test]
fn empty_document_replaced_by_content() {
    let original = lines(&[""]);
    let modified = lines(&["hello", "world"]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(1, 2));
    assert_eq!(change.modified, LineRange::new(1, 3));
    assert_eq!(
        change.inner_changes.as_deref(),
        Some(&[RangeMapping::new(range(1, 1, 1, 1), range(1, 1, 2, 6))][..])
    );
}

#[test]
fn line_inserted_in_the_middle() {
    let original = lines(&["a", "c"]);
    let modified = lines(&["a", "b", "c"]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(2, 2));
    assert_eq!(change.modified, LineRange::new(2, 3));
}

#[test]
fn line_deleted_in_the_middle() {
    let original = lines(&["a", "b", "c"]);
    let modified = lines(&["a", "c"]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(2, 3));
    assert_eq!(change.modified, LineRange::new(2, 2));
}

#[test]
fn line_appended_at_the_end() {
    let original = lines(&["a"]);
    let modified = lines(&["a", "b"]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(2, 2));
    assert_eq!(change.modified, LineRange::new(2, 3));
}

#[test]
fn line_deleted_at_the_end() {
    let original = lines(&["a", "b"]);
    let modified = lines(&["a"]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(2, 3));
    assert_eq!(change.modified, LineRange::new(2, 2));
}

#[test]
fn trailing_whitespace_change_is_reported() {
    let original = lines(&["a "]);
    let modified = lines(&["a"]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(1, 2));
    assert_eq!(change.modified, LineRange::new(1, 2));
    assert_eq!(
        change.inner_changes.as_deref(),
        Some(&[RangeMapping::new(range(1, 2, 1, 3), range(1, 2, 1, 2))][..])
    );
}

#[test]
fn trailing_whitespace_change_can_be_ignored() {
    let original = lines(&["a ", "  b"]);
    let modified = lines(&["a", "b  "]);
    let diff = compute_diff(
        &original,
        &modified,
        &DiffOptions {
            ignore_trim_whitespace: true,
            ..Default::default()
        },
    );
    assert!(diff.changes.is_empty());
}

#[test]
fn character_changes_across_two_lines() {
    let original = lines(&["const x = 1;", "console.log(x);"]);
    let modified = lines(&["const y = 1;", "console.log(y);"]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(1, 3));
    assert_eq!(change.modified, LineRange::new(1, 3));
    assert_eq!(
        change.inner_changes.as_deref(),
        Some(
            &[
                RangeMapping::new(range(1, 7, 1, 8), range(1, 7, 1, 8)),
                RangeMapping::new(range(2, 13, 2, 14), range(2, 13, 2, 14)),
            ][..]
        )
    );
}

#[test]
fn sub_word_extension() {
    let original = lines(&["fooAB"]);
    let modified = lines(&["fooXB"]);

    let diff = compute_diff(&original, &modified, &options());
    assert_eq!(
        diff.changes[0].inner_changes.as_deref(),
        Some(&[RangeMapping::new(range(1, 4, 1, 5), range(1, 4, 1, 5))][..])
    );

    let diff = compute_diff(
        &original,
        &modified,
        &DiffOptions {
            ignore_trim_whitespace: false,
            extend_to_subwords: true,
            ..Default::default()
        },
    );
    assert_eq!(
        diff.changes[0].inner_changes.as_deref(),
        Some(&[RangeMapping::new(range(1, 4, 1, 6), range(1, 4, 1, 6))][..])
    );
}

#[test]
fn moved_block_is_detected() {
    let original = lines(&[
        "move one",
        "move two",
        "move three",
        "alpha",
        "bravo",
        "charlie",
        "delta",
    ]);
    let modified = lines(&[
        "alpha",
        "bravo",
        "charlie",
        "delta",
        "move one",
        "move two",
        "move three",
    ]);

    let diff = compute_diff(
        &original,
        &modified,
        &DiffOptions {
            ignore_trim_whitespace: false,
            compute_moves: true,
            ..Default::default()
        },
    );

    assert_eq!(diff.changes.len(), 2);
    assert_eq!(diff.changes[0].original, LineRange::new(1, 4));
    assert_eq!(diff.changes[0].modified, LineRange::new(1, 1));
    assert_eq!(diff.changes[1].original, LineRange::new(8, 8));
    assert_eq!(diff.changes[1].modified, LineRange::new(5, 8));

    assert_eq!(diff.moves.len(), 1);
    let moved = &diff.moves[0];
    assert_eq!(moved.line_range_mapping.original, LineRange::new(1, 4));
    assert_eq!(moved.line_range_mapping.modified, LineRange::new(5, 8));
    // The block is byte-identical, so there is nothing to refine.
    assert!(moved.changes.is_empty());
}

#[test]
fn moves_are_off_by_default() {
    let original = lines(&["move one", "move two", "move three", "tail"]);
    let modified = lines(&["tail", "move one", "move two", "move three"]);
    let diff = compute_diff(&original, &modified, &options());
    assert!(diff.moves.is_empty());
}

#[test]
fn changes_are_sorted_and_disjoint() {
    let original = lines(&["a", "b", "c", "d", "middle", "e", "f", "g", "h"]);
    let modified = lines(&["a", "x", "c", "d", "middle", "e", "y", "g", "z"]);
    let diff = compute_diff(&original, &modified, &options());

    assert!(!diff.changes.is_empty());
    for pair in diff.changes.windows(2) {
        assert!(
            pair[0].original.end_line_number_exclusive < pair[1].original.start_line_number
                || pair[0].modified.end_line_number_exclusive
                    < pair[1].modified.start_line_number
        );
        assert!(pair[0].original.end_line_number_exclusive <= pair[1].original.start_line_number);
        assert!(pair[0].modified.end_line_number_exclusive <= pair[1].modified.start_line_number);
    }
}

#[test]
fn whitespace_change_next_to_a_deleted_last_line() {
    // Line 3 loses its indentation while line 4 disappears. Line 3 is the
    // last line of the modified document but not of the original one, so
    // the two refinement slices must not disagree about newline ownership:
    // every reported range has to stay within the paired lines.
    let original = lines(&[" ", "", "  quux ", "  "]);
    let modified = lines(&[" ", "", "quux "]);
    let diff = compute_diff(&original, &modified, &options());

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes[0];
    assert_eq!(change.original, LineRange::new(3, 5));
    assert_eq!(change.modified, LineRange::new(3, 4));

    let inner = change.inner_changes.as_deref().unwrap();
    assert_eq!(
        inner,
        &[
            RangeMapping::new(range(3, 1, 3, 3), range(3, 1, 3, 1)),
            RangeMapping::new(range(3, 8, 4, 3), range(3, 6, 3, 6)),
        ][..]
    );
    for pair in inner.windows(2) {
        assert!(pair[0].original_range.end <= pair[1].original_range.start);
        assert!(pair[0].modified_range.end <= pair[1].modified_range.start);
    }
}

#[test]
fn timeout_on_large_input_yields_a_coarse_diff() {
    let original: Vec<String> = (0..4000).map(|i| format!("left {}", i)).collect();
    let modified: Vec<String> = (0..4000).map(|i| format!("right {}", i)).collect();
    let diff = compute_diff(
        &original,
        &modified,
        &DiffOptions {
            ignore_trim_whitespace: false,
            max_computation_time_ms: 1,
            ..Default::default()
        },
    );

    // The budget cannot cover two documents with nothing in common; the
    // result degrades to a whole-document replacement but stays valid.
    assert!(diff.hit_timeout);
    assert_eq!(diff.changes.len(), 1);
    assert_eq!(diff.changes[0].original, LineRange::new(1, 4001));
    assert_eq!(diff.changes[0].modified, LineRange::new(1, 4001));
}

#[test]
fn no_timeout_with_unlimited_budget() {
    let original: Vec<String> = (0..500).map(|i| format!("line {}", i)).collect();
    let modified: Vec<String> = (0..500).map(|i| format!("line {}", i * 7 % 500)).collect();
    let diff = compute_diff(
        &original,
        &modified,
        &DiffOptions {
            ignore_trim_whitespace: false,
            max_computation_time_ms: 0,
            ..Default::default()
        },
    );
    assert!(!diff.hit_timeout);
}
