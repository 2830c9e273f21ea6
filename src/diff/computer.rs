// SPDX-License-Identifier: MIT

//! The top-level diff orchestrator: hashes lines, picks an aligner by input
//! size, runs the heuristic passes, recurses into character-level diffing,
//! and assembles the final range mappings.

use std::collections::HashMap;

use crate::diff::algorithm::{Sequence, SequenceDiff, Timeout};
use crate::diff::dynamic_programming::compute_dynamic_programming_diff;
use crate::diff::heuristics::{
    extend_diffs_to_entire_word_if_appropriate, optimize_sequence_diffs, remove_short_matches,
    remove_very_short_matching_lines_between_diffs,
    remove_very_short_matching_text_between_long_diffs,
};
use crate::diff::line_range::LineRange;
use crate::diff::mapping::{
    line_range_mapping_from_range_mappings, DetailedLineRangeMapping, MovedText, RangeMapping,
};
use crate::diff::moves::compute_moved_lines;
use crate::diff::myers::compute_myers_diff;
use crate::diff::offset_range::OffsetRange;
use crate::diff::position::{Position, Range};
use crate::diff::sequences::{CharSequence, LineSequence, SliceContext};
use crate::diff::{DiffOptions, LinesDiff};

/// Combined line count below which the quadratic aligner is used at the
/// line level. The DP aligner produces more intuitive diffs but its table
/// grows as the product of the input sizes.
const LINE_LEVEL_DP_THRESHOLD: usize = 1700;

/// Combined character count below which the quadratic aligner is used for
/// the character-level refinement of a single change.
const CHAR_LEVEL_DP_THRESHOLD: usize = 500;

pub struct LinesDiffComputer;

impl LinesDiffComputer {
    pub fn compute_diff(
        original_lines: &[String],
        modified_lines: &[String],
        options: &DiffOptions,
    ) -> LinesDiff {
        // Fast paths: trivially equal documents, and replacement of or by an
        // empty document.
        if original_lines.len() <= 1 && original_lines == modified_lines {
            return LinesDiff::new(Vec::new(), Vec::new(), false);
        }
        if (original_lines.len() == 1 && original_lines[0].is_empty())
            || (modified_lines.len() == 1 && modified_lines[0].is_empty())
        {
            return whole_document_replace(original_lines, modified_lines);
        }

        let timeout = Timeout::from_millis(options.max_computation_time_ms);
        let consider_whitespace_changes = !options.ignore_trim_whitespace;

        // Assign a small dense integer to each distinct trimmed line text.
        // Whitespace-only differences are recovered later by
        // scan_for_whitespace_changes, so hashing can always trim.
        let mut hashes: HashMap<&str, u32> = HashMap::new();
        let mut original_hashes = Vec::with_capacity(original_lines.len());
        for line in original_lines {
            let next = hashes.len() as u32;
            original_hashes.push(*hashes.entry(line.trim()).or_insert(next));
        }
        let mut modified_hashes = Vec::with_capacity(modified_lines.len());
        for line in modified_lines {
            let next = hashes.len() as u32;
            modified_hashes.push(*hashes.entry(line.trim()).or_insert(next));
        }

        let seq1 = LineSequence::new(original_hashes.clone(), original_lines);
        let seq2 = LineSequence::new(modified_hashes.clone(), modified_lines);

        let line_result = if original_lines.len() + modified_lines.len() < LINE_LEVEL_DP_THRESHOLD
        {
            // Prefer aligning substantive lines: matching blank lines is
            // nearly worthless, matching long identical lines is valuable.
            let score = |offset1: usize, offset2: usize| {
                if original_lines[offset1] == modified_lines[offset2] {
                    if modified_lines[offset2].is_empty() {
                        0.1
                    } else {
                        1.0 + (1.0 + modified_lines[offset2].len() as f64).ln()
                    }
                } else {
                    0.99
                }
            };
            compute_dynamic_programming_diff(&seq1, &seq2, timeout, Some(&score))
        } else {
            compute_myers_diff(&seq1, &seq2, timeout)
        };
        let mut hit_timeout = line_result.hit_timeout;

        let mut line_diffs = optimize_sequence_diffs(&seq1, &seq2, line_result.diffs);
        line_diffs = remove_very_short_matching_lines_between_diffs(&seq1, line_diffs);

        // Character-refine every changed block, and re-check equal runs for
        // whitespace-only differences that the trimmed hashes glossed over.
        let mut alignments: Vec<RangeMapping> = Vec::new();
        let mut seq1_last_start = 0;
        let mut seq2_last_start = 0;

        let scan_for_whitespace_changes =
            |alignments: &mut Vec<RangeMapping>,
             hit_timeout: &mut bool,
             seq1_start: usize,
             seq2_start: usize,
             equal_lines_count: usize| {
                if !consider_whitespace_changes {
                    return;
                }
                for i in 0..equal_lines_count {
                    let seq1_offset = seq1_start + i;
                    let seq2_offset = seq2_start + i;
                    if original_lines[seq1_offset] != modified_lines[seq2_offset] {
                        // Equal after trimming, but not textually: diff the
                        // two lines character by character.
                        let (mappings, timed_out) = refine_diff(
                            original_lines,
                            modified_lines,
                            &SequenceDiff::new(
                                OffsetRange::of_length(seq1_offset, 1),
                                OffsetRange::of_length(seq2_offset, 1),
                            ),
                            timeout,
                            consider_whitespace_changes,
                            options.extend_to_subwords,
                        );
                        alignments.extend(mappings);
                        *hit_timeout |= timed_out;
                    }
                }
            };

        for diff in &line_diffs {
            let equal_lines_count = diff.seq1_range.start - seq1_last_start;
            scan_for_whitespace_changes(
                &mut alignments,
                &mut hit_timeout,
                seq1_last_start,
                seq2_last_start,
                equal_lines_count,
            );
            seq1_last_start = diff.seq1_range.end;
            seq2_last_start = diff.seq2_range.end;

            let (mappings, timed_out) = refine_diff(
                original_lines,
                modified_lines,
                diff,
                timeout,
                consider_whitespace_changes,
                options.extend_to_subwords,
            );
            alignments.extend(mappings);
            hit_timeout |= timed_out;
        }
        scan_for_whitespace_changes(
            &mut alignments,
            &mut hit_timeout,
            seq1_last_start,
            seq2_last_start,
            original_lines.len() - seq1_last_start,
        );

        let changes =
            line_range_mapping_from_range_mappings(&alignments, original_lines, modified_lines);

        let mut moves: Vec<MovedText> = Vec::new();
        if options.compute_moves {
            for mapping in
                compute_moved_lines(&changes, &original_hashes, &modified_hashes, timeout)
            {
                let identical = mapping.original.length() == mapping.modified.length()
                    && mapping.original.iter().zip(mapping.modified.iter()).all(|(l1, l2)| {
                        original_lines[l1 as usize - 1] == modified_lines[l2 as usize - 1]
                    });
                if identical {
                    moves.push(MovedText::new(mapping, Vec::new()));
                    continue;
                }

                let (mappings, timed_out) = refine_diff(
                    original_lines,
                    modified_lines,
                    &SequenceDiff::new(
                        mapping.original.to_offset_range(),
                        mapping.modified.to_offset_range(),
                    ),
                    timeout,
                    consider_whitespace_changes,
                    options.extend_to_subwords,
                );
                hit_timeout |= timed_out;
                let move_changes = line_range_mapping_from_range_mappings(
                    &mappings,
                    original_lines,
                    modified_lines,
                );
                moves.push(MovedText::new(mapping, move_changes));
            }
        }

        debug_validate(&changes, original_lines, modified_lines);
        for moved in &moves {
            debug_validate(&moved.changes, original_lines, modified_lines);
        }

        LinesDiff::new(changes, moves, hit_timeout)
    }
}

/// Character-level refinement of one line-level diff: align the characters
/// of the two line ranges, run the character heuristics, and translate the
/// resulting offset diffs into document range mappings.
fn refine_diff(
    original_lines: &[String],
    modified_lines: &[String],
    diff: &SequenceDiff,
    timeout: Timeout,
    consider_whitespace_changes: bool,
    extend_to_subwords: bool,
) -> (Vec<RangeMapping>, bool) {
    // Both slices must agree on the newline structure around them or the
    // alignment can pair text beyond the refined lines.
    let context = SliceContext::for_ranges(
        diff.seq1_range,
        original_lines.len(),
        diff.seq2_range,
        modified_lines.len(),
    );
    let slice1 = CharSequence::new(
        original_lines,
        diff.seq1_range,
        consider_whitespace_changes,
        context,
    );
    let slice2 = CharSequence::new(
        modified_lines,
        diff.seq2_range,
        consider_whitespace_changes,
        context,
    );

    let result = if slice1.len() + slice2.len() < CHAR_LEVEL_DP_THRESHOLD {
        compute_dynamic_programming_diff(&slice1, &slice2, timeout, None)
    } else {
        compute_myers_diff(&slice1, &slice2, timeout)
    };

    let mut diffs = optimize_sequence_diffs(&slice1, &slice2, result.diffs);
    diffs = extend_diffs_to_entire_word_if_appropriate(&slice1, &slice2, diffs, |seq, offset| {
        seq.find_word_containing(offset)
    });
    if extend_to_subwords {
        diffs =
            extend_diffs_to_entire_word_if_appropriate(&slice1, &slice2, diffs, |seq, offset| {
                seq.find_subword_containing(offset)
            });
    }
    diffs = remove_short_matches(diffs);
    diffs = remove_very_short_matching_text_between_long_diffs(&slice1, &slice2, diffs);

    let mappings = diffs
        .iter()
        .map(|d| {
            RangeMapping::new(
                slice1.translate_range(d.seq1_range),
                slice2.translate_range(d.seq2_range),
            )
        })
        .collect();
    (mappings, result.hit_timeout)
}

fn whole_document_replace(original_lines: &[String], modified_lines: &[String]) -> LinesDiff {
    let original_end_col = original_lines.last().map(|l| l.chars().count()).unwrap_or(0) as u32 + 1;
    let modified_end_col = modified_lines.last().map(|l| l.chars().count()).unwrap_or(0) as u32 + 1;

    let change = DetailedLineRangeMapping::new(
        LineRange::new(1, original_lines.len() as u32 + 1),
        LineRange::new(1, modified_lines.len() as u32 + 1),
        Some(vec![RangeMapping::new(
            Range::from_parts(1, 1, original_lines.len() as u32, original_end_col),
            Range::from_parts(1, 1, modified_lines.len() as u32, modified_end_col),
        )]),
    );
    LinesDiff::new(vec![change], Vec::new(), false)
}

/// Every produced range must address valid positions within the line
/// arrays. A violation here is an algorithm bug, not recoverable state, so
/// this only runs in debug builds.
fn debug_validate(
    changes: &[DetailedLineRangeMapping],
    original_lines: &[String],
    modified_lines: &[String],
) {
    if !cfg!(debug_assertions) {
        return;
    }

    let valid_position = |pos: &Position, lines: &[String]| {
        pos.line_number >= 1
            && (pos.line_number as usize) <= lines.len()
            && pos.column >= 1
            && (pos.column as usize)
                <= lines[pos.line_number as usize - 1].chars().count() + 1
    };

    for change in changes {
        assert!(
            change.original.end_line_number_exclusive as usize <= original_lines.len() + 1
                && change.modified.end_line_number_exclusive as usize <= modified_lines.len() + 1,
            "change {:?}/{:?} out of bounds",
            change.original,
            change.modified
        );
        if let Some(inner) = &change.inner_changes {
            for mapping in inner {
                assert!(
                    valid_position(&mapping.original_range.start, original_lines)
                        && valid_position(&mapping.original_range.end, original_lines)
                        && valid_position(&mapping.modified_range.start, modified_lines)
                        && valid_position(&mapping.modified_range.end, modified_lines),
                    "inner change {:?} out of bounds",
                    mapping
                );
            }
        }
    }
}
