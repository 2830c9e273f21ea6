// SPDX-License-Identifier: MIT

//! Post-processing passes over raw alignment output. Each pass is a pure
//! function from sorted diffs to sorted diffs; the orchestrator composes
//! them in a fixed order. None of them changes which total content is
//! considered equal beyond what the pass is designed to give up.

use itertools::Itertools;

use crate::diff::algorithm::{debug_assert_diffs_sorted, Sequence, SequenceDiff};
use crate::diff::offset_range::OffsetRange;
use crate::diff::sequences::{CharSequence, LineSequence};

/// Upper bound on how far a diff is shifted during boundary optimization.
const MAX_SHIFT_LIMIT: usize = 100;

/// Merge touching diffs, then shift insertions and deletions to the most
/// natural nearby boundary.
pub fn optimize_sequence_diffs(
    seq1: &dyn Sequence,
    seq2: &dyn Sequence,
    diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    let diffs = join_touching_diffs(diffs);
    let diffs = shift_sequence_diffs(seq1, seq2, diffs);
    let diffs = join_touching_diffs(diffs);
    debug_assert_diffs_sorted(&diffs);
    diffs
}

fn join_touching_diffs(diffs: Vec<SequenceDiff>) -> Vec<SequenceDiff> {
    diffs
        .into_iter()
        .coalesce(|a, b| {
            if a.seq1_range.intersects_or_touches(&b.seq1_range)
                || a.seq2_range.intersects_or_touches(&b.seq2_range)
            {
                Ok(a.join(&b))
            } else {
                Err((a, b))
            }
        })
        .collect()
}

fn shift_sequence_diffs(
    seq1: &dyn Sequence,
    seq2: &dyn Sequence,
    mut diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    for i in 0..diffs.len() {
        let prev_end1 = if i > 0 { diffs[i - 1].seq1_range.end } else { 0 };
        let prev_end2 = if i > 0 { diffs[i - 1].seq2_range.end } else { 0 };
        let next_start1 = diffs
            .get(i + 1)
            .map(|d| d.seq1_range.start)
            .unwrap_or(seq1.len());
        let next_start2 = diffs
            .get(i + 1)
            .map(|d| d.seq2_range.start)
            .unwrap_or(seq2.len());

        let diff = diffs[i];
        if diff.seq1_range.is_empty() {
            diffs[i] = shift_diff_to_better_position(
                diff, seq1, seq2, prev_end1, prev_end2, next_start1, next_start2,
            );
        } else if diff.seq2_range.is_empty() {
            diffs[i] = shift_diff_to_better_position(
                diff.swapped(),
                seq2,
                seq1,
                prev_end2,
                prev_end1,
                next_start2,
                next_start1,
            )
            .swapped();
        }
    }
    diffs
}

/// `diff.seq1_range` is empty: the diff is an insertion into sequence 2.
/// Slide it within the equal runs on either side to the position with the
/// best boundary score.
fn shift_diff_to_better_position(
    diff: SequenceDiff,
    seq1: &dyn Sequence,
    seq2: &dyn Sequence,
    prev_end1: usize,
    prev_end2: usize,
    next_start1: usize,
    next_start2: usize,
) -> SequenceDiff {
    assert!(diff.seq1_range.is_empty());

    let mut delta_before = 0;
    while delta_before < MAX_SHIFT_LIMIT
        && diff.seq1_range.start > prev_end1 + delta_before
        && diff.seq2_range.start > prev_end2 + delta_before
        && seq2.get_element(diff.seq2_range.start - delta_before - 1)
            == seq2.get_element(diff.seq2_range.end - delta_before - 1)
    {
        delta_before += 1;
    }

    let mut delta_after = 0;
    while delta_after < MAX_SHIFT_LIMIT
        && diff.seq1_range.start + delta_after < next_start1
        && diff.seq2_range.end + delta_after < next_start2
        && seq2.get_element(diff.seq2_range.start + delta_after)
            == seq2.get_element(diff.seq2_range.end + delta_after)
    {
        delta_after += 1;
    }

    if delta_before == 0 && delta_after == 0 {
        return diff;
    }

    let mut best_delta = 0isize;
    let mut best_score = i32::MIN;
    let mut delta = -(delta_before as isize);
    while delta <= delta_after as isize {
        let start2 = diff.seq2_range.start.checked_add_signed(delta).unwrap();
        let end2 = diff.seq2_range.end.checked_add_signed(delta).unwrap();
        let offset1 = diff.seq1_range.start.checked_add_signed(delta).unwrap();
        let score = seq1.get_boundary_score(offset1)
            + seq2.get_boundary_score(start2)
            + seq2.get_boundary_score(end2);
        if score > best_score {
            best_score = score;
            best_delta = delta;
        }
        delta += 1;
    }

    diff.delta(best_delta)
}

/// Merge line-level diffs that are separated by a very short run of matching
/// lines; a tiny unchanged island between two changes reads better as one
/// bigger change.
pub fn remove_very_short_matching_lines_between_diffs(
    seq1: &LineSequence,
    diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    let mut diffs = diffs;
    if diffs.is_empty() {
        return diffs;
    }

    let mut counter = 0;
    loop {
        let mut should_repeat = false;
        let mut result: Vec<SequenceDiff> = vec![diffs[0]];
        for &cur in &diffs[1..] {
            let last = *result.last().unwrap();

            let unchanged_lines = &seq1.lines()[last.seq1_range.end..cur.seq1_range.start];
            let unchanged_len: usize = unchanged_lines.iter().map(|l| l.chars().count()).sum();
            let unchanged_trimmed_len: usize = unchanged_lines
                .iter()
                .map(|l| l.trim().chars().count())
                .sum();

            if unchanged_len <= 5 && unchanged_trimmed_len <= 3 {
                should_repeat = true;
                *result.last_mut().unwrap() = last.join(&cur);
            } else {
                result.push(cur);
            }
        }
        diffs = result;

        counter += 1;
        if counter >= 10 || !should_repeat {
            break;
        }
    }

    debug_assert_diffs_sorted(&diffs);
    diffs
}

/// Merge character-level diffs separated by a match of at most one element
/// on either side; such matches are almost always noise.
pub fn remove_short_matches(diffs: Vec<SequenceDiff>) -> Vec<SequenceDiff> {
    let mut result: Vec<SequenceDiff> = Vec::with_capacity(diffs.len());
    for diff in diffs {
        match result.last_mut() {
            Some(last)
                if diff.seq1_range.start - last.seq1_range.end <= 1
                    || diff.seq2_range.start - last.seq2_range.end <= 1 =>
            {
                *last = last.join(&diff);
            }
            _ => result.push(diff),
        }
    }
    debug_assert_diffs_sorted(&result);
    result
}

/// Grow diff boundaries outward to whole-word boundaries when most of the
/// word changed anyway. `find_parent` supplies the word (or sub-word) range
/// containing an offset. Extending only ever consumes text that is equal on
/// both sides, so the meaning of the edit is preserved.
pub fn extend_diffs_to_entire_word_if_appropriate<F>(
    seq1: &CharSequence,
    seq2: &CharSequence,
    diffs: Vec<SequenceDiff>,
    find_parent: F,
) -> Vec<SequenceDiff>
where
    F: Fn(&CharSequence, usize) -> Option<OffsetRange>,
{
    let mut result: Vec<SequenceDiff> = Vec::with_capacity(diffs.len());

    for (i, &diff) in diffs.iter().enumerate() {
        let prev_end1 = result.last().map(|d| d.seq1_range.end).unwrap_or(0);
        let prev_end2 = result.last().map(|d| d.seq2_range.end).unwrap_or(0);
        let next_start1 = diffs
            .get(i + 1)
            .map(|d| d.seq1_range.start)
            .unwrap_or(seq1.len());
        let next_start2 = diffs
            .get(i + 1)
            .map(|d| d.seq2_range.start)
            .unwrap_or(seq2.len());

        // How far the diff start can move back to reach the start of the
        // word it cuts into. The text in that stretch is part of the equal
        // run before the diff, so it is identical on both sides.
        let mut start_ext = 0;
        if diff.seq1_range.start > prev_end1 && diff.seq2_range.start > prev_end2 {
            let w1 = diff
                .seq1_range
                .start
                .checked_sub(1)
                .and_then(|offset| find_parent(seq1, offset));
            let w2 = diff
                .seq2_range
                .start
                .checked_sub(1)
                .and_then(|offset| find_parent(seq2, offset));
            if let (Some(w1), Some(w2)) = (w1, w2) {
                // A word ending flush at the diff start is not cut by it.
                if w1.end > diff.seq1_range.start && w2.end > diff.seq2_range.start {
                    start_ext = (diff.seq1_range.start - w1.start)
                        .min(diff.seq2_range.start - w2.start)
                        .min(diff.seq1_range.start - prev_end1)
                        .min(diff.seq2_range.start - prev_end2);
                }
            }
        }

        // Symmetric at the end: move forward to the end of the word the diff
        // cuts into.
        let mut end_ext = 0;
        if diff.seq1_range.end < next_start1 && diff.seq2_range.end < next_start2 {
            let w1 = find_parent(seq1, diff.seq1_range.end);
            let w2 = find_parent(seq2, diff.seq2_range.end);
            if let (Some(w1), Some(w2)) = (w1, w2) {
                // Likewise, a word starting flush at the diff end is intact.
                if w1.start < diff.seq1_range.end && w2.start < diff.seq2_range.end {
                    end_ext = (w1.end - diff.seq1_range.end)
                        .min(w2.end - diff.seq2_range.end)
                        .min(next_start1 - diff.seq1_range.end)
                        .min(next_start2 - diff.seq2_range.end);
                }
            }
        }

        let mut extended = diff;
        if start_ext > 0 || end_ext > 0 {
            // Only extend when the equal part of the affected words is small
            // compared to the changed part; otherwise the word mostly
            // survived and highlighting all of it is misleading.
            let equal_chars = 2 * (start_ext + end_ext);
            let changed_chars = diff.seq1_range.len() + diff.seq2_range.len();
            if equal_chars < 2 * changed_chars {
                extended = SequenceDiff::new(
                    diff.seq1_range
                        .delta_start(-(start_ext as isize))
                        .delta_end(end_ext as isize),
                    diff.seq2_range
                        .delta_start(-(start_ext as isize))
                        .delta_end(end_ext as isize),
                );
            }
        }

        match result.last_mut() {
            Some(last)
                if last.seq1_range.intersects_or_touches(&extended.seq1_range)
                    || last.seq2_range.intersects_or_touches(&extended.seq2_range) =>
            {
                *last = last.join(&extended);
            }
            _ => result.push(extended),
        }
    }

    debug_assert_diffs_sorted(&result);
    result
}

/// Merge character-level diffs when the matching text between them is very
/// short and both neighbors are long; a tiny preserved fragment inside two
/// big rewrites is usually coincidence, not preserved structure.
pub fn remove_very_short_matching_text_between_long_diffs(
    seq1: &CharSequence,
    seq2: &CharSequence,
    diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    let mut diffs = diffs;
    if diffs.is_empty() {
        return diffs;
    }

    let mut counter = 0;
    loop {
        let mut should_repeat = false;
        let mut result: Vec<SequenceDiff> = vec![diffs[0]];
        for &cur in &diffs[1..] {
            let last = *result.last().unwrap();

            if should_join_long_diffs(seq1, seq2, &last, &cur) {
                should_repeat = true;
                *result.last_mut().unwrap() = last.join(&cur);
            } else {
                result.push(cur);
            }
        }
        diffs = result;

        counter += 1;
        if counter >= 10 || !should_repeat {
            break;
        }
    }

    debug_assert_diffs_sorted(&diffs);
    diffs
}

fn should_join_long_diffs(
    seq1: &CharSequence,
    seq2: &CharSequence,
    before: &SequenceDiff,
    after: &SequenceDiff,
) -> bool {
    let unchanged_range = OffsetRange::new(before.seq1_range.end, after.seq1_range.start);
    if seq1.count_lines_in(unchanged_range) > 5 || unchanged_range.len() > 500 {
        return false;
    }

    let unchanged_text = seq1.text(unchanged_range);
    let unchanged_text = unchanged_text.trim();
    if unchanged_text.chars().count() > 20 || unchanged_text.lines().count() > 1 {
        return false;
    }

    // Weigh each neighbor by a mix of its line and character extent, capped
    // so a single huge diff cannot dominate, and require the combination to
    // clear a high bar.
    let max = (2 * 40 + 50) as f64;
    let cap = |v: usize| (v as f64).min(max);
    let weigh = |diff: &SequenceDiff| {
        let v1 = cap(seq1.count_lines_in(diff.seq1_range) * 40 + diff.seq1_range.len());
        let v2 = cap(seq2.count_lines_in(diff.seq2_range) * 40 + diff.seq2_range.len());
        (v1.powf(1.5) + v2.powf(1.5)).powf(1.5)
    };

    weigh(before) + weigh(after) > (max.powf(1.5) * 2.0).powf(1.5) * 1.3
}
