// SPDX-License-Identifier: MIT

//! Quadratic dynamic programming aligner. Produces qualitatively better
//! diffs than the greedy aligner because match scores can express
//! preferences (e.g. favoring non-blank line matches), but the O(n·m) table
//! restricts it to small inputs.

use crate::diff::algorithm::{
    debug_assert_diffs_sorted, DiffAlgorithmResult, Sequence, SequenceDiff, Timeout,
};
use crate::diff::offset_range::OffsetRange;

/// How often the inner loop polls the timeout, in table cells.
const TIMEOUT_POLL_INTERVAL: usize = 4096;

struct Array2<T> {
    width: usize,
    data: Vec<T>,
}

impl<T: Copy> Array2<T> {
    fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            data: vec![fill; width * height],
        }
    }

    fn get(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    fn set(&mut self, x: usize, y: usize, value: T) {
        self.data[y * self.width + x] = value;
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Diagonal,
    Left,
    Up,
}

/// Compute a maximum-score alignment of the two sequences.
///
/// `score` rates a match of `seq1[offset1]` with `seq2[offset2]`; when absent
/// every match counts 1. The returned diffs are the unmatched regions.
pub fn compute_dynamic_programming_diff(
    seq1: &dyn Sequence,
    seq2: &dyn Sequence,
    timeout: Timeout,
    score: Option<&dyn Fn(usize, usize) -> f64>,
) -> DiffAlgorithmResult {
    if seq1.is_empty() || seq2.is_empty() {
        return DiffAlgorithmResult::trivial(seq1, seq2);
    }

    let len1 = seq1.len();
    let len2 = seq2.len();

    let mut lengths: Array2<f64> = Array2::new(len1, len2, 0.0);
    let mut directions: Array2<Direction> = Array2::new(len1, len2, Direction::Diagonal);

    let mut poll_counter = 0usize;
    for offset2 in 0..len2 {
        for offset1 in 0..len1 {
            poll_counter += 1;
            if poll_counter % TIMEOUT_POLL_INTERVAL == 0 && !timeout.is_valid() {
                return DiffAlgorithmResult::trivial_timed_out(seq1, seq2);
            }

            let left = if offset1 == 0 {
                0.0
            } else {
                lengths.get(offset1 - 1, offset2)
            };
            let up = if offset2 == 0 {
                0.0
            } else {
                lengths.get(offset1, offset2 - 1)
            };

            let matched = if seq1.get_element(offset1) == seq2.get_element(offset2) {
                let diagonal = if offset1 == 0 || offset2 == 0 {
                    0.0
                } else {
                    lengths.get(offset1 - 1, offset2 - 1)
                };
                let match_score = match score {
                    Some(score) => score(offset1, offset2),
                    None => 1.0,
                };
                Some(diagonal + match_score)
            } else {
                None
            };

            let (best, direction) = match matched {
                Some(diag) if diag >= left && diag >= up => (diag, Direction::Diagonal),
                _ => {
                    if left >= up {
                        (left, Direction::Left)
                    } else {
                        (up, Direction::Up)
                    }
                }
            };

            lengths.set(offset1, offset2, best);
            directions.set(offset1, offset2, direction);
        }
    }

    // Backtrace, emitting the changed regions between diagonal steps.
    let mut diffs: Vec<SequenceDiff> = Vec::new();
    let mut last_aligned1 = len1;
    let mut last_aligned2 = len2;
    let mut offset1 = len1 as isize - 1;
    let mut offset2 = len2 as isize - 1;

    let mut report = |offset1: isize, offset2: isize, last1: usize, last2: usize| {
        let start1 = (offset1 + 1) as usize;
        let start2 = (offset2 + 1) as usize;
        if start1 != last1 || start2 != last2 {
            diffs.push(SequenceDiff::new(
                OffsetRange::new(start1, last1),
                OffsetRange::new(start2, last2),
            ));
        }
    };

    while offset1 >= 0 && offset2 >= 0 {
        match directions.get(offset1 as usize, offset2 as usize) {
            Direction::Diagonal => {
                report(offset1, offset2, last_aligned1, last_aligned2);
                last_aligned1 = offset1 as usize;
                last_aligned2 = offset2 as usize;
                offset1 -= 1;
                offset2 -= 1;
            }
            Direction::Left => offset1 -= 1,
            Direction::Up => offset2 -= 1,
        }
    }
    report(-1, -1, last_aligned1, last_aligned2);

    diffs.reverse();
    #[cfg(feature = "debug-diff")]
    println!("dp: {}x{} table, {} diffs", len1, len2, diffs.len());
    debug_assert_diffs_sorted(&diffs);
    DiffAlgorithmResult::new(diffs)
}
