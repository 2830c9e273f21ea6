// SPDX-License-Identifier: MIT

//! Greedy O(ND) aligner after Myers' "An O(ND) Difference Algorithm and Its
//! Variations" (1986). Used above the size thresholds where the dynamic
//! programming table would be too expensive. Paths are reconstructed from a
//! snake arena rather than from the furthest-reaching frontier history.

use crate::diff::algorithm::{
    debug_assert_diffs_sorted, DiffAlgorithmResult, Sequence, SequenceDiff, Timeout,
};
use crate::diff::offset_range::OffsetRange;

#[derive(Clone, Copy)]
struct Snake {
    prev: Option<u32>,
    x: usize,
    y: usize,
    length: usize,
}

/// Frontier storage addressed by diagonal `k` in `-(len2) ..= len1`.
struct Frontier<T> {
    offset: usize,
    data: Vec<T>,
}

impl<T: Copy> Frontier<T> {
    fn new(len1: usize, len2: usize, fill: T) -> Self {
        let max = len1 + len2;
        Self {
            offset: max + 1,
            data: vec![fill; 2 * max + 3],
        }
    }

    fn get(&self, k: isize) -> T {
        self.data[(k + self.offset as isize) as usize]
    }

    fn set(&mut self, k: isize, value: T) {
        self.data[(k + self.offset as isize) as usize] = value;
    }
}

/// Compute a minimal alignment of the two sequences.
pub fn compute_myers_diff(
    seq1: &dyn Sequence,
    seq2: &dyn Sequence,
    timeout: Timeout,
) -> DiffAlgorithmResult {
    if seq1.is_empty() || seq2.is_empty() {
        return DiffAlgorithmResult::trivial(seq1, seq2);
    }

    let len1 = seq1.len();
    let len2 = seq2.len();
    let max_steps = len1 + len2;

    let mut arena: Vec<Snake> = Vec::new();
    // Furthest-reaching x per diagonal, and the snake chain that got there.
    let mut frontier_x: Frontier<usize> = Frontier::new(len1, len2, 0);
    let mut frontier_path: Frontier<Option<u32>> = Frontier::new(len1, len2, None);

    let mut end_path: Option<u32> = None;
    let mut poll_counter = 0usize;
    'search: for d in 0..=max_steps as isize {
        if !timeout.is_valid() {
            return DiffAlgorithmResult::trivial_timed_out(seq1, seq2);
        }

        let mut k = -d;
        while k <= d {
            poll_counter += 1;
            if poll_counter % 4096 == 0 && !timeout.is_valid() {
                return DiffAlgorithmResult::trivial_timed_out(seq1, seq2);
            }
            // Step right from k-1 or down from k+1, whichever reaches
            // further.
            let (mut x, mut path) =
                if k == -d || (k != d && frontier_x.get(k - 1) < frontier_x.get(k + 1)) {
                    (frontier_x.get(k + 1), frontier_path.get(k + 1))
                } else {
                    (frontier_x.get(k - 1) + 1, frontier_path.get(k - 1))
                };
            let mut y = (x as isize - k) as usize;

            // Follow the snake of equal elements.
            let snake_start_x = x;
            let snake_start_y = y;
            while x < len1 && y < len2 && seq1.get_element(x) == seq2.get_element(y) {
                x += 1;
                y += 1;
            }
            if x > snake_start_x {
                arena.push(Snake {
                    prev: path,
                    x: snake_start_x,
                    y: snake_start_y,
                    length: x - snake_start_x,
                });
                path = Some(arena.len() as u32 - 1);
            }

            frontier_x.set(k, x);
            frontier_path.set(k, path);

            if x >= len1 && y >= len2 {
                end_path = path;
                #[cfg(feature = "debug-diff")]
                println!("myers: d={} snakes={}", d, arena.len());
                break 'search;
            }

            k += 2;
        }
    }

    // Collect the matched snakes front to back and emit the gaps between
    // them as diffs.
    let mut snakes: Vec<Snake> = Vec::new();
    let mut current = end_path;
    while let Some(idx) = current {
        let snake = arena[idx as usize];
        snakes.push(snake);
        current = snake.prev;
    }
    snakes.reverse();

    let mut diffs: Vec<SequenceDiff> = Vec::new();
    let mut pos1 = 0;
    let mut pos2 = 0;
    for snake in &snakes {
        if snake.x > pos1 || snake.y > pos2 {
            diffs.push(SequenceDiff::new(
                OffsetRange::new(pos1, snake.x),
                OffsetRange::new(pos2, snake.y),
            ));
        }
        pos1 = snake.x + snake.length;
        pos2 = snake.y + snake.length;
    }
    if pos1 < len1 || pos2 < len2 {
        diffs.push(SequenceDiff::new(
            OffsetRange::new(pos1, len1),
            OffsetRange::new(pos2, len2),
        ));
    }

    debug_assert_diffs_sorted(&diffs);
    DiffAlgorithmResult::new(diffs)
}
