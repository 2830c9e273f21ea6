// SPDX-License-Identifier: MIT

//! Moved-block detection: find blocks of deleted lines that reappear
//! elsewhere as insertions. The detector works on the finished line-level
//! changes and the per-line hashes, reusing the line aligner to judge how
//! well two blocks match. It is purely additive: detected moves annotate the
//! result, they never alter the ordinary changes.

use crate::diff::algorithm::{Sequence, Timeout};
use crate::diff::line_range::LineRange;
use crate::diff::mapping::{DetailedLineRangeMapping, LineRangeMapping};
use crate::diff::myers::compute_myers_diff;

/// Blocks shorter than this are never reported as moves; tiny blocks (a
/// lone brace, a blank line) relocate by coincidence all the time.
const MIN_MOVED_LINES: u32 = 3;

/// Fraction of lines of a fuzzy pair that must match.
const MIN_SIMILARITY: f64 = 0.90;

/// Beyond this many candidate pairs only the exact phase runs; the fuzzy
/// phase would be quadratic in the number of changes.
const MAX_FUZZY_PAIRS: usize = 10_000;

struct HashSlice<'a>(&'a [u32]);

impl<'a> Sequence for HashSlice<'a> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn get_element(&self, offset: usize) -> u32 {
        self.0[offset]
    }
}

#[derive(Clone, Copy)]
struct Candidate {
    change_index: usize,
    range: LineRange,
}

fn hash_slice<'a>(hashes: &'a [u32], range: &LineRange) -> &'a [u32] {
    &hashes[range.start_line_number as usize - 1..range.end_line_number_exclusive as usize - 1]
}

/// Detect moved blocks among the given changes.
///
/// Deleted candidates are the original sides of changes, inserted candidates
/// the modified sides; a pair from the same change is by definition an
/// in-place edit, not a move. Pairs matching exactly by line hash are taken
/// first; remaining pairs are scored with the line aligner and accepted
/// greedily by similarity.
pub fn compute_moved_lines(
    changes: &[DetailedLineRangeMapping],
    original_hashes: &[u32],
    modified_hashes: &[u32],
    timeout: Timeout,
) -> Vec<LineRangeMapping> {
    let deletions: Vec<Candidate> = changes
        .iter()
        .enumerate()
        .filter(|(_, change)| change.original.length() >= MIN_MOVED_LINES)
        .map(|(change_index, change)| Candidate {
            change_index,
            range: change.original,
        })
        .collect();
    let insertions: Vec<Candidate> = changes
        .iter()
        .enumerate()
        .filter(|(_, change)| change.modified.length() >= MIN_MOVED_LINES)
        .map(|(change_index, change)| Candidate {
            change_index,
            range: change.modified,
        })
        .collect();

    let mut moves: Vec<LineRangeMapping> = Vec::new();
    let mut deletion_used = vec![false; deletions.len()];
    let mut insertion_used = vec![false; insertions.len()];

    // Exact phase: identical hash sequences.
    for (del_idx, deletion) in deletions.iter().enumerate() {
        if !timeout.is_valid() {
            return moves;
        }
        for (ins_idx, insertion) in insertions.iter().enumerate() {
            if insertion_used[ins_idx]
                || deletion.change_index == insertion.change_index
                || deletion.range.length() != insertion.range.length()
            {
                continue;
            }
            if hash_slice(original_hashes, &deletion.range)
                == hash_slice(modified_hashes, &insertion.range)
            {
                moves.push(LineRangeMapping::new(deletion.range, insertion.range));
                deletion_used[del_idx] = true;
                insertion_used[ins_idx] = true;
                break;
            }
        }
    }

    // Fuzzy phase: align the hash sequences and accept the most similar
    // pairings first.
    let open_pairs = deletion_used.iter().filter(|used| !**used).count()
        * insertion_used.iter().filter(|used| !**used).count();
    if open_pairs <= MAX_FUZZY_PAIRS {
        let mut scored: Vec<(f64, usize, usize)> = Vec::new();
        for (del_idx, deletion) in deletions.iter().enumerate() {
            if deletion_used[del_idx] {
                continue;
            }
            for (ins_idx, insertion) in insertions.iter().enumerate() {
                if insertion_used[ins_idx] || deletion.change_index == insertion.change_index {
                    continue;
                }
                if !timeout.is_valid() {
                    break;
                }

                let seq1 = HashSlice(hash_slice(original_hashes, &deletion.range));
                let seq2 = HashSlice(hash_slice(modified_hashes, &insertion.range));
                let result = compute_myers_diff(&seq1, &seq2, timeout);
                if result.hit_timeout {
                    continue;
                }

                let changed: usize = result
                    .diffs
                    .iter()
                    .map(|diff| diff.seq1_range.len() + diff.seq2_range.len())
                    .sum();
                let total = seq1.len() + seq2.len();
                let similarity = 1.0 - changed as f64 / total as f64;
                if similarity >= MIN_SIMILARITY {
                    scored.push((similarity, del_idx, ins_idx));
                }
            }
        }

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
        for (_similarity, del_idx, ins_idx) in scored {
            if deletion_used[del_idx] || insertion_used[ins_idx] {
                continue;
            }
            deletion_used[del_idx] = true;
            insertion_used[ins_idx] = true;

            #[cfg(feature = "debug-diff")]
            println!(
                "move: {} -> {} (similarity {:.2})",
                deletions[del_idx].range, insertions[ins_idx].range, _similarity
            );

            moves.push(LineRangeMapping::new(
                deletions[del_idx].range,
                insertions[ins_idx].range,
            ));
        }
    }

    moves.sort_by_key(|mapping| mapping.original.start_line_number);
    moves
}
