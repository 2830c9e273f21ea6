// SPDX-License-Identifier: MIT

//! The generic sequence alignment contract shared by the dynamic programming
//! and Myers aligners: sequences addressed by offset, paired offset ranges as
//! the alignment unit, and a cooperative wall-clock budget.

use std::time::{Duration, Instant};

use crate::diff::offset_range::OffsetRange;

/// An index-addressable sequence to be aligned. Elements are small integers;
/// at the line level they are hashes of (trimmed) line text, at the character
/// level they are the characters themselves.
pub trait Sequence {
    fn len(&self) -> usize;

    fn get_element(&self, offset: usize) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Score for placing a diff boundary just before element `offset`
    /// (`offset` may equal `len()`). Higher is better; heuristics shift
    /// insertion and deletion diffs towards local maxima of this score.
    fn get_boundary_score(&self, _offset: usize) -> i32 {
        0
    }
}

/// A single correspondence unit of an alignment: the elements of
/// `seq1_range` were replaced by the elements of `seq2_range`. Either side
/// may be empty, representing a pure insertion or deletion.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SequenceDiff {
    pub seq1_range: OffsetRange,
    pub seq2_range: OffsetRange,
}

impl SequenceDiff {
    pub fn new(seq1_range: OffsetRange, seq2_range: OffsetRange) -> Self {
        Self {
            seq1_range,
            seq2_range,
        }
    }

    pub fn swapped(&self) -> Self {
        Self::new(self.seq2_range, self.seq1_range)
    }

    pub fn join(&self, other: &SequenceDiff) -> Self {
        Self::new(
            self.seq1_range.join(&other.seq1_range),
            self.seq2_range.join(&other.seq2_range),
        )
    }

    pub fn delta(&self, offset: isize) -> Self {
        Self::new(self.seq1_range.delta(offset), self.seq2_range.delta(offset))
    }

    /// The equal runs between and around the given sorted diffs, as paired
    /// ranges covering everything the diffs do not.
    pub fn invert(diffs: &[SequenceDiff], len1: usize, len2: usize) -> Vec<SequenceDiff> {
        let mut result = Vec::with_capacity(diffs.len() + 1);
        let mut pos1 = 0;
        let mut pos2 = 0;
        for diff in diffs {
            result.push(SequenceDiff::new(
                OffsetRange::new(pos1, diff.seq1_range.start),
                OffsetRange::new(pos2, diff.seq2_range.start),
            ));
            pos1 = diff.seq1_range.end;
            pos2 = diff.seq2_range.end;
        }
        result.push(SequenceDiff::new(
            OffsetRange::new(pos1, len1),
            OffsetRange::new(pos2, len2),
        ));
        result
    }
}

impl std::fmt::Debug for SequenceDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} <-> {:?}", self.seq1_range, self.seq2_range)
    }
}

/// Check that diffs are sorted and mutually non-overlapping on both sides.
/// This is a correctness net for the algorithms and heuristic passes; it
/// compiles to nothing in release builds.
pub fn debug_assert_diffs_sorted(diffs: &[SequenceDiff]) {
    if cfg!(debug_assertions) {
        for pair in diffs.windows(2) {
            assert!(
                pair[0].seq1_range.end <= pair[1].seq1_range.start
                    && pair[0].seq2_range.end <= pair[1].seq2_range.start,
                "unsorted or overlapping diffs: {:?} then {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

/// Cooperative wall-clock budget. Algorithms poll [`Timeout::is_valid`]
/// periodically in their inner loops and bail out with a best-effort result
/// when it expires. This is advisory self-throttling, not preemption.
#[derive(Clone, Copy, Debug)]
pub enum Timeout {
    Infinite,
    Deadline(Instant),
}

impl Timeout {
    /// A budget of 0 milliseconds disables the timeout entirely.
    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Timeout::Infinite
        } else {
            Timeout::Deadline(Instant::now() + Duration::from_millis(ms))
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Timeout::Infinite => true,
            Timeout::Deadline(deadline) => Instant::now() < *deadline,
        }
    }
}

/// Outcome of an alignment: diffs sorted by `seq1_range.start`, plus whether
/// the wall-clock budget expired. Timeout expiry is an expected outcome, not
/// an error; the result is always structurally valid.
#[derive(Clone, Debug)]
pub struct DiffAlgorithmResult {
    pub diffs: Vec<SequenceDiff>,
    pub hit_timeout: bool,
}

impl DiffAlgorithmResult {
    pub fn new(diffs: Vec<SequenceDiff>) -> Self {
        Self {
            diffs,
            hit_timeout: false,
        }
    }

    fn trivial_diffs(seq1: &dyn Sequence, seq2: &dyn Sequence) -> Vec<SequenceDiff> {
        let diff = SequenceDiff::new(
            OffsetRange::new(0, seq1.len()),
            OffsetRange::new(0, seq2.len()),
        );
        if diff.seq1_range.is_empty() && diff.seq2_range.is_empty() {
            Vec::new()
        } else {
            vec![diff]
        }
    }

    /// A whole-replace alignment, used as the degenerate answer for empty
    /// inputs.
    pub fn trivial(seq1: &dyn Sequence, seq2: &dyn Sequence) -> Self {
        Self {
            diffs: Self::trivial_diffs(seq1, seq2),
            hit_timeout: false,
        }
    }

    /// A whole-replace alignment returned when the budget expired before any
    /// useful work could be salvaged.
    pub fn trivial_timed_out(seq1: &dyn Sequence, seq2: &dyn Sequence) -> Self {
        Self {
            diffs: Self::trivial_diffs(seq1, seq2),
            hit_timeout: true,
        }
    }
}
