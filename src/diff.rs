// SPDX-License-Identifier: MIT

//! Line- and character-level diffing of text documents.
//!
//! The entry point is [`compute_diff`], which aligns two documents given as
//! line arrays and reports the changed line blocks, each with exact
//! character-level inner ranges, plus optionally the blocks that were moved
//! rather than edited.

pub mod algorithm;
mod computer;
pub mod dynamic_programming;
pub mod heuristics;
pub mod line_range;
pub mod mapping;
pub mod moves;
pub mod myers;
pub mod offset_range;
pub mod position;
pub mod sequences;

pub use algorithm::{DiffAlgorithmResult, Sequence, SequenceDiff, Timeout};
pub use line_range::{LineRange, LineRangeSet};
pub use mapping::{
    DetailedLineRangeMapping, LineRangeMapping, MovedText, RangeMapping,
};
pub use offset_range::OffsetRange;
pub use position::{Position, Range};

use computer::LinesDiffComputer;

/// Knobs for [`compute_diff`].
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Treat lines that differ only in leading/trailing whitespace as equal.
    pub ignore_trim_whitespace: bool,
    /// Give up on a precise diff after this many milliseconds; 0 means no
    /// limit. A timed-out diff is still valid, just coarse.
    pub max_computation_time_ms: u64,
    /// Additionally detect blocks that were moved rather than edited.
    pub compute_moves: bool,
    /// Extend character diffs to camelCase sub-word boundaries as well as
    /// word boundaries.
    pub extend_to_subwords: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            ignore_trim_whitespace: true,
            max_computation_time_ms: 5000,
            compute_moves: false,
            extend_to_subwords: false,
        }
    }
}

/// The result of diffing two documents.
#[derive(Debug, Clone)]
pub struct LinesDiff {
    /// The changed blocks, sorted and non-touching, each covering at least
    /// one line on one side.
    pub changes: Vec<DetailedLineRangeMapping>,
    /// Moved blocks, if requested; sorted by original position.
    pub moves: Vec<MovedText>,
    /// True if the time budget ran out and the diff is coarser than it
    /// could be.
    pub hit_timeout: bool,
}

impl LinesDiff {
    pub fn new(
        changes: Vec<DetailedLineRangeMapping>,
        moves: Vec<MovedText>,
        hit_timeout: bool,
    ) -> Self {
        LinesDiff {
            changes,
            moves,
            hit_timeout,
        }
    }
}

/// Diff two documents given as arrays of lines (without line terminators).
///
/// Both inputs must be non-empty in the editor sense: an empty document is
/// one empty line.
pub fn compute_diff(
    original_lines: &[String],
    modified_lines: &[String],
    options: &DiffOptions,
) -> LinesDiff {
    LinesDiffComputer::compute_diff(original_lines, modified_lines, options)
}
