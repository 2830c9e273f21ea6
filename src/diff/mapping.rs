// SPDX-License-Identifier: MIT

//! The result vocabulary of the diff engine: character-granular range
//! mappings, line-level change blocks with inner changes, and moved blocks.

use crate::diff::line_range::LineRange;
use crate::diff::position::Range;

/// A character-granular correspondence: `original_range` was replaced by
/// `modified_range`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RangeMapping {
    pub original_range: Range,
    pub modified_range: Range,
}

impl RangeMapping {
    pub fn new(original_range: Range, modified_range: Range) -> Self {
        Self {
            original_range,
            modified_range,
        }
    }
}

impl std::fmt::Debug for RangeMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {:?}", self.original_range, self.modified_range)
    }
}

/// A pair of corresponding line ranges.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LineRangeMapping {
    pub original: LineRange,
    pub modified: LineRange,
}

impl LineRangeMapping {
    pub fn new(original: LineRange, modified: LineRange) -> Self {
        Self { original, modified }
    }
}

impl std::fmt::Debug for LineRangeMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {:?}", self.original, self.modified)
    }
}

/// One top-level change block: a pair of corresponding line ranges plus the
/// character-level sub-diffs inside it. `inner_changes` is `None` when the
/// block was not character-refined (e.g. when the refinement timed out).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailedLineRangeMapping {
    pub original: LineRange,
    pub modified: LineRange,
    pub inner_changes: Option<Vec<RangeMapping>>,
}

impl DetailedLineRangeMapping {
    pub fn new(
        original: LineRange,
        modified: LineRange,
        inner_changes: Option<Vec<RangeMapping>>,
    ) -> Self {
        Self {
            original,
            modified,
            inner_changes,
        }
    }
}

/// A block of lines deleted from the original and reinserted elsewhere in
/// the modified text, detected as relocated rather than edited in place.
#[derive(Clone, Debug)]
pub struct MovedText {
    pub line_range_mapping: LineRangeMapping,
    /// The character-level changes within the moved block, in the
    /// coordinates of the two documents.
    pub changes: Vec<DetailedLineRangeMapping>,
}

impl MovedText {
    pub fn new(line_range_mapping: LineRangeMapping, changes: Vec<DetailedLineRangeMapping>) -> Self {
        Self {
            line_range_mapping,
            changes,
        }
    }
}

/// Convert a character mapping to the line ranges it affects.
///
/// Two adjustments keep the line ranges tight: a mapping that ends at column
/// 1 on both sides does not actually modify its final line, and a mapping
/// that starts at the very end of a line on both sides only modifies
/// subsequent lines.
pub fn get_line_range_mapping(
    mapping: &RangeMapping,
    original_lines: &[String],
    modified_lines: &[String],
) -> LineRangeMapping {
    let original = &mapping.original_range;
    let modified = &mapping.modified_range;

    let mut line_start_delta = 0i32;
    let mut line_end_delta = 0i32;

    // A mapping ending at column 1 on both sides leaves its final line
    // untouched.
    if modified.end.column == 1 && original.end.column == 1 {
        line_end_delta = -1;
    }

    let line_char_len = |lines: &[String], line_number: u32| {
        lines[line_number as usize - 1].chars().count() as u32
    };
    if modified.start.column > line_char_len(modified_lines, modified.start.line_number)
        && original.start.column > line_char_len(original_lines, original.start.line_number)
        && (original.start.line_number as i32) < original.end.line_number as i32 + line_end_delta + 1
        && (modified.start.line_number as i32) < modified.end.line_number as i32 + line_end_delta + 1
    {
        line_start_delta = 1;
    }

    LineRangeMapping::new(
        LineRange::new(
            original
                .start
                .line_number
                .checked_add_signed(line_start_delta)
                .unwrap(),
            original
                .end
                .line_number
                .checked_add_signed(1 + line_end_delta)
                .unwrap(),
        ),
        LineRange::new(
            modified
                .start
                .line_number
                .checked_add_signed(line_start_delta)
                .unwrap(),
            modified
                .end
                .line_number
                .checked_add_signed(1 + line_end_delta)
                .unwrap(),
        ),
    )
}

/// Group character mappings into line-level change blocks: consecutive
/// mappings whose line ranges overlap or touch on either side belong to the
/// same block.
pub fn line_range_mapping_from_range_mappings(
    alignments: &[RangeMapping],
    original_lines: &[String],
    modified_lines: &[String],
) -> Vec<DetailedLineRangeMapping> {
    if cfg!(debug_assertions) {
        for pair in alignments.windows(2) {
            assert!(
                pair[0].original_range.end <= pair[1].original_range.start
                    && pair[0].modified_range.end <= pair[1].modified_range.start,
                "unsorted or overlapping mappings: {:?} then {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    let mut changes: Vec<DetailedLineRangeMapping> = Vec::new();

    for mapping in alignments {
        let line_mapping = get_line_range_mapping(mapping, original_lines, modified_lines);

        match changes.last_mut() {
            Some(last)
                if last.original.touches(&line_mapping.original)
                    || last.modified.touches(&line_mapping.modified) =>
            {
                last.original = last.original.join(&line_mapping.original);
                last.modified = last.modified.join(&line_mapping.modified);
                last.inner_changes.as_mut().unwrap().push(*mapping);
            }
            _ => changes.push(DetailedLineRangeMapping::new(
                line_mapping.original,
                line_mapping.modified,
                Some(vec![*mapping]),
            )),
        }
    }

    changes
}
