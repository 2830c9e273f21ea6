// SPDX-License-Identifier: MIT

//! Ranges of 1-based line numbers and normalized sets thereof.

use crate::diff::offset_range::OffsetRange;

/// A half-open range of 1-based line numbers: `start_line_number` is
/// inclusive, `end_line_number_exclusive` is exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start_line_number: u32,
    pub end_line_number_exclusive: u32,
}

impl LineRange {
    pub fn new(start_line_number: u32, end_line_number_exclusive: u32) -> Self {
        assert!(
            start_line_number >= 1 && start_line_number <= end_line_number_exclusive,
            "invalid line range [{},{})",
            start_line_number,
            end_line_number_exclusive
        );
        Self {
            start_line_number,
            end_line_number_exclusive,
        }
    }

    pub fn of_length(start_line_number: u32, length: u32) -> Self {
        Self::new(start_line_number, start_line_number + length)
    }

    pub fn length(&self) -> u32 {
        self.end_line_number_exclusive - self.start_line_number
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    pub fn contains(&self, line_number: u32) -> bool {
        self.start_line_number <= line_number && line_number < self.end_line_number_exclusive
    }

    /// Shift the whole range by `offset` lines.
    pub fn delta(&self, offset: i32) -> Self {
        Self::new(
            self.start_line_number.checked_add_signed(offset).unwrap(),
            self.end_line_number_exclusive
                .checked_add_signed(offset)
                .unwrap(),
        )
    }

    /// Grow the range by a margin on either side, clamped to line 1.
    pub fn add_margin(&self, margin_before: u32, margin_after: u32) -> Self {
        Self::new(
            self.start_line_number.saturating_sub(margin_before).max(1),
            self.end_line_number_exclusive + margin_after,
        )
    }

    /// The smallest range containing both `self` and `other`. This joins the
    /// bounds and may span a gap between the two.
    pub fn join(&self, other: &LineRange) -> Self {
        Self::new(
            self.start_line_number.min(other.start_line_number),
            self.end_line_number_exclusive
                .max(other.end_line_number_exclusive),
        )
    }

    /// The overlapping part of the two ranges.
    ///
    /// Ranges that merely touch yield a valid empty range at the shared
    /// boundary; ranges that do not even touch yield `None`. The distinction
    /// matters to callers deciding whether two changes can be merged.
    pub fn intersect(&self, other: &LineRange) -> Option<LineRange> {
        let start = self.start_line_number.max(other.start_line_number);
        let end = self
            .end_line_number_exclusive
            .min(other.end_line_number_exclusive);
        if start <= end {
            Some(LineRange::new(start, end))
        } else {
            None
        }
    }

    pub fn overlaps(&self, other: &LineRange) -> bool {
        self.start_line_number < other.end_line_number_exclusive
            && other.start_line_number < self.end_line_number_exclusive
    }

    pub fn touches(&self, other: &LineRange) -> bool {
        self.start_line_number <= other.end_line_number_exclusive
            && other.start_line_number <= self.end_line_number_exclusive
    }

    /// The number of lines separating the two ranges; 0 if they overlap or
    /// touch.
    pub fn distance_to_range(&self, other: &LineRange) -> u32 {
        other
            .start_line_number
            .saturating_sub(self.end_line_number_exclusive)
            .max(
                self.start_line_number
                    .saturating_sub(other.end_line_number_exclusive),
            )
    }

    /// The number of lines separating the range from `line_number`; 0 if the
    /// range contains or touches the line.
    pub fn distance_to_line(&self, line_number: u32) -> u32 {
        self.distance_to_range(&LineRange::new(line_number, line_number + 1))
    }

    /// The portion(s) of `self` not covered by `other`: zero, one or two
    /// ranges whose union with `other ∩ self` reconstructs `self` exactly.
    pub fn subtract(&self, other: &LineRange) -> Vec<LineRange> {
        let mut result = Vec::new();
        if !self.overlaps(other) {
            if !self.is_empty() {
                result.push(*self);
            }
            return result;
        }
        if self.start_line_number < other.start_line_number {
            result.push(LineRange::new(
                self.start_line_number,
                other.start_line_number,
            ));
        }
        if other.end_line_number_exclusive < self.end_line_number_exclusive {
            result.push(LineRange::new(
                other.end_line_number_exclusive,
                self.end_line_number_exclusive,
            ));
        }
        result
    }

    /// Join a non-empty collection of ranges into the smallest range
    /// containing all of them.
    pub fn join_many<I: IntoIterator<Item = LineRange>>(ranges: I) -> LineRange {
        let mut iter = ranges.into_iter();
        let first = iter.next().expect("join_many on empty range collection");
        iter.fold(first, |acc, range| acc.join(&range))
    }

    /// Union several collections of ranges into a disjoint, sorted list.
    pub fn union_many<I, J>(range_lists: I) -> Vec<LineRange>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = LineRange>,
    {
        let mut set = LineRangeSet::new();
        for list in range_lists {
            for range in list {
                set.add_range(range);
            }
        }
        set.ranges
    }

    /// Translate to 0-based line indices, for slicing into a line array.
    pub fn to_offset_range(&self) -> OffsetRange {
        OffsetRange::new(
            self.start_line_number as usize - 1,
            self.end_line_number_exclusive as usize - 1,
        )
    }

    pub fn from_offset_range(range: &OffsetRange) -> Self {
        Self::new(range.start as u32 + 1, range.end as u32 + 1)
    }

    /// Iterate over the contained line numbers.
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.start_line_number..self.end_line_number_exclusive
    }
}

impl std::fmt::Debug for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{})",
            self.start_line_number, self.end_line_number_exclusive
        )
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{})",
            self.start_line_number, self.end_line_number_exclusive
        )
    }
}

/// A normalized set of lines, stored as ranges that are sorted, mutually
/// non-overlapping, and never touching (touching ranges are merged on
/// insertion).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineRangeSet {
    ranges: Vec<LineRange>,
}

impl LineRangeSet {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Construct from ranges that are already sorted, disjoint and
    /// non-touching.
    pub fn from_normalized_ranges(ranges: Vec<LineRange>) -> Self {
        for pair in ranges.windows(2) {
            assert!(pair[0].end_line_number_exclusive < pair[1].start_line_number);
        }
        Self { ranges }
    }

    pub fn ranges(&self) -> &[LineRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Insert a range, merging it with every existing entry it overlaps or
    /// touches.
    pub fn add_range(&mut self, range: LineRange) {
        if range.is_empty() {
            return;
        }

        // The window of entries that overlap or touch the incoming range.
        // Entries are sorted and disjoint, so both probes are monotonic.
        let begin = self
            .ranges
            .partition_point(|r| r.end_line_number_exclusive < range.start_line_number);
        let end = begin
            + self.ranges[begin..]
                .partition_point(|r| r.start_line_number <= range.end_line_number_exclusive);

        if begin == end {
            self.ranges.insert(begin, range);
        } else {
            let merged = LineRange::new(
                range.start_line_number.min(self.ranges[begin].start_line_number),
                range
                    .end_line_number_exclusive
                    .max(self.ranges[end - 1].end_line_number_exclusive),
            );
            self.ranges.splice(begin..end, [merged]);
        }
    }

    pub fn contains(&self, line_number: u32) -> bool {
        let idx = self
            .ranges
            .partition_point(|r| r.end_line_number_exclusive <= line_number);
        self.ranges
            .get(idx)
            .map(|r| r.contains(line_number))
            .unwrap_or(false)
    }

    pub fn intersects(&self, range: &LineRange) -> bool {
        let idx = self
            .ranges
            .partition_point(|r| r.end_line_number_exclusive <= range.start_line_number);
        self.ranges
            .get(idx)
            .map(|r| r.overlaps(range))
            .unwrap_or(false)
    }

    /// Merge-walk union of two normalized sets.
    pub fn get_union(&self, other: &LineRangeSet) -> LineRangeSet {
        let mut result: Vec<LineRange> = Vec::new();
        let mut i1 = self.ranges.iter().peekable();
        let mut i2 = other.ranges.iter().peekable();

        loop {
            let next = match (i1.peek(), i2.peek()) {
                (Some(r1), Some(r2)) => {
                    if r1.start_line_number <= r2.start_line_number {
                        *i1.next().unwrap()
                    } else {
                        *i2.next().unwrap()
                    }
                }
                (Some(_), None) => *i1.next().unwrap(),
                (None, Some(_)) => *i2.next().unwrap(),
                (None, None) => break,
            };

            match result.last_mut() {
                Some(last) if last.touches(&next) => *last = last.join(&next),
                _ => result.push(next),
            }
        }

        LineRangeSet { ranges: result }
    }

    /// Merge-walk intersection of two normalized sets, advancing whichever
    /// range ends first and emitting non-empty overlaps.
    pub fn get_intersection(&self, other: &LineRangeSet) -> LineRangeSet {
        let mut result = Vec::new();
        let mut idx1 = 0;
        let mut idx2 = 0;

        while idx1 < self.ranges.len() && idx2 < other.ranges.len() {
            let r1 = &self.ranges[idx1];
            let r2 = &other.ranges[idx2];

            if let Some(overlap) = r1.intersect(r2) {
                if !overlap.is_empty() {
                    result.push(overlap);
                }
            }

            if r1.end_line_number_exclusive <= r2.end_line_number_exclusive {
                idx1 += 1;
            } else {
                idx2 += 1;
            }
        }

        LineRangeSet { ranges: result }
    }

    /// The parts of `range` not covered by any range in the set.
    pub fn subtract_from(&self, range: &LineRange) -> LineRangeSet {
        let mut result = Vec::new();
        let mut current = range.start_line_number;

        for r in &self.ranges {
            if r.end_line_number_exclusive <= current {
                continue;
            }
            if r.start_line_number >= range.end_line_number_exclusive {
                break;
            }
            if r.start_line_number > current {
                result.push(LineRange::new(current, r.start_line_number));
            }
            current = current.max(r.end_line_number_exclusive);
        }
        if current < range.end_line_number_exclusive {
            result.push(LineRange::new(current, range.end_line_number_exclusive));
        }

        LineRangeSet { ranges: result }
    }
}
