// SPDX-License-Identifier: MIT

//! Half-open ranges of 0-based offsets. These are the working coordinates of
//! the generic alignment algorithms, before translation back into 1-based
//! line numbers and line/column positions.

/// A half-open range `[start, end)` of 0-based offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetRange {
    pub start: usize,
    pub end: usize,
}

impl OffsetRange {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "invalid offset range [{},{})", start, end);
        Self { start, end }
    }

    pub fn empty_at(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn of_length(start: usize, length: usize) -> Self {
        Self::new(start, start + length)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Shift both endpoints by `offset`.
    pub fn delta(&self, offset: isize) -> Self {
        Self::new(
            self.start.checked_add_signed(offset).unwrap(),
            self.end.checked_add_signed(offset).unwrap(),
        )
    }

    pub fn delta_start(&self, offset: isize) -> Self {
        Self::new(self.start.checked_add_signed(offset).unwrap(), self.end)
    }

    pub fn delta_end(&self, offset: isize) -> Self {
        Self::new(self.start, self.end.checked_add_signed(offset).unwrap())
    }

    /// The smallest range containing both `self` and `other`. This is a join
    /// of bounds and may span a gap between the two.
    pub fn join(&self, other: &OffsetRange) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The overlapping part of the two ranges. Touching ranges yield an empty
    /// range at the shared boundary; disjoint ranges yield `None`.
    pub fn intersect(&self, other: &OffsetRange) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &OffsetRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn intersects_or_touches(&self, other: &OffsetRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.start..self.end
    }
}

impl std::fmt::Debug for OffsetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl std::fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
