// SPDX-License-Identifier: MIT

/// A position in a document. Both line number and column are 1-based; a
/// column of `len + 1` addresses the end of the line.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line_number: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line_number: u32, column: u32) -> Self {
        assert!(line_number >= 1 && column >= 1);
        Self {
            line_number,
            column,
        }
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line_number, self.column)
    }
}

/// A range between two [`Position`]s, with an exclusive end.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        assert!(start <= end, "invalid range {:?}-{:?}", start, end);
        Self { start, end }
    }

    pub fn from_parts(
        start_line_number: u32,
        start_column: u32,
        end_line_number: u32,
        end_column: u32,
    ) -> Self {
        Self::new(
            Position::new(start_line_number, start_column),
            Position::new(end_line_number, end_column),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn join(&self, other: &Range) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl std::fmt::Debug for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}-{:?}]", self.start, self.end)
    }
}
