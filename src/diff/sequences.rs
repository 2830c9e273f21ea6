// SPDX-License-Identifier: MIT

//! Concrete [`Sequence`] implementations: whole documents as sequences of
//! hashed lines, and slices of a document as sequences of characters.

use crate::diff::algorithm::Sequence;
use crate::diff::offset_range::OffsetRange;
use crate::diff::position::{Position, Range};

/// A document as a sequence of line hashes. Equal (trimmed) line text maps
/// to equal elements, so the aligners compare lines in O(1).
pub struct LineSequence<'a> {
    trimmed_hashes: Vec<u32>,
    lines: &'a [String],
}

impl<'a> LineSequence<'a> {
    pub fn new(trimmed_hashes: Vec<u32>, lines: &'a [String]) -> Self {
        assert!(trimmed_hashes.len() == lines.len());
        Self {
            trimmed_hashes,
            lines,
        }
    }

    pub fn lines(&self) -> &[String] {
        self.lines
    }
}

impl<'a> Sequence for LineSequence<'a> {
    fn len(&self) -> usize {
        self.lines.len()
    }

    fn get_element(&self, offset: usize) -> u32 {
        self.trimmed_hashes[offset]
    }

    /// Prefer diff boundaries next to lines with little indentation; those
    /// tend to be scope boundaries in source code.
    fn get_boundary_score(&self, offset: usize) -> i32 {
        let indentation_before = if offset == 0 {
            0
        } else {
            leading_whitespace_len(&self.lines[offset - 1])
        };
        let indentation_after = if offset == self.lines.len() {
            0
        } else {
            leading_whitespace_len(&self.lines[offset])
        };
        1000 - (indentation_before + indentation_after) as i32
    }
}

fn leading_whitespace_len(line: &str) -> usize {
    line.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// Character category used for boundary scoring. Diff boundaries are shifted
/// towards transitions between categories, with separators and line breaks
/// the most attractive.
#[derive(Clone, Copy, PartialEq, Eq)]
enum CharCategory {
    WordLower,
    WordUpper,
    WordNumber,
    End,
    Other,
    Separator,
    Space,
    LineBreak,
}

fn char_category(ch: Option<char>) -> CharCategory {
    match ch {
        None => CharCategory::End,
        Some(ch) if ch == '\n' || ch == '\r' => CharCategory::LineBreak,
        Some(ch) if ch.is_whitespace() => CharCategory::Space,
        Some(ch) if ch.is_lowercase() => CharCategory::WordLower,
        Some(ch) if ch.is_uppercase() => CharCategory::WordUpper,
        Some(ch) if ch.is_numeric() => CharCategory::WordNumber,
        Some(ch) if ch == ',' || ch == ';' => CharCategory::Separator,
        Some(_) => CharCategory::Other,
    }
}

fn category_score(category: CharCategory) -> i32 {
    match category {
        CharCategory::WordLower | CharCategory::WordUpper | CharCategory::WordNumber => 0,
        CharCategory::End => 10,
        CharCategory::Other => 2,
        CharCategory::Separator => 30,
        CharCategory::Space => 3,
        CharCategory::LineBreak => 10,
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// How a pair of character slices sits relative to the text around them.
/// Both slices of a refinement must be built with the same context so their
/// newline structure lines up element for element; a lone newline on one
/// side would let the alignment leak past the paired lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SliceContext {
    /// Both slices have lines after them; each covered line carries its
    /// trailing newline.
    FollowedByText,
    /// Both slices reach their document's end; the newline preceding the
    /// slice stands in for the missing trailing one.
    AtDocumentEnd,
    /// One slice reaches its document's end and the other does not; no
    /// newline beyond the slices' own lines is included.
    Mixed,
}

impl SliceContext {
    pub fn for_ranges(
        range1: OffsetRange,
        len1: usize,
        range2: OffsetRange,
        len2: usize,
    ) -> Self {
        match (range1.end == len1, range2.end == len2) {
            (false, false) => SliceContext::FollowedByText,
            (true, true) => SliceContext::AtDocumentEnd,
            _ => SliceContext::Mixed,
        }
    }
}

/// A contiguous run of lines flattened into a character sequence. Keeps
/// enough bookkeeping to translate element offsets back into 1-based
/// line/column positions, including the amount of leading whitespace dropped
/// per line when whitespace is ignored.
///
/// Which newlines the slice owns is decided by the [`SliceContext`] of the
/// slice pair: mid-document slices carry each covered line's trailing
/// newline, slices at the document end carry the newline of the line
/// preceding them instead. Text inserted or deleted at the very end of a
/// document thereby owns the newline that joins it to the rest, which is
/// what lets such edits translate back to empty line ranges on the
/// untouched side.
pub struct CharSequence {
    elements: Vec<char>,
    /// 0-based index of the first line covered.
    first_line_index: usize,
    /// Element offset of each covered line's first character. May hold one
    /// trailing sentinel entry for the line right after the covered range.
    first_element_offset_by_line: Vec<usize>,
    /// Leading whitespace chars dropped from each covered line.
    trimmed_ws_by_line: Vec<usize>,
    /// Where element 0 points when it is the newline of the line preceding
    /// the covered range.
    prefix_position: Option<Position>,
    /// Position reported for any offset when the covered line range is
    /// empty (e.g. the insertion point of a pure insertion).
    empty_fallback: Position,
}

impl CharSequence {
    /// Flatten `lines[line_range]`. When `consider_whitespace` is false,
    /// leading and trailing whitespace of every line is excluded from the
    /// sequence (but still accounted for in position translation).
    pub fn new(
        lines: &[String],
        line_range: OffsetRange,
        consider_whitespace: bool,
        context: SliceContext,
    ) -> Self {
        assert!(line_range.end <= lines.len());

        let visible = |line: &str| -> (String, usize) {
            if consider_whitespace {
                (line.to_string(), 0)
            } else {
                let trimmed = line.trim_start();
                let ws = line.chars().count() - trimmed.chars().count();
                (trimmed.trim_end().to_string(), ws)
            }
        };

        let mut elements = Vec::new();
        let mut first_element_offset_by_line = Vec::with_capacity(line_range.len() + 1);
        let mut trimmed_ws_by_line = Vec::with_capacity(line_range.len());

        let mut prefix_position = None;
        if context == SliceContext::AtDocumentEnd && !line_range.is_empty() && line_range.start > 0
        {
            // The slice reaches the document end: it owns the newline that
            // separates it from the preceding line.
            elements.push('\n');
            let (content, ws) = visible(&lines[line_range.start - 1]);
            prefix_position = Some(Position::new(
                line_range.start as u32,
                (1 + ws + content.chars().count()) as u32,
            ));
        }

        for line_index in line_range.iter() {
            let (content, trimmed_ws) = visible(&lines[line_index]);

            first_element_offset_by_line.push(elements.len());
            trimmed_ws_by_line.push(trimmed_ws);
            elements.extend(content.chars());
            if line_index + 1 < line_range.end || context == SliceContext::FollowedByText {
                elements.push('\n');
            }
        }
        if !line_range.is_empty() && context == SliceContext::FollowedByText {
            // The offset just past the final newline belongs to the first
            // line after the range.
            first_element_offset_by_line.push(elements.len());
        }

        let empty_fallback = if line_range.start < lines.len() {
            Position::new(line_range.start as u32 + 1, 1)
        } else {
            // Insertion point past the last line: anchor at the end of the
            // document instead of an out-of-bounds line number.
            let (content, ws) = lines
                .last()
                .map(|l| visible(l))
                .unwrap_or((String::new(), 0));
            Position::new(
                lines.len().max(1) as u32,
                (1 + ws + content.chars().count()) as u32,
            )
        };

        Self {
            elements,
            first_line_index: line_range.start,
            first_element_offset_by_line,
            trimmed_ws_by_line,
            prefix_position,
            empty_fallback,
        }
    }

    pub fn text(&self, range: OffsetRange) -> String {
        self.elements[range.start..range.end].iter().collect()
    }

    /// Translate an element offset into a document position. With
    /// `prefer_line_start`, an offset at the very beginning of a line maps to
    /// column 1 even if leading whitespace was trimmed; this is the right
    /// choice for exclusive range ends.
    pub fn translate_offset(&self, offset: usize, prefer_line_start: bool) -> Position {
        if self.first_element_offset_by_line.is_empty() {
            return self.empty_fallback;
        }
        if offset == 0 {
            if let Some(prefix) = self.prefix_position {
                return prefix;
            }
        }
        let line_idx = self
            .first_element_offset_by_line
            .partition_point(|&first| first <= offset)
            - 1;
        let line_offset = offset - self.first_element_offset_by_line[line_idx];
        let column = if line_offset == 0 && prefer_line_start {
            1
        } else {
            1 + line_offset + self.trimmed_ws_by_line.get(line_idx).copied().unwrap_or(0)
        };
        Position::new(
            (self.first_line_index + line_idx) as u32 + 1,
            column as u32,
        )
    }

    pub fn translate_range(&self, range: OffsetRange) -> Range {
        let start = self.translate_offset(range.start, false);
        let end = self.translate_offset(range.end, true);
        if end < start {
            // A range ending right at a trimmed line start can translate to
            // a collapsed position pair.
            Range::new(end, end)
        } else {
            Range::new(start, end)
        }
    }

    /// The word (maximal alphanumeric run) containing the given offset.
    pub fn find_word_containing(&self, offset: usize) -> Option<OffsetRange> {
        if offset >= self.elements.len() || !is_word_char(self.elements[offset]) {
            return None;
        }

        let mut start = offset;
        while start > 0 && is_word_char(self.elements[start - 1]) {
            start -= 1;
        }
        let mut end = offset + 1;
        while end < self.elements.len() && is_word_char(self.elements[end]) {
            end += 1;
        }
        Some(OffsetRange::new(start, end))
    }

    /// Like [`Self::find_word_containing`], but camel-case transitions also
    /// end a sub-word.
    pub fn find_subword_containing(&self, offset: usize) -> Option<OffsetRange> {
        if offset >= self.elements.len() || !is_word_char(self.elements[offset]) {
            return None;
        }

        let subword_boundary = |idx: usize| {
            // A boundary before an uppercase char following a non-uppercase
            // one: "fooBar" splits between "foo" and "Bar".
            self.elements[idx].is_uppercase() && !self.elements[idx - 1].is_uppercase()
        };

        let mut start = offset;
        while start > 0 && is_word_char(self.elements[start - 1]) && !subword_boundary(start) {
            start -= 1;
        }
        let mut end = offset + 1;
        while end < self.elements.len()
            && is_word_char(self.elements[end])
            && !subword_boundary(end)
        {
            end += 1;
        }
        Some(OffsetRange::new(start, end))
    }

    /// The number of line breaks inside the range.
    pub fn count_lines_in(&self, range: OffsetRange) -> usize {
        self.elements[range.start..range.end]
            .iter()
            .filter(|&&ch| ch == '\n')
            .count()
    }
}

impl Sequence for CharSequence {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn get_element(&self, offset: usize) -> u32 {
        self.elements[offset] as u32
    }

    fn get_boundary_score(&self, offset: usize) -> i32 {
        let prev = char_category(offset.checked_sub(1).map(|idx| self.elements[idx]));
        let next = char_category(self.elements.get(offset).copied());

        let mut score = 0;
        if prev != next {
            score += 10;
            if prev == CharCategory::WordLower && next == CharCategory::WordUpper {
                score += 1;
            }
        }
        score += category_score(prev);
        score += category_score(next);
        score
    }
}
