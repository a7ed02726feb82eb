//! Source text positions and ranges.

use std::fmt;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// Get 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// Index for converting byte offsets into line/column positions.
///
/// Used for text that has no syntax tree of its own, such as the body of a
/// documentation comment.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let line_start = self.line_starts[line];
        let col = offset - line_start;

        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Ranges of `range` within the indexed text.
    pub fn ranges(&self, range: TextRange) -> Ranges {
        Ranges::new(range, self.line_col(range.start()), self.line_col(range.end()))
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    /// Check if there are no lines (never true: empty text has one line).
    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}

/// A `{start, end}` pair along one axis (rows or columns).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Row and column extent of a node.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub row: Span,
    pub column: Span,
}

impl Location {
    pub const fn new(start: LineCol, end: LineCol) -> Self {
        Self {
            row: Span::new(start.line, end.line),
            column: Span::new(start.col, end.col),
        }
    }

    pub const fn start(&self) -> LineCol {
        LineCol::new(self.row.start, self.column.start)
    }

    pub const fn end(&self) -> LineCol {
        LineCol::new(self.row.end, self.column.end)
    }
}

/// Both range representations of a node: byte offsets and row/column.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ranges {
    pub position: TextRange,
    pub location: Location,
}

impl Ranges {
    pub fn new(position: TextRange, start: LineCol, end: LineCol) -> Self {
        Self {
            position,
            location: Location::new(start, end),
        }
    }

    /// Re-express these ranges in the coordinate space whose origin is
    /// `offset`: every coordinate is added to the offset's start coordinate.
    pub fn shifted(self, offset: &Ranges) -> Self {
        let origin = offset.position.start();
        let row = offset.location.row.start;
        let col = offset.location.column.start;
        Self {
            position: self.position + origin,
            location: Location {
                row: Span::new(row + self.location.row.start, row + self.location.row.end),
                column: Span::new(
                    col + self.location.column.start,
                    col + self.location.column.end,
                ),
            },
        }
    }

    /// Place ranges measured inside a text into the file holding that text
    /// at `origin`. Only positions on the text's first row start at the
    /// origin column; later rows keep their own columns.
    pub fn placed_in(self, origin: &Ranges) -> Self {
        let row = origin.location.row.start;
        let col = origin.location.column.start;
        let place = |pos: LineCol| {
            let col = if pos.line == 0 { col + pos.col } else { pos.col };
            LineCol::new(row + pos.line, col)
        };
        Self::new(
            self.position + origin.position.start(),
            place(self.location.start()),
            place(self.location.end()),
        )
    }
}
