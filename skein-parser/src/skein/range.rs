//! Position and range tracking for source locations
//!
//! The parser is line oriented: every location it reports is a line/column
//! pair in the *original* source, before blank and comment lines were
//! stripped. Lines and columns are both 0-based; user-facing messages add
//! one to the line when they render it.
//!
//! A [`Range`] is half open: `end` sits one column past the last covered
//! character, which is also the shape LSP ranges expect. Ranges never
//! cross a line boundary in practice (keys, values and fragments all live
//! on a single line), but the type does not forbid it.

use std::fmt;

use serde::Serialize;

/// A 0-based line/column location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// A half-open span between two positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A range covering `length` columns of a single line.
    pub fn on_line(line: usize, column: usize, length: usize) -> Self {
        Self::new(
            Position::new(line, column),
            Position::new(line, column + length),
        )
    }

    /// A zero-width range at the start of a line.
    pub fn at_line(line: usize) -> Self {
        Self::on_line(line, 0, 0)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(Position::default(), Position::default())
    }
}
