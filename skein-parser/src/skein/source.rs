//! Source preprocessing.
//!
//! Raw text goes through one cleaning pass before any structuring happens:
//! blank lines and full-line comments are dropped, and the surviving lines
//! keep a map back to their original line numbers so every later stage can
//! report positions against the file the user actually typed.
//!
//! Comment lines are not discarded entirely. Their spans are recorded so
//! the token-emitting parse can still paint them in an editor.

use crate::skein::range::Range;

/// Location of a stripped comment line in the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSpan {
    /// Original 0-based line number.
    pub line: usize,
    /// Column of the `#` that starts the comment.
    pub column: usize,
    /// Length of the comment text, trailing whitespace excluded.
    pub length: usize,
}

impl CommentSpan {
    pub fn range(&self) -> Range {
        Range::on_line(self.line, self.column, self.length)
    }
}

/// A cleaned source document.
///
/// Lines are stored verbatim minus the trailing newline (and carriage
/// return); indices into the cleaned list translate back to original line
/// numbers through [`SourceDocument::original_line`].
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    lines: Vec<String>,
    line_map: Vec<usize>,
    comments: Vec<CommentSpan>,
    total_lines: usize,
}

impl SourceDocument {
    /// Clean a raw source string.
    ///
    /// A line is a comment when its first non-whitespace character is `#`.
    /// A `#` that appears after a key or inside a value is ordinary text.
    pub fn new(source: &str) -> Self {
        let mut lines = Vec::new();
        let mut line_map = Vec::new();
        let mut comments = Vec::new();
        let mut total_lines = 0;

        for (number, raw) in source.lines().enumerate() {
            total_lines += 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = line.trim_start();

            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('#') {
                let column = line.len() - trimmed.len();
                comments.push(CommentSpan {
                    line: number,
                    column,
                    length: trimmed.trim_end().chars().count(),
                });
                continue;
            }

            lines.push(line.to_string());
            line_map.push(number);
        }

        Self {
            lines,
            line_map,
            comments,
            total_lines,
        }
    }

    /// Number of cleaned lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cleaned line text by cleaned index.
    pub fn line(&self, index: usize) -> &str {
        &self.lines[index]
    }

    /// Original 0-based line number for a cleaned index.
    pub fn original_line(&self, index: usize) -> usize {
        self.line_map[index]
    }

    /// Comment lines stripped during cleaning, in source order.
    pub fn comments(&self) -> &[CommentSpan] {
        &self.comments
    }

    /// Number of lines in the original source, before cleaning.
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Iterate over `(cleaned index, line text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().map(|(i, s)| (i, s.as_str()))
    }
}
