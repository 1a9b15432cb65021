//! Error types for parsing
//!
//! Every condition the parser can object to is a [`ParseError`] variant.
//! The same variants feed both entry points: document parsing returns the
//! first fatal one, editor parsing renders each into a diagnostic and
//! keeps going. [`ParseError::severity`] is the editor-side severity and
//! [`ParseError::is_fatal`] is the document-side verdict; the two are
//! independent, mixed indentation being the case where they disagree.
//!
//! Line numbers in rendered messages are 1-based even though ranges store
//! 0-based positions.

use std::fmt;

use crate::skein::diagnostics::DiagnosticSeverity;
use crate::skein::indentation::IndentFamily;
use crate::skein::range::Range;

/// Errors raised while structuring, typing or assembling a document.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A content line with no `:` separator.
    MissingColon { range: Range },
    /// A `:` with nothing before it, or a key that is all modifiers.
    EmptyKey { range: Range },
    /// A key containing characters outside ASCII.
    NonAsciiKey { key: String, range: Range },
    /// The file mixes tab and space indentation.
    MixedIndentation {
        expected: IndentFamily,
        found: IndentFamily,
        range: Range,
    },
    /// The same clean key appeared twice at one nesting level.
    DuplicateKey {
        key: String,
        range: Range,
        first_line: usize,
    },
    /// A key carries both an inline value and nested children.
    ScalarWithChildren { key: String, range: Range },
    /// A `[` multiline array that never reached its `]`.
    UnterminatedArray { key: String, range: Range },
    /// A line indented to a depth that matches no open scope.
    IndentMismatch { range: Range },
    /// A block-scoped key used at the document root.
    RootScopedKey { key: String, range: Range },
    /// A value that does not satisfy its type hint.
    HintMismatch {
        key: String,
        hint: String,
        range: Range,
    },
    /// A type hint name the parser does not know.
    UnknownHint { hint: String, range: Range },
    /// A panic caught inside the editor-mode parser.
    Internal { message: String },
}

impl ParseError {
    /// The range this error points at. Internal failures anchor to the
    /// document start.
    pub fn range(&self) -> Range {
        match self {
            ParseError::MissingColon { range }
            | ParseError::EmptyKey { range }
            | ParseError::NonAsciiKey { range, .. }
            | ParseError::MixedIndentation { range, .. }
            | ParseError::DuplicateKey { range, .. }
            | ParseError::ScalarWithChildren { range, .. }
            | ParseError::UnterminatedArray { range, .. }
            | ParseError::IndentMismatch { range }
            | ParseError::RootScopedKey { range, .. }
            | ParseError::HintMismatch { range, .. }
            | ParseError::UnknownHint { range, .. } => range.clone(),
            ParseError::Internal { .. } => Range::default(),
        }
    }

    /// Stable machine-readable code, used as the diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::MissingColon { .. } => "missing-colon",
            ParseError::EmptyKey { .. } => "empty-key",
            ParseError::NonAsciiKey { .. } => "non-ascii-key",
            ParseError::MixedIndentation { .. } => "mixed-indentation",
            ParseError::DuplicateKey { .. } => "duplicate-key",
            ParseError::ScalarWithChildren { .. } => "scalar-with-children",
            ParseError::UnterminatedArray { .. } => "unterminated-array",
            ParseError::IndentMismatch { .. } => "indent-mismatch",
            ParseError::RootScopedKey { .. } => "root-scoped-key",
            ParseError::HintMismatch { .. } => "hint-mismatch",
            ParseError::UnknownHint { .. } => "unknown-hint",
            ParseError::Internal { .. } => "internal",
        }
    }

    /// Severity when rendered as an editor diagnostic.
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            ParseError::MixedIndentation { .. } | ParseError::HintMismatch { .. } => {
                DiagnosticSeverity::Warning
            }
            ParseError::UnknownHint { .. } => DiagnosticSeverity::Hint,
            _ => DiagnosticSeverity::Error,
        }
    }

    /// Whether document-mode parsing must fail on this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ParseError::RootScopedKey { .. }
                | ParseError::HintMismatch { .. }
                | ParseError::UnknownHint { .. }
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Messages use 1-based line numbers.
        let line = self.range().start.line + 1;
        match self {
            ParseError::MissingColon { .. } => {
                write!(f, "line {} has no ':' separator", line)
            }
            ParseError::EmptyKey { .. } => {
                write!(f, "line {} has no key before ':'", line)
            }
            ParseError::NonAsciiKey { key, .. } => {
                write!(
                    f,
                    "key '{}' at line {} contains non-ASCII characters",
                    key, line
                )
            }
            ParseError::MixedIndentation {
                expected, found, ..
            } => {
                write!(
                    f,
                    "mixed indentation at line {}: file indents with {} but found {}",
                    line, expected, found
                )
            }
            ParseError::DuplicateKey {
                key, first_line, ..
            } => {
                write!(
                    f,
                    "duplicate key '{}' at line {} (first defined at line {})",
                    key,
                    line,
                    first_line + 1
                )
            }
            ParseError::ScalarWithChildren { key, .. } => {
                write!(
                    f,
                    "key '{}' at line {} has both an inline value and nested children",
                    key, line
                )
            }
            ParseError::UnterminatedArray { key, .. } => {
                write!(
                    f,
                    "array for key '{}' opened at line {} is never closed",
                    key, line
                )
            }
            ParseError::IndentMismatch { .. } => {
                write!(
                    f,
                    "indentation at line {} does not match any open scope",
                    line
                )
            }
            ParseError::RootScopedKey { key, .. } => {
                write!(
                    f,
                    "key '{}' at line {} is not allowed at the document root",
                    key, line
                )
            }
            ParseError::HintMismatch { key, hint, .. } => {
                write!(
                    f,
                    "value for key '{}' at line {} does not satisfy its '{}' hint",
                    key, line, hint
                )
            }
            ParseError::UnknownHint { hint, .. } => {
                write!(f, "unknown type hint '{}' at line {}", hint, line)
            }
            ParseError::Internal { message } => {
                write!(f, "internal parser failure: {}", message)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Type alias for parser results with boxed errors (reduces stack size)
pub type ParseResult<T> = Result<T, Box<ParseError>>;

/// Render the source lines around an error location.
///
/// The offending line carries a `>` marker, with up to two lines of
/// context on either side. Line numbers are 1-based.
pub fn source_context(source: &str, range: &Range) -> String {
    let focus = range.start.line;
    let first = focus.saturating_sub(2);
    let window = focus + 3 - first;

    let mut out = String::new();
    for (number, text) in source.lines().enumerate().skip(first).take(window) {
        let marker = if number == focus { '>' } else { ' ' };
        out.push_str(&format!("{} {:>4} | {}\n", marker, number + 1, text));
    }
    out
}
