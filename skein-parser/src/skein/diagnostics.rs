//! Diagnostic collection for LSP and CLI consumption
//!
//! This module provides structured error and warning information that can
//! be consumed by LSP implementations and by the command line tools.
//!
//! Two producers feed it:
//!
//! - [`DiagnosticFormatter`] renders the parser's own [`ParseError`]s
//! - [`scrape_legacy_report`] recovers positions from the free-text output
//!   of older validators that never learned structured reporting
//!
//! The scraper is best effort: it looks for `at line N` and
//! `line N:` patterns, a quoted key to refine the column, and a severity
//! keyword. Report lines without a recognizable line number are dropped.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::skein::error::ParseError;
use crate::skein::range::Range;

/// Severity ladder, ordered so that `Error` sorts first.
///
/// The four levels are the LSP ones; the CLI renders them in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// One finding against a document, with a position and a stable code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub code: Option<String>,
    pub source: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: String) -> Self {
        Self {
            range,
            severity,
            message,
            code: None,
            source: "skein".to_string(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at {}:{}",
            self.severity,
            self.source,
            self.message,
            self.range.start.line + 1,
            self.range.start.column + 1
        )
    }
}

/// Renders [`ParseError`]s into [`Diagnostic`]s.
pub struct DiagnosticFormatter;

impl DiagnosticFormatter {
    /// Render one error. The message is the error's display form, the code
    /// its stable code, and the severity its editor-mode severity.
    pub fn render(error: &ParseError) -> Diagnostic {
        let diagnostic = Diagnostic::new(error.range(), error.severity(), error.to_string())
            .with_code(error.code());
        match error {
            ParseError::Internal { .. } => diagnostic.with_source("skein-internal"),
            _ => diagnostic,
        }
    }

    /// Render a batch, sorted by position with errors before advisories at
    /// equal positions.
    pub fn render_all(errors: &[ParseError]) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = errors.iter().map(Self::render).collect();
        diagnostics.sort_by(|a, b| {
            a.range
                .start
                .cmp(&b.range.start)
                .then(a.severity.cmp(&b.severity))
        });
        diagnostics
    }
}

static LINE_AT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bat line (\d+)\b").unwrap());
static LINE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bline (\d+):").unwrap());
static QUOTED_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"'([^']+)'").unwrap());

/// Scrape diagnostics out of a legacy validator's free-text report.
///
/// Each report line is inspected independently. A line number is taken
/// from `at line N` first, then from `line N:`; both are 1-based in the
/// report. When the original source is provided and the report line quotes
/// a key, the column is refined to the key's position on that source line.
pub fn scrape_legacy_report(report: &str, source: Option<&str>) -> Vec<Diagnostic> {
    let source_lines: Vec<&str> = source.map(|s| s.lines().collect()).unwrap_or_default();
    let mut diagnostics = Vec::new();

    for report_line in report.lines() {
        let message = report_line.trim();
        if message.is_empty() {
            continue;
        }

        let number = LINE_AT
            .captures(message)
            .or_else(|| LINE_PREFIX.captures(message))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<usize>().ok());
        let Some(number) = number else {
            continue;
        };
        let line = number.saturating_sub(1);

        let key = QUOTED_KEY
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        let range = match key.and_then(|k| locate_key(&source_lines, line, k)) {
            Some((column, length)) => Range::on_line(line, column, length),
            None => Range::at_line(line),
        };

        diagnostics.push(
            Diagnostic::new(range, scrape_severity(message), message.to_string())
                .with_source("legacy"),
        );
    }

    diagnostics
}

fn locate_key(source_lines: &[&str], line: usize, key: &str) -> Option<(usize, usize)> {
    let text = source_lines.get(line)?;
    let byte_offset = text.find(key)?;
    let column = text[..byte_offset].chars().count();
    Some((column, key.chars().count()))
}

fn scrape_severity(message: &str) -> DiagnosticSeverity {
    let lower = message.to_ascii_lowercase();
    if lower.contains("warning") {
        DiagnosticSeverity::Warning
    } else if lower.contains("hint") || lower.contains("note") {
        DiagnosticSeverity::Hint
    } else if lower.contains("info") {
        DiagnosticSeverity::Information
    } else {
        DiagnosticSeverity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skein::range::Position;

    #[test]
    fn test_builders_fill_code_and_source() {
        let diag = Diagnostic::new(
            Range::on_line(4, 2, 5),
            DiagnosticSeverity::Warning,
            "value looks odd".to_string(),
        )
        .with_code("odd-value");

        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert_eq!(diag.code.as_deref(), Some("odd-value"));
        assert_eq!(diag.source, "skein");
        assert_eq!(diag.to_string(), "warning [skein]: value looks odd at 5:3");
    }

    #[test]
    fn test_render_carries_code_and_severity() {
        let error = ParseError::DuplicateKey {
            key: "name".to_string(),
            range: Range::on_line(1, 0, 4),
            first_line: 0,
        };
        let diag = DiagnosticFormatter::render(&error);

        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.code.as_deref(), Some("duplicate-key"));
        assert_eq!(diag.source, "skein");
        assert!(diag.message.contains("duplicate key 'name'"));
    }

    #[test]
    fn test_internal_errors_get_their_own_source() {
        let error = ParseError::Internal {
            message: "boom".to_string(),
        };
        let diag = DiagnosticFormatter::render(&error);
        assert_eq!(diag.source, "skein-internal");
    }

    #[test]
    fn test_render_all_sorts_by_position() {
        let errors = vec![
            ParseError::MissingColon {
                range: Range::at_line(5),
            },
            ParseError::MissingColon {
                range: Range::at_line(1),
            },
        ];
        let diagnostics = DiagnosticFormatter::render_all(&errors);
        assert_eq!(diagnostics[0].range.start.line, 1);
        assert_eq!(diagnostics[1].range.start.line, 5);
    }

    #[test]
    fn test_scrape_at_line_pattern() {
        let report = "ERROR: unexpected value at line 12";
        let diags = scrape_legacy_report(report, None);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start.line, 11);
        assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
        assert_eq!(diags[0].source, "legacy");
    }

    #[test]
    fn test_scrape_line_prefix_pattern() {
        let report = "warning: line 3: value looks stale";
        let diags = scrape_legacy_report(report, None);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start.line, 2);
        assert_eq!(diags[0].severity, DiagnosticSeverity::Warning);
    }

    #[test]
    fn test_scrape_refines_column_from_quoted_key() {
        let source = "name: api\nport: 8080\n";
        let report = "invalid key 'port' at line 2";
        let diags = scrape_legacy_report(report, Some(source));

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start, Position::new(1, 0));
        assert_eq!(diags[0].range.end, Position::new(1, 4));
    }

    #[test]
    fn test_scrape_quoted_key_missing_from_source() {
        let source = "name: api\n";
        let report = "invalid key 'gone' at line 1";
        let diags = scrape_legacy_report(report, Some(source));

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range, Range::at_line(0));
    }

    #[test]
    fn test_scrape_skips_unlocatable_lines() {
        let report = "validation finished\n2 problems found\nerror at line 4";
        let diags = scrape_legacy_report(report, None);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start.line, 3);
    }

    #[test]
    fn test_scrape_severity_keywords() {
        let report = "note: line 1: consider a hint\nINFO line 2: something\nline 3: broken";
        let diags = scrape_legacy_report(report, None);

        assert_eq!(diags[0].severity, DiagnosticSeverity::Hint);
        assert_eq!(diags[1].severity, DiagnosticSeverity::Information);
        assert_eq!(diags[2].severity, DiagnosticSeverity::Error);
    }
}
