//! Style linting.
//!
//! A second diagnostic surface next to the parser's own errors: purely
//! stylistic findings that never affect the tree. The linter reads the
//! raw source text, not the cleaned document, so it can see the trailing
//! whitespace and blank-line padding the cleaner throws away.
//!
//! Rules:
//! - trailing whitespace on any line (Information);
//! - space indentation that is not a multiple of the configured unit
//!   (Warning);
//! - an indent step deeper than one unit (Warning);
//! - tabs and spaces mixed across the document (Error). The first
//!   indentation character in the file picks the family and the first
//!   character of the other family is flagged, once.
//!
//! Comment lines keep their trailing-whitespace check but are exempt from
//! the indentation rules; aligning a comment oddly is not a structural
//! statement.

use serde::Deserialize;

use crate::skein::diagnostics::{Diagnostic, DiagnosticSeverity};
use crate::skein::indentation::{indent_width, IndentFamily};
use crate::skein::range::Range;

/// Source tag on every lint diagnostic.
const LINT_SOURCE: &str = "skein-lint";

fn default_indent_unit() -> usize {
    2
}

/// Linter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LintOptions {
    /// Spaces per indentation level. Tab-indented files always step by
    /// one tab.
    #[serde(default = "default_indent_unit")]
    pub indent_unit: usize,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            indent_unit: default_indent_unit(),
        }
    }
}

/// Style checker over raw source text.
pub struct Linter {
    options: LintOptions,
}

impl Linter {
    pub fn new(options: LintOptions) -> Self {
        Self { options }
    }

    /// Lint a whole document. Findings come back in line order.
    pub fn lint(&self, source: &str) -> Vec<Diagnostic> {
        // A zero unit would mean remainder by zero; treat it as 1.
        let unit = self.options.indent_unit.max(1);
        let mut diagnostics = Vec::new();
        let mut family: Option<IndentFamily> = None;
        let mut mixed_reported = false;
        let mut previous_indent: Option<usize> = None;

        for (number, raw) in source.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            if let Some(diagnostic) = trailing_whitespace(number, line) {
                diagnostics.push(diagnostic);
            }

            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let indent = indent_width(line);
            let leading = &line[..indent];

            for (column, ch) in leading.char_indices() {
                let found = if ch == '\t' {
                    IndentFamily::Tabs
                } else {
                    IndentFamily::Spaces
                };
                match family {
                    None => family = Some(found),
                    Some(expected) if expected != found => {
                        if !mixed_reported {
                            mixed_reported = true;
                            diagnostics.push(
                                Diagnostic::new(
                                    Range::on_line(number, column, 1),
                                    DiagnosticSeverity::Error,
                                    format!(
                                        "file indents with {} but line {} uses {}",
                                        expected,
                                        number + 1,
                                        found
                                    ),
                                )
                                .with_code("mixed-indentation")
                                .with_source(LINT_SOURCE),
                            );
                        }
                    }
                    Some(_) => {}
                }
            }

            let pure_spaces = !leading.contains('\t');
            if pure_spaces && indent % unit != 0 {
                diagnostics.push(
                    Diagnostic::new(
                        Range::on_line(number, 0, indent),
                        DiagnosticSeverity::Warning,
                        format!(
                            "indentation of {} spaces is not a multiple of {}",
                            indent, unit
                        ),
                    )
                    .with_code("indent-unit")
                    .with_source(LINT_SOURCE),
                );
            }

            let step = match family {
                Some(IndentFamily::Tabs) => 1,
                _ => unit,
            };
            if let Some(previous) = previous_indent {
                if indent > previous + step {
                    diagnostics.push(
                        Diagnostic::new(
                            Range::on_line(number, 0, indent),
                            DiagnosticSeverity::Warning,
                            format!(
                                "indentation jumps more than one level (from {} to {})",
                                previous, indent
                            ),
                        )
                        .with_code("indent-jump")
                        .with_source(LINT_SOURCE),
                    );
                }
            }
            previous_indent = Some(indent);
        }

        diagnostics
    }
}

fn trailing_whitespace(number: usize, line: &str) -> Option<Diagnostic> {
    let trimmed = line.trim_end();
    if trimmed.len() == line.len() || line.is_empty() {
        return None;
    }
    let column = trimmed.chars().count();
    let length = line.chars().count() - column;
    Some(
        Diagnostic::new(
            Range::on_line(number, column, length),
            DiagnosticSeverity::Information,
            "trailing whitespace".to_string(),
        )
        .with_code("trailing-whitespace")
        .with_source(LINT_SOURCE),
    )
}
