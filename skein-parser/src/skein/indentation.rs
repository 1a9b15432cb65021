//! Indentation consistency checking.
//!
//! A skein file must pick one indentation character and stick to it. The
//! checker scans the leading whitespace of every cleaned line; the first
//! character that disagrees with the established family is reported and
//! the scan stops there. Document parsing treats the report as fatal,
//! editor parsing downgrades it to a warning and keeps going.

use std::fmt;

use crate::skein::error::ParseError;
use crate::skein::range::Range;
use crate::skein::source::SourceDocument;

/// Which whitespace character a file indents with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentFamily {
    Spaces,
    Tabs,
}

impl fmt::Display for IndentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentFamily::Spaces => write!(f, "spaces"),
            IndentFamily::Tabs => write!(f, "tabs"),
        }
    }
}

/// Count of leading indentation characters in a line.
///
/// Spaces and tabs are both single-column here; whether they may coexist
/// is the checker's business, not the counter's.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|ch| *ch == ' ' || *ch == '\t').count()
}

pub struct IndentationConsistencyChecker;

impl IndentationConsistencyChecker {
    /// Scan a cleaned document for mixed indentation.
    ///
    /// The first indentation character in the file establishes the
    /// family; the first character of the other family anywhere in any
    /// leading run produces the report. One report per document.
    pub fn check(doc: &SourceDocument) -> Option<ParseError> {
        let mut family: Option<IndentFamily> = None;

        for (index, line) in doc.iter() {
            for (column, ch) in line.char_indices() {
                let found = match ch {
                    ' ' => IndentFamily::Spaces,
                    '\t' => IndentFamily::Tabs,
                    _ => break,
                };

                match family {
                    None => family = Some(found),
                    Some(expected) if expected != found => {
                        return Some(ParseError::MixedIndentation {
                            expected,
                            found,
                            range: Range::on_line(doc.original_line(index), column, 1),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_width() {
        assert_eq!(indent_width("key: value"), 0);
        assert_eq!(indent_width("  key: value"), 2);
        assert_eq!(indent_width("\tkey: value"), 1);
        assert_eq!(indent_width("\t\t  "), 4);
    }

    #[test]
    fn test_pure_spaces_pass() {
        let doc = SourceDocument::new("server:\n  host: localhost\n    port: 8080\n");
        assert!(IndentationConsistencyChecker::check(&doc).is_none());
    }

    #[test]
    fn test_pure_tabs_pass() {
        let doc = SourceDocument::new("server:\n\thost: localhost\n\t\tport: 8080\n");
        assert!(IndentationConsistencyChecker::check(&doc).is_none());
    }

    #[test]
    fn test_tab_line_in_space_file() {
        let doc = SourceDocument::new("server:\n  host: localhost\n\tport: 8080\n");
        let error = IndentationConsistencyChecker::check(&doc).unwrap();
        match error {
            ParseError::MixedIndentation {
                expected,
                found,
                range,
            } => {
                assert_eq!(expected, IndentFamily::Spaces);
                assert_eq!(found, IndentFamily::Tabs);
                assert_eq!(range.start.line, 2);
                assert_eq!(range.start.column, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mixing_within_one_line() {
        let doc = SourceDocument::new("server:\n \thost: localhost\n");
        let error = IndentationConsistencyChecker::check(&doc).unwrap();
        match error {
            ParseError::MixedIndentation { found, range, .. } => {
                assert_eq!(found, IndentFamily::Tabs);
                assert_eq!(range.start.line, 1);
                assert_eq!(range.start.column, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_report_uses_original_line_numbers() {
        let doc = SourceDocument::new("# comment\n\nserver:\n  a: 1\n\tb: 2\n");
        let error = IndentationConsistencyChecker::check(&doc).unwrap();
        assert_eq!(error.range().start.line, 4);
    }

    #[test]
    fn test_unindented_file_passes() {
        let doc = SourceDocument::new("a: 1\nb: 2\n");
        assert!(IndentationConsistencyChecker::check(&doc).is_none());
    }
}
