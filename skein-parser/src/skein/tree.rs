//! Nested tree assembly.
//!
//! The second structural pass folds a flat run of [`StructuredLine`]s into
//! a [`ParsedValue::Map`] by indent. A line one step deeper than its
//! predecessor starts that key's child scope; a line back at an ancestor's
//! indent closes every scope in between. The builder is flavor blind:
//! classification never reaches here and the same tree comes out of both
//! parse modes.
//!
//! Duplicate clean keys at one level are an error, except the UI shorthand
//! element names, which are expected to repeat: those get stable `__dupN`
//! suffixes (`link`, `link__dup2`, `link__dup3`) in source order.
//!
//! The builder never fails. Lines it cannot place are reported and either
//! skipped or adopted into the nearest open scope, so the editor path
//! always gets a tree; document parsing turns any reported error into a
//! failure afterwards.

use std::collections::HashMap;

use crate::skein::classify::tables::SHORTHAND_ELEMENTS;
use crate::skein::error::ParseError;
use crate::skein::lines::{has_children, MultilineKind, StructuredLine};
use crate::skein::range::Range;
use crate::skein::typing;
use crate::skein::value::{Entries, ParsedValue};

/// One open mapping scope and its duplicate-key bookkeeping.
#[derive(Default)]
struct Level {
    entries: Entries,
    first_lines: HashMap<String, usize>,
    shorthand_counts: HashMap<String, usize>,
}

/// Builds the value tree out of structured lines.
pub struct NestedTreeBuilder<'a> {
    lines: &'a [StructuredLine],
    errors: Vec<ParseError>,
}

impl<'a> NestedTreeBuilder<'a> {
    pub fn new(lines: &'a [StructuredLine]) -> Self {
        Self {
            lines,
            errors: Vec::new(),
        }
    }

    /// Assemble the whole document. Always returns a map, possibly empty.
    pub fn build(mut self) -> (ParsedValue, Vec<ParseError>) {
        let mut root = Level::default();
        let mut pos = 0;

        while pos < self.lines.len() {
            let indent = self.lines[pos].indent;
            if pos > 0 {
                // Shallower than the document root: no scope can hold it,
                // adopt it into the root.
                self.errors.push(ParseError::IndentMismatch {
                    range: self.lines[pos].key_range(),
                });
            }
            self.fill_level(&mut root, &mut pos, indent);
        }

        (ParsedValue::Map(root.entries), self.errors)
    }

    /// Consume lines belonging to one scope at `indent`.
    ///
    /// Returns when a shallower line closes the scope. A deeper line with
    /// no parent key is reported and adopted as a sibling.
    fn fill_level(&mut self, level: &mut Level, pos: &mut usize, indent: usize) {
        let lines = self.lines;

        while *pos < lines.len() {
            let line = &lines[*pos];
            if line.indent < indent {
                return;
            }
            if line.indent > indent {
                self.errors.push(ParseError::IndentMismatch {
                    range: line.key_range(),
                });
            }

            let index = *pos;
            *pos += 1;

            let parts = line.key_parts();
            if parts.name.is_empty() {
                self.errors.push(ParseError::EmptyKey {
                    range: line.key_range(),
                });
                if has_children(lines, index) {
                    let child_indent = lines[*pos].indent;
                    let mut scratch = Level::default();
                    self.fill_level(&mut scratch, pos, child_indent);
                }
                continue;
            }

            if typing::validate_ascii(&parts.name).is_some() {
                self.errors.push(ParseError::NonAsciiKey {
                    key: parts.name.clone(),
                    range: line.key_range(),
                });
            }
            if let (Some(hint), None) = (&parts.hint, parts.hint_target()) {
                self.errors.push(ParseError::UnknownHint {
                    hint: hint.clone(),
                    range: Range::on_line(
                        line.line,
                        line.key_column + parts.hint_offset.unwrap_or(0),
                        hint.chars().count(),
                    ),
                });
            }

            let value = match line.multiline {
                MultilineKind::StringBlock => ParsedValue::String(line.joined_fragments()),
                MultilineKind::Array | MultilineKind::DashList => ParsedValue::Array(
                    line.fragments
                        .iter()
                        .map(|fragment| typing::detect_scalar(&fragment.text))
                        .collect(),
                ),
                MultilineKind::None => {
                    if has_children(lines, index) {
                        if line.has_inline_value() {
                            self.errors.push(ParseError::ScalarWithChildren {
                                key: parts.name.clone(),
                                range: line.key_range(),
                            });
                        }
                        let child_indent = lines[*pos].indent;
                        let mut child = Level::default();
                        self.fill_level(&mut child, pos, child_indent);
                        ParsedValue::Map(child.entries)
                    } else if !line.has_inline_value() {
                        ParsedValue::Null
                    } else {
                        let (value, hint_ok) =
                            typing::typed_value(&line.raw_value, parts.hint.as_deref());
                        if !hint_ok {
                            self.errors.push(ParseError::HintMismatch {
                                key: parts.name.clone(),
                                hint: parts.hint.clone().unwrap_or_default(),
                                range: Range::on_line(
                                    line.line,
                                    line.value_column,
                                    line.raw_value.chars().count(),
                                ),
                            });
                        }
                        value
                    }
                }
            };

            self.insert(level, parts.name, value, line);
        }
    }

    /// Insert honoring the duplicate-key policy.
    fn insert(&mut self, level: &mut Level, name: String, value: ParsedValue, line: &StructuredLine) {
        if SHORTHAND_ELEMENTS.contains(name.as_str()) {
            let count = level.shorthand_counts.entry(name.clone()).or_insert(0);
            *count += 1;
            let key = if *count == 1 {
                name
            } else {
                format!("{}__dup{}", name, count)
            };
            level.entries.insert(key, value);
            return;
        }

        if let Some(&first) = level.first_lines.get(&name) {
            self.errors.push(ParseError::DuplicateKey {
                key: name,
                range: line.key_range(),
                first_line: first,
            });
            return;
        }

        level.first_lines.insert(name.clone(), line.line);
        level.entries.insert(name, value);
    }
}
