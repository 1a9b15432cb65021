//! Line structuring and multiline collection.
//!
//! The first structural pass walks the cleaned document and turns every
//! line into a [`StructuredLine`]: indent, raw key, raw inline value and
//! the columns of each piece. Lines that continue a multiline value are
//! folded into their owning key line here, so everything downstream (tree
//! assembly and token emission alike) sees one entry per logical value.
//!
//! Three collectors exist, tried in this order:
//!
//! 1. A string-ish type hint on a key with no inline value collects every
//!    deeper line as a literal block, indentation preserved relative to
//!    the shallowest collected line.
//! 2. An inline value of exactly `[` collects one array element per line
//!    until a line consisting of `]`.
//! 3. A key with no inline value whose next deeper line starts with a
//!    dash collects consecutive dash items.
//!
//! Collected fragments keep their original line and column so token
//! emission can point at the exact source text.

use crate::skein::error::ParseError;
use crate::skein::indentation::indent_width;
use crate::skein::range::Range;
use crate::skein::source::SourceDocument;
use crate::skein::typing::KeyParts;

/// How a line's value was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultilineKind {
    /// Plain inline value (possibly empty).
    None,
    /// Literal text block triggered by a string-ish hint.
    StringBlock,
    /// Bracketed array, one element per line.
    Array,
    /// Dash list, one element per dash.
    DashList,
}

/// One collected piece of a multiline value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Original 0-based line number.
    pub line: usize,
    /// Column where the fragment text starts.
    pub column: usize,
}

/// Structural punctuation met while collecting, kept for token emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunctKind {
    OpenBracket,
    CloseBracket,
    Comma,
    Dash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Punct {
    pub kind: PunctKind,
    pub line: usize,
    pub column: usize,
}

/// A content line with its pieces located and any continuation folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredLine {
    /// Leading whitespace character count.
    pub indent: usize,
    /// Key text as written, modifiers and hint included.
    pub raw_key: String,
    /// Inline value, trimmed. Empty when the line has none.
    pub raw_value: String,
    /// Original 0-based line number.
    pub line: usize,
    /// Column of the first key character. Equals the indent.
    pub key_column: usize,
    /// Column of the `:` separator.
    pub colon_column: usize,
    /// Column of the first value character.
    pub value_column: usize,
    pub multiline: MultilineKind,
    pub fragments: Vec<Fragment>,
    pub punctuation: Vec<Punct>,
}

impl StructuredLine {
    pub fn key_parts(&self) -> KeyParts {
        KeyParts::parse(&self.raw_key)
    }

    /// Range covering the raw key, modifiers and hint included.
    pub fn key_range(&self) -> Range {
        Range::on_line(self.line, self.key_column, self.raw_key.chars().count())
    }

    pub fn has_inline_value(&self) -> bool {
        !self.raw_value.is_empty()
    }

    /// Fragments joined into the literal string-block value.
    pub fn joined_fragments(&self) -> String {
        let texts: Vec<&str> = self.fragments.iter().map(|f| f.text.as_str()).collect();
        texts.join("\n")
    }
}

/// Does the line at `index` own nested children?
///
/// Multiline lines never do; their deeper lines were consumed by a
/// collector.
pub fn has_children(lines: &[StructuredLine], index: usize) -> bool {
    lines[index].multiline == MultilineKind::None
        && lines
            .get(index + 1)
            .map(|next| next.indent > lines[index].indent)
            .unwrap_or(false)
}

/// Builds [`StructuredLine`]s from a cleaned document.
pub struct StructuredLineBuilder<'a> {
    doc: &'a SourceDocument,
}

impl<'a> StructuredLineBuilder<'a> {
    pub fn new(doc: &'a SourceDocument) -> Self {
        Self { doc }
    }

    /// Structure the whole document.
    ///
    /// Never fails: lines that cannot be structured are reported and
    /// skipped so the editor path can keep going. Document parsing treats
    /// any reported error as fatal afterwards.
    pub fn build(self) -> (Vec<StructuredLine>, Vec<ParseError>) {
        let mut lines = Vec::new();
        let mut errors = Vec::new();
        let mut index = 0;

        while index < self.doc.len() {
            let text = self.doc.line(index);
            let number = self.doc.original_line(index);
            let indent = indent_width(text);
            let content = text[indent..].trim_end();

            let Some(colon_offset) = content.find(':') else {
                errors.push(ParseError::MissingColon {
                    range: Range::on_line(number, indent, content.chars().count()),
                });
                index += 1;
                continue;
            };

            let raw_key = content[..colon_offset].trim_end();
            if raw_key.is_empty() {
                errors.push(ParseError::EmptyKey {
                    range: Range::on_line(number, indent, 1),
                });
                index += 1;
                continue;
            }

            let after_colon = &content[colon_offset + 1..];
            let raw_value = after_colon.trim();
            let colon_column = indent + content[..colon_offset].chars().count();
            let leading = after_colon.len() - after_colon.trim_start().len();
            let value_column = colon_column + 1 + leading;

            let parts = KeyParts::parse(raw_key);
            let mut line = StructuredLine {
                indent,
                raw_key: raw_key.to_string(),
                raw_value: raw_value.to_string(),
                line: number,
                key_column: indent,
                colon_column,
                value_column,
                multiline: MultilineKind::None,
                fragments: Vec::new(),
                punctuation: Vec::new(),
            };

            let consumed = if raw_value.is_empty() && parts.opens_string_block() {
                let (fragments, consumed) = self.collect_string_block(index + 1, indent);
                line.multiline = MultilineKind::StringBlock;
                line.fragments = fragments;
                consumed
            } else if raw_value == "[" {
                line.punctuation.push(Punct {
                    kind: PunctKind::OpenBracket,
                    line: number,
                    column: value_column,
                });
                let (fragments, punctuation, consumed, terminated) =
                    self.collect_bracket_array(index + 1, indent);
                line.multiline = MultilineKind::Array;
                line.fragments = fragments;
                line.punctuation.extend(punctuation);
                if !terminated {
                    errors.push(ParseError::UnterminatedArray {
                        key: parts.name.clone(),
                        range: line.key_range(),
                    });
                }
                consumed
            } else if raw_value.is_empty() && self.dash_follows(index, indent) {
                let (fragments, punctuation, consumed) = self.collect_dash_list(index + 1, indent);
                line.multiline = MultilineKind::DashList;
                line.fragments = fragments;
                line.punctuation = punctuation;
                consumed
            } else {
                0
            };

            lines.push(line);
            index += 1 + consumed;
        }

        (lines, errors)
    }

    fn dash_follows(&self, index: usize, key_indent: usize) -> bool {
        let Some(next) = (index + 1 < self.doc.len()).then(|| self.doc.line(index + 1)) else {
            return false;
        };
        let indent = indent_width(next);
        indent > key_indent && dash_item(next[indent..].trim_end()).is_some()
    }

    /// Collect every deeper line verbatim, dropping the shared indent.
    fn collect_string_block(&self, start: usize, key_indent: usize) -> (Vec<Fragment>, usize) {
        let mut end = start;
        while end < self.doc.len() && indent_width(self.doc.line(end)) > key_indent {
            end += 1;
        }
        if end == start {
            return (Vec::new(), 0);
        }

        let base = (start..end)
            .map(|i| indent_width(self.doc.line(i)))
            .min()
            .unwrap_or(0);
        let fragments = (start..end)
            .map(|i| Fragment {
                text: self.doc.line(i)[base..].trim_end().to_string(),
                line: self.doc.original_line(i),
                column: base,
            })
            .collect();

        (fragments, end - start)
    }

    /// Collect array elements until a line consisting of `]`.
    ///
    /// The closing bracket may sit at any indent; a non-bracket line at or
    /// above the key's indent ends collection unterminated and is left for
    /// the outer structure.
    fn collect_bracket_array(
        &self,
        start: usize,
        key_indent: usize,
    ) -> (Vec<Fragment>, Vec<Punct>, usize, bool) {
        let mut fragments = Vec::new();
        let mut punctuation = Vec::new();
        let mut index = start;

        while index < self.doc.len() {
            let text = self.doc.line(index);
            let indent = indent_width(text);
            let number = self.doc.original_line(index);
            let content = text[indent..].trim_end();

            if content == "]" {
                punctuation.push(Punct {
                    kind: PunctKind::CloseBracket,
                    line: number,
                    column: indent,
                });
                return (fragments, punctuation, index - start + 1, true);
            }
            if indent <= key_indent {
                return (fragments, punctuation, index - start, false);
            }

            let (item, trailing_comma) = match content.strip_suffix(',') {
                Some(rest) => (rest.trim_end(), true),
                None => (content, false),
            };
            if trailing_comma {
                punctuation.push(Punct {
                    kind: PunctKind::Comma,
                    line: number,
                    column: indent + content.chars().count() - 1,
                });
            }
            if !item.is_empty() {
                fragments.push(Fragment {
                    text: item.to_string(),
                    line: number,
                    column: indent,
                });
            }
            index += 1;
        }

        (fragments, punctuation, index - start, false)
    }

    /// Collect consecutive deeper dash items.
    fn collect_dash_list(
        &self,
        start: usize,
        key_indent: usize,
    ) -> (Vec<Fragment>, Vec<Punct>, usize) {
        let mut fragments = Vec::new();
        let mut punctuation = Vec::new();
        let mut index = start;

        while index < self.doc.len() {
            let text = self.doc.line(index);
            let indent = indent_width(text);
            if indent <= key_indent {
                break;
            }
            let content = text[indent..].trim_end();
            let Some(item) = dash_item(content) else {
                break;
            };

            let number = self.doc.original_line(index);
            punctuation.push(Punct {
                kind: PunctKind::Dash,
                line: number,
                column: indent,
            });
            if !item.is_empty() {
                fragments.push(Fragment {
                    text: item.to_string(),
                    line: number,
                    column: indent + (content.len() - item.len()),
                });
            }
            index += 1;
        }

        (fragments, punctuation, index - start)
    }
}

/// The item text of a dash line, or `None` if the line is not one.
///
/// A bare `-` is an empty item.
fn dash_item(content: &str) -> Option<&str> {
    if content == "-" {
        return Some("");
    }
    content.strip_prefix("- ").map(str::trim_start)
}
