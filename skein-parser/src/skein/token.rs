//! Semantic tokens.
//!
//! The token-emitting parse produces a flat list of [`Token`]s, each
//! covering a run of characters on one original source line. Kinds split
//! into a generic tier (keys, values, punctuation, comments) and a
//! flavor tier produced by classification; a consumer that does not care
//! about flavors can treat every flavor kind as its nearest generic one.

use serde::Serialize;

use crate::skein::value::ParsedValue;

/// What a token means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Generic tier.
    /// Key at the document root with no more specific classification.
    RootKey,
    /// Nested key with no more specific classification.
    NestedKey,
    StringValue,
    NumberValue,
    BooleanValue,
    NullValue,
    Comment,
    Colon,
    Comma,
    /// Brackets, dashes and other structural punctuation.
    Structural,
    /// The name inside a `(hint)` annotation.
    TypeHint,
    /// A `!` or `*` key modifier.
    Modifier,

    // Flavor tier.
    /// Metadata property inside `meta:`, or the `meta` opener itself.
    MetaKey,
    /// Role name or permission verb inside `access:`.
    RoleKey,
    /// Known root key of a blueprint or view file.
    TopLevelKey,
    /// Upper-case variable in an env file.
    EnvKey,
    /// Uneditable machine resource key.
    MachineLockedKey,
    /// Editable machine configuration key.
    MachineEditableKey,
    /// Dataset name at the root of a data file.
    SchemaDataKey,
    /// Field name inside `fields:`.
    SchemaFieldKey,
    /// Validation property of a schema field.
    SchemaValidationKey,
    /// Any key inside `navbar:`.
    NavbarKey,
    /// A UI element key.
    ElementKey,
    /// Known property of the enclosing element.
    ElementPropertyKey,
    /// Plural shorthand container key.
    ContainerKey,
    /// Block opener met inside another block.
    SubBlockKey,
    /// Underscore-prefixed key rendered client side.
    ClientRenderKey,
}

impl TokenKind {
    /// The value-token kind for a detected scalar.
    pub fn for_value(value: &ParsedValue) -> TokenKind {
        match value {
            ParsedValue::Integer(_) | ParsedValue::Float(_) => TokenKind::NumberValue,
            ParsedValue::Boolean(_) => TokenKind::BooleanValue,
            ParsedValue::Null => TokenKind::NullValue,
            _ => TokenKind::StringValue,
        }
    }
}

/// One semantic token on one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Original 0-based line number.
    pub line: usize,
    /// 0-based start column.
    pub column: usize,
    /// Length in characters; never zero.
    pub length: usize,
    pub kind: TokenKind,
}

/// Accumulates tokens during a parse and hands them back ordered.
///
/// Emission happens key line by key line but multiline fragments and
/// stripped comments arrive out of order, so ordering is restored once
/// at the end instead of being a push-site obligation.
#[derive(Debug, Default)]
pub struct TokenCollector {
    tokens: Vec<Token>,
}

impl TokenCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a token. Zero-length pushes are dropped.
    pub fn push(&mut self, line: usize, column: usize, length: usize, kind: TokenKind) {
        if length == 0 {
            return;
        }
        self.tokens.push(Token {
            line,
            column,
            length,
            kind,
        });
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Sort by line then column and return the final list.
    pub fn finish(mut self) -> Vec<Token> {
        self.tokens
            .sort_by(|a, b| a.line.cmp(&b.line).then(a.column.cmp(&b.column)));
        self.tokens
    }
}
