//! Scalar typing and key decoration.
//!
//! This module owns everything that turns raw text into typed values:
//!
//! - [`detect_scalar`] - JSON-style detection of booleans, null, integers,
//!   floats and quoted strings, with plain text as the fallback
//! - [`typed_value`] - detection plus coercion through an explicit type hint
//! - [`KeyParts`] - decomposition of a raw key into modifiers, clean name
//!   and trailing `(hint)` annotation
//! - [`validate_ascii`] - the ASCII-only rule for key names
//!
//! Detection is deliberately whole-value: `8080` is an integer but
//! `8080 connections` is a string, because the value lexes into more than
//! one token. Anything the lexer cannot read as a single typed literal is
//! a string, so detection never fails.

use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::skein::value::ParsedValue;

/// Tokens of the inline value sublanguage.
///
/// `Bare` is the catch-all word token; its character class excludes the
/// array punctuation and whitespace so bracket collection and detection
/// can share one lexer.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum ValueToken {
    #[token("true", priority = 6)]
    True,

    #[token("false", priority = 6)]
    False,

    #[token("null", priority = 6)]
    Null,

    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?|-?[0-9]+[eE][+-]?[0-9]+", priority = 5)]
    Float,

    #[regex(r"-?[0-9]+", priority = 4)]
    Integer,

    #[regex(r#""([^"\\]|\\.)*""#, priority = 3)]
    Quoted,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token(",")]
    Comma,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"[^,\[\] \t]+", priority = 1)]
    Bare,
}

/// Detect the type of an inline scalar value.
///
/// The trimmed value must lex into exactly one typed literal to become
/// anything other than a string. Integers that overflow `i64` stay
/// strings rather than losing precision.
pub fn detect_scalar(raw: &str) -> ParsedValue {
    let text = raw.trim();
    if text.is_empty() {
        return ParsedValue::String(String::new());
    }

    let mut lexer = ValueToken::lexer(text);
    let token = match (lexer.next(), lexer.next()) {
        (Some(Ok(token)), None) => token,
        _ => return ParsedValue::String(text.to_string()),
    };

    match token {
        ValueToken::True => ParsedValue::Boolean(true),
        ValueToken::False => ParsedValue::Boolean(false),
        ValueToken::Null => ParsedValue::Null,
        ValueToken::Integer => text
            .parse::<i64>()
            .map(ParsedValue::Integer)
            .unwrap_or_else(|_| ParsedValue::String(text.to_string())),
        ValueToken::Float => text
            .parse::<f64>()
            .map(ParsedValue::Float)
            .unwrap_or_else(|_| ParsedValue::String(text.to_string())),
        ValueToken::Quoted => ParsedValue::String(unescape_quoted(text)),
        _ => ParsedValue::String(text.to_string()),
    }
}

/// Strip the surrounding quotes and resolve backslash escapes.
///
/// Unknown escapes are kept verbatim, backslash included, so sloppy input
/// degrades instead of erroring.
fn unescape_quoted(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// What a type hint asks the value to become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintTarget {
    Int,
    Float,
    Bool,
    Str,
}

/// Resolve a hint name to its target type. Unknown names resolve to `None`
/// and leave detection untouched.
pub fn hint_target(hint: &str) -> Option<HintTarget> {
    match hint.to_ascii_lowercase().as_str() {
        "int" | "integer" => Some(HintTarget::Int),
        "float" | "number" => Some(HintTarget::Float),
        "bool" | "boolean" => Some(HintTarget::Bool),
        "str" | "string" | "text" => Some(HintTarget::Str),
        _ => None,
    }
}

/// Type a raw inline value, honoring an optional hint.
///
/// Returns the value and whether the hint was satisfied. On a failed
/// coercion the detected value is kept and the flag comes back `false`;
/// the caller decides whether that is worth a diagnostic.
pub fn typed_value(raw: &str, hint: Option<&str>) -> (ParsedValue, bool) {
    let text = raw.trim();
    let target = match hint.and_then(hint_target) {
        Some(target) => target,
        None => return (detect_scalar(text), true),
    };

    match target {
        HintTarget::Str => (ParsedValue::String(text.to_string()), true),
        HintTarget::Int => match text.parse::<i64>() {
            Ok(n) => (ParsedValue::Integer(n), true),
            Err(_) => (detect_scalar(text), false),
        },
        HintTarget::Float => match text.parse::<f64>() {
            Ok(x) => (ParsedValue::Float(x), true),
            Err(_) => (detect_scalar(text), false),
        },
        HintTarget::Bool => match text {
            "true" => (ParsedValue::Boolean(true), true),
            "false" => (ParsedValue::Boolean(false), true),
            _ => (detect_scalar(text), false),
        },
    }
}

static HINT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\(([A-Za-z][A-Za-z0-9_]*)\)$").unwrap());

/// A raw key split into its meaningful pieces.
///
/// The grammar is `[!]name[*][(hint)]`: a `!` prefix locks the key, a `*`
/// suffix marks it required, and a trailing parenthesized word is a type
/// hint. All three are stripped to produce the clean name that the tree
/// and the duplicate-key policy operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParts {
    pub name: String,
    pub locked: bool,
    pub required: bool,
    pub hint: Option<String>,
    /// Column of the clean name relative to the start of the raw key.
    pub name_offset: usize,
    /// Column of the hint name relative to the start of the raw key.
    pub hint_offset: Option<usize>,
}

impl KeyParts {
    pub fn parse(raw_key: &str) -> Self {
        let (stem, hint, hint_offset) = match HINT_SUFFIX.captures(raw_key) {
            Some(caps) => {
                let stem = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                let hint = caps.get(2).map(|m| m.as_str().to_string());
                (stem, hint, Some(stem.chars().count() + 1))
            }
            None => (raw_key, None, None),
        };

        let (locked, stem) = match stem.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, stem),
        };
        let (required, name) = match stem.strip_suffix('*') {
            Some(rest) => (true, rest),
            None => (false, stem),
        };

        Self {
            name: name.to_string(),
            locked,
            required,
            hint,
            name_offset: usize::from(locked),
            hint_offset,
        }
    }

    pub fn hint_target(&self) -> Option<HintTarget> {
        self.hint.as_deref().and_then(hint_target)
    }

    /// A string-ish hint on a key with no inline value starts a literal
    /// string block.
    pub fn opens_string_block(&self) -> bool {
        self.hint_target() == Some(HintTarget::Str)
    }
}

/// Check a clean key name for the ASCII-only rule.
///
/// Returns the first offending character, if any.
pub fn validate_ascii(name: &str) -> Option<char> {
    name.chars().find(|ch| !ch.is_ascii())
}
