//! Parsed value representation.
//!
//! Every skein document parses into a [`ParsedValue`] tree. Scalars follow
//! JSON semantics (null, booleans, 64-bit integers, 64-bit floats, strings);
//! mappings preserve the insertion order of their keys so a parsed document
//! serializes back in source order.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered key/value mapping used for every nesting level of a document.
pub type Entries = IndexMap<String, ParsedValue>;

/// A parsed skein value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedValue {
    /// Absent or explicitly empty value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating-point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Array of values.
    Array(Vec<ParsedValue>),
    /// Nested mapping, in source order.
    Map(Entries),
}

impl ParsedValue {
    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ParsedValue::Null)
    }

    /// Returns the boolean value if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParsedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value if this is an `Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParsedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value if this is a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParsedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParsedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an `Array`.
    pub fn as_array(&self) -> Option<&[ParsedValue]> {
        match self {
            ParsedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a reference to the mapping if this is a `Map`.
    pub fn as_map(&self) -> Option<&Entries> {
        match self {
            ParsedValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key in a mapping; `None` for non-mappings and missing keys.
    pub fn get(&self, key: &str) -> Option<&ParsedValue> {
        self.as_map().and_then(|entries| entries.get(key))
    }
}

impl Default for ParsedValue {
    fn default() -> Self {
        ParsedValue::Null
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedValue::Null => write!(f, "null"),
            ParsedValue::Boolean(b) => write!(f, "{}", b),
            ParsedValue::Integer(n) => write!(f, "{}", n),
            ParsedValue::Float(x) => write!(f, "{}", x),
            ParsedValue::String(s) => write!(f, "{:?}", s),
            ParsedValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ParsedValue::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for ParsedValue {
    fn from(b: bool) -> Self {
        ParsedValue::Boolean(b)
    }
}

impl From<i64> for ParsedValue {
    fn from(n: i64) -> Self {
        ParsedValue::Integer(n)
    }
}

impl From<f64> for ParsedValue {
    fn from(x: f64) -> Self {
        ParsedValue::Float(x)
    }
}

impl From<&str> for ParsedValue {
    fn from(s: &str) -> Self {
        ParsedValue::String(s.to_string())
    }
}

impl From<String> for ParsedValue {
    fn from(s: String) -> Self {
        ParsedValue::String(s)
    }
}

impl From<Vec<ParsedValue>> for ParsedValue {
    fn from(items: Vec<ParsedValue>) -> Self {
        ParsedValue::Array(items)
    }
}

impl From<Entries> for ParsedValue {
    fn from(entries: Entries) -> Self {
        ParsedValue::Map(entries)
    }
}
