//! Static key vocabulary.
//!
//! Everything flavor-specific the classifier knows is data in this file:
//! root key tables per flavor, property tables per block kind, the opener
//! table and the shorthand element names. Changing the dialect means
//! editing these tables, not the classification steps.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::skein::token::TokenKind;

/// Keys that only make sense inside a block and are reported at the root.
pub static ROOT_SCOPED_KEYS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["allow", "deny", "inherit", "on"].into_iter().collect());

/// Singular UI shorthand element names.
///
/// These produce element tokens, open element blocks when written with
/// children, and are exempt from the duplicate-key error: repeats get a
/// `__dupN` suffix instead.
pub static SHORTHAND_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "heading", "text", "link", "image", "list", "table", "quote", "divider",
    ]
    .into_iter()
    .collect()
});

/// Plural container name mapped to the element it holds.
pub static CONTAINER_ELEMENTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("headings", "heading"),
        ("texts", "text"),
        ("links", "link"),
        ("images", "image"),
        ("lists", "list"),
        ("tables", "table"),
        ("quotes", "quote"),
        ("dividers", "divider"),
    ]
    .into_iter()
    .collect()
});

/// Known root keys of a blueprint file.
pub static BLUEPRINT_ROOT: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    [
        ("meta", TokenKind::MetaKey),
        ("app", TokenKind::TopLevelKey),
        ("pages", TokenKind::TopLevelKey),
        ("data", TokenKind::TopLevelKey),
        ("env", TokenKind::TopLevelKey),
        ("theme", TokenKind::TopLevelKey),
        ("deploy", TokenKind::TopLevelKey),
    ]
    .into_iter()
    .collect()
});

/// Known root keys of a view file.
pub static VIEW_ROOT: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    [
        ("page", TokenKind::TopLevelKey),
        ("title", TokenKind::TopLevelKey),
        ("route", TokenKind::TopLevelKey),
        ("layout", TokenKind::TopLevelKey),
        ("theme", TokenKind::TopLevelKey),
        ("sections", TokenKind::TopLevelKey),
    ]
    .into_iter()
    .collect()
});

/// Machine resource keys the provisioner owns; users may not edit these.
pub static MACHINE_LOCKED: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["cpu", "memory", "disk", "gpu", "os"].into_iter().collect());

/// Machine keys users are expected to edit.
pub static MACHINE_EDITABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["hostname", "timezone", "labels", "mounts", "network"]
        .into_iter()
        .collect()
});

/// Machine keys that hold nested entries and open a block.
pub static MACHINE_SECTIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["labels", "mounts", "network"].into_iter().collect());

/// Properties recognized inside a `meta:` block.
pub static META_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["title", "version", "author", "description", "icon", "tags"]
        .into_iter()
        .collect()
});

/// Role names and permission verbs recognized inside an `access:` block.
pub static ACCESS_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "admin",
        "editor",
        "viewer",
        "guest",
        "public",
        "anonymous",
        "allow",
        "deny",
        "inherit",
    ]
    .into_iter()
    .collect()
});

/// Properties every element accepts.
pub static ELEMENT_COMMON_PROPERTIES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["id", "class", "style", "hidden"].into_iter().collect());

/// Per-element property tables.
pub static ELEMENT_PROPERTIES: Lazy<HashMap<&'static str, HashSet<&'static str>>> =
    Lazy::new(|| {
        let entries: [(&str, &[&str]); 11] = [
            ("form", &["action", "method", "submit", "validate"]),
            ("chart", &["source", "type", "x", "y", "legend"]),
            ("grid", &["columns", "gap", "align"]),
            ("heading", &["level", "text", "align"]),
            ("text", &["content", "size", "color"]),
            ("link", &["url", "label", "target"]),
            ("image", &["src", "alt", "width", "height"]),
            ("list", &["items", "ordered", "compact"]),
            ("table", &["source", "columns", "striped"]),
            ("quote", &["content", "cite"]),
            ("divider", &["style"]),
        ];
        entries
            .into_iter()
            .map(|(label, props)| (label, props.iter().copied().collect()))
            .collect()
    });

/// Validation properties of a schema field.
pub static FIELD_VALIDATION_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "type", "required", "unique", "default", "min", "max", "pattern", "values",
    ]
    .into_iter()
    .collect()
});

/// Opener key mapped to its classification when no block is open yet.
/// While a block is open every opener classifies as [`TokenKind::SubBlockKey`].
pub static OPENER_KINDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut kinds: HashMap<&'static str, TokenKind> = [
        ("meta", TokenKind::MetaKey),
        ("access", TokenKind::RoleKey),
        ("navbar", TokenKind::NavbarKey),
        ("fields", TokenKind::SubBlockKey),
        ("form", TokenKind::ElementKey),
        ("chart", TokenKind::ElementKey),
        ("grid", TokenKind::ElementKey),
    ]
    .into_iter()
    .collect();

    for element in SHORTHAND_ELEMENTS.iter() {
        kinds.insert(element, TokenKind::ElementKey);
    }
    for container in CONTAINER_ELEMENTS.keys() {
        kinds.insert(container, TokenKind::ContainerKey);
    }

    kinds
});

/// Is `key` a recognized property of the element `label`?
pub fn element_property(label: &str, key: &str) -> bool {
    if ELEMENT_COMMON_PROPERTIES.contains(key) {
        return true;
    }
    ELEMENT_PROPERTIES
        .get(label)
        .map(|props| props.contains(key))
        .unwrap_or(false)
}
