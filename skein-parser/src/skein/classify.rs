//! Flavor-aware key classification.
//!
//! Given a clean key, its indent and the open-block context, the
//! classifier assigns one [`TokenKind`]. The steps run in a fixed order
//! and the first match wins:
//!
//! 1. Underscore-prefixed keys are client-rendered, in every flavor.
//! 2. Flavor and position: known root keys of the current flavor.
//! 3. Block-relative: the key against the innermost open block's
//!    vocabulary.
//! 4. Openers: keys that start a block classify as their opener kind, or
//!    as [`TokenKind::SubBlockKey`] when another block is already open.
//! 5. Default: [`TokenKind::RootKey`] at the root indent, otherwise
//!    [`TokenKind::NestedKey`].
//!
//! The caller closes stale blocks for the current line's indent before
//! asking for a classification; the classifier itself never mutates the
//! tracker. Root-scoped keys misused at the root are reported by the
//! caller and classify through the normal steps here.

pub mod tables;

use crate::skein::context::{BlockContextTracker, BlockKind};
use crate::skein::flavor::FileFlavor;
use crate::skein::token::TokenKind;
use crate::skein::typing::KeyParts;

use self::tables::{
    element_property, ACCESS_KEYS, BLUEPRINT_ROOT, CONTAINER_ELEMENTS,
    FIELD_VALIDATION_PROPERTIES, MACHINE_EDITABLE, MACHINE_LOCKED, MACHINE_SECTIONS,
    META_PROPERTIES, OPENER_KINDS, SHORTHAND_ELEMENTS, VIEW_ROOT,
};

/// Classifies keys for one document.
pub struct KeyClassifier {
    flavor: FileFlavor,
    root_indent: usize,
}

impl KeyClassifier {
    /// `root_indent` is the indent of the document's first content line,
    /// almost always zero.
    pub fn new(flavor: FileFlavor, root_indent: usize) -> Self {
        Self {
            flavor,
            root_indent,
        }
    }

    pub fn flavor(&self) -> FileFlavor {
        self.flavor
    }

    pub fn is_root(&self, indent: usize) -> bool {
        indent == self.root_indent
    }

    /// Classify one key.
    pub fn classify(
        &self,
        parts: &KeyParts,
        indent: usize,
        tracker: &BlockContextTracker,
    ) -> TokenKind {
        let name = parts.name.as_str();

        if name.starts_with('_') {
            return TokenKind::ClientRenderKey;
        }

        let at_root = self.is_root(indent);

        if at_root {
            match self.flavor {
                FileFlavor::Blueprint => {
                    if let Some(kind) = BLUEPRINT_ROOT.get(name) {
                        return *kind;
                    }
                }
                FileFlavor::View => {
                    if let Some(kind) = VIEW_ROOT.get(name) {
                        return *kind;
                    }
                }
                FileFlavor::Machine => {
                    if MACHINE_LOCKED.contains(name) {
                        return TokenKind::MachineLockedKey;
                    }
                    if MACHINE_EDITABLE.contains(name) {
                        return TokenKind::MachineEditableKey;
                    }
                }
                FileFlavor::Data => {
                    return TokenKind::SchemaDataKey;
                }
                FileFlavor::Env => {
                    if is_env_name(name) {
                        return TokenKind::EnvKey;
                    }
                }
                FileFlavor::Generic => {}
            }
        }

        if self.flavor.has_blocks() {
            if let Some(frame) = tracker.innermost() {
                match frame.kind {
                    BlockKind::Meta => {
                        if META_PROPERTIES.contains(name) {
                            return TokenKind::MetaKey;
                        }
                    }
                    BlockKind::Access => {
                        if ACCESS_KEYS.contains(name) {
                            return TokenKind::RoleKey;
                        }
                    }
                    BlockKind::Navbar => {
                        return TokenKind::NavbarKey;
                    }
                    BlockKind::Element => {
                        if element_property(&frame.label, name) {
                            return TokenKind::ElementPropertyKey;
                        }
                    }
                    BlockKind::Container => {
                        if SHORTHAND_ELEMENTS.contains(name) {
                            return TokenKind::ElementKey;
                        }
                    }
                    BlockKind::Fields => {
                        return if FIELD_VALIDATION_PROPERTIES.contains(name) {
                            TokenKind::SchemaValidationKey
                        } else {
                            TokenKind::SchemaFieldKey
                        };
                    }
                    BlockKind::Machine => {}
                }
            }

            if let Some(kind) = OPENER_KINDS.get(name) {
                return if tracker.is_empty() {
                    *kind
                } else {
                    TokenKind::SubBlockKey
                };
            }
        }

        if at_root {
            TokenKind::RootKey
        } else {
            TokenKind::NestedKey
        }
    }

    /// Which block, if any, a key line opens.
    ///
    /// `children` is whether deeper lines follow: element and container
    /// blocks only open with children, while the fixed openers push a
    /// frame unconditionally and let the next close prune it when
    /// nothing was nested.
    pub fn opening_block(&self, parts: &KeyParts, children: bool) -> Option<BlockKind> {
        if !self.flavor.has_blocks() {
            return None;
        }
        let name = parts.name.as_str();

        match self.flavor {
            FileFlavor::Machine => {
                return (children && MACHINE_SECTIONS.contains(name)).then_some(BlockKind::Machine);
            }
            FileFlavor::Data => {
                return (name == "fields").then_some(BlockKind::Fields);
            }
            _ => {}
        }

        match name {
            "meta" => Some(BlockKind::Meta),
            "access" => Some(BlockKind::Access),
            "navbar" => Some(BlockKind::Navbar),
            "fields" => Some(BlockKind::Fields),
            "form" | "chart" | "grid" => children.then_some(BlockKind::Element),
            _ if children && SHORTHAND_ELEMENTS.contains(name) => Some(BlockKind::Element),
            _ if children && CONTAINER_ELEMENTS.contains_key(name) => Some(BlockKind::Container),
            _ => None,
        }
    }
}

/// Env keys are all-caps identifiers: `DATABASE_URL`, `PORT_2`.
fn is_env_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    name.chars()
        .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(raw: &str) -> KeyParts {
        KeyParts::parse(raw)
    }

    fn classify(flavor: FileFlavor, raw: &str, indent: usize) -> TokenKind {
        let tracker = BlockContextTracker::new();
        KeyClassifier::new(flavor, 0).classify(&parts(raw), indent, &tracker)
    }

    fn classify_in(
        flavor: FileFlavor,
        raw: &str,
        indent: usize,
        tracker: &BlockContextTracker,
    ) -> TokenKind {
        KeyClassifier::new(flavor, 0).classify(&parts(raw), indent, tracker)
    }

    #[test]
    fn test_blueprint_root_tables() {
        assert_eq!(
            classify(FileFlavor::Blueprint, "meta", 0),
            TokenKind::MetaKey
        );
        assert_eq!(
            classify(FileFlavor::Blueprint, "pages", 0),
            TokenKind::TopLevelKey
        );
        assert_eq!(
            classify(FileFlavor::Blueprint, "custom", 0),
            TokenKind::RootKey
        );
    }

    #[test]
    fn test_view_root_tables() {
        assert_eq!(
            classify(FileFlavor::View, "route", 0),
            TokenKind::TopLevelKey
        );
        assert_eq!(
            classify(FileFlavor::View, "sections", 0),
            TokenKind::TopLevelKey
        );
    }

    #[test]
    fn test_machine_locked_and_editable() {
        assert_eq!(
            classify(FileFlavor::Machine, "cpu", 0),
            TokenKind::MachineLockedKey
        );
        assert_eq!(
            classify(FileFlavor::Machine, "hostname", 0),
            TokenKind::MachineEditableKey
        );
        assert_eq!(
            classify(FileFlavor::Machine, "whatever", 0),
            TokenKind::RootKey
        );
        assert_eq!(
            classify(FileFlavor::Machine, "inner", 2),
            TokenKind::NestedKey
        );
    }

    #[test]
    fn test_data_root_is_always_schema_data() {
        assert_eq!(
            classify(FileFlavor::Data, "users", 0),
            TokenKind::SchemaDataKey
        );
        assert_eq!(
            classify(FileFlavor::Data, "anything", 0),
            TokenKind::SchemaDataKey
        );
    }

    #[test]
    fn test_env_upper_and_lower() {
        assert_eq!(classify(FileFlavor::Env, "DATABASE_URL", 0), TokenKind::EnvKey);
        assert_eq!(classify(FileFlavor::Env, "PORT_2", 0), TokenKind::EnvKey);
        assert_eq!(classify(FileFlavor::Env, "port", 0), TokenKind::RootKey);
        assert_eq!(classify(FileFlavor::Env, "Mixed", 0), TokenKind::RootKey);
    }

    #[test]
    fn test_underscore_prefix_wins_everywhere() {
        assert_eq!(
            classify(FileFlavor::Env, "_PRIVATE", 0),
            TokenKind::ClientRenderKey
        );
        assert_eq!(
            classify(FileFlavor::Blueprint, "_meta", 0),
            TokenKind::ClientRenderKey
        );
        assert_eq!(
            classify(FileFlavor::Generic, "_anything", 4),
            TokenKind::ClientRenderKey
        );
    }

    #[test]
    fn test_meta_block_properties() {
        let mut tracker = BlockContextTracker::new();
        tracker.push(BlockKind::Meta, 0, 0, "meta");

        assert_eq!(
            classify_in(FileFlavor::Blueprint, "title", 2, &tracker),
            TokenKind::MetaKey
        );
        assert_eq!(
            classify_in(FileFlavor::Blueprint, "unrelated", 2, &tracker),
            TokenKind::NestedKey
        );
    }

    #[test]
    fn test_access_block_roles_and_verbs() {
        let mut tracker = BlockContextTracker::new();
        tracker.push(BlockKind::Access, 0, 0, "access");

        assert_eq!(
            classify_in(FileFlavor::Blueprint, "admin", 2, &tracker),
            TokenKind::RoleKey
        );
        assert_eq!(
            classify_in(FileFlavor::Blueprint, "deny", 2, &tracker),
            TokenKind::RoleKey
        );
    }

    #[test]
    fn test_navbar_swallows_every_key() {
        let mut tracker = BlockContextTracker::new();
        tracker.push(BlockKind::Navbar, 0, 0, "navbar");

        assert_eq!(
            classify_in(FileFlavor::View, "anything", 2, &tracker),
            TokenKind::NavbarKey
        );
    }

    #[test]
    fn test_element_properties_by_label() {
        let mut tracker = BlockContextTracker::new();
        tracker.push(BlockKind::Element, 0, 0, "form");

        assert_eq!(
            classify_in(FileFlavor::View, "action", 2, &tracker),
            TokenKind::ElementPropertyKey
        );
        assert_eq!(
            classify_in(FileFlavor::View, "id", 2, &tracker),
            TokenKind::ElementPropertyKey
        );
        assert_eq!(
            classify_in(FileFlavor::View, "url", 2, &tracker),
            TokenKind::NestedKey
        );
    }

    #[test]
    fn test_container_holds_elements() {
        let mut tracker = BlockContextTracker::new();
        tracker.push(BlockKind::Container, 0, 0, "links");

        assert_eq!(
            classify_in(FileFlavor::View, "link", 2, &tracker),
            TokenKind::ElementKey
        );
    }

    #[test]
    fn test_fields_block_splits_names_and_validation() {
        let mut tracker = BlockContextTracker::new();
        tracker.push(BlockKind::Fields, 2, 1, "fields");

        assert_eq!(
            classify_in(FileFlavor::Data, "email", 4, &tracker),
            TokenKind::SchemaFieldKey
        );
        assert_eq!(
            classify_in(FileFlavor::Data, "required", 6, &tracker),
            TokenKind::SchemaValidationKey
        );
    }

    #[test]
    fn test_opener_inside_block_is_sub_block() {
        let mut tracker = BlockContextTracker::new();
        tracker.push(BlockKind::Element, 0, 0, "grid");

        assert_eq!(
            classify_in(FileFlavor::View, "form", 2, &tracker),
            TokenKind::SubBlockKey
        );
    }

    #[test]
    fn test_shorthand_leaf_is_element_key() {
        assert_eq!(
            classify(FileFlavor::Generic, "heading", 2),
            TokenKind::ElementKey
        );
        assert_eq!(
            classify(FileFlavor::View, "links", 2),
            TokenKind::ContainerKey
        );
    }

    #[test]
    fn test_env_flavor_skips_block_steps() {
        let mut tracker = BlockContextTracker::new();
        tracker.push(BlockKind::Navbar, 0, 0, "navbar");

        assert_eq!(
            classify_in(FileFlavor::Env, "anything", 2, &tracker),
            TokenKind::NestedKey
        );
    }

    #[test]
    fn test_opening_blocks_per_flavor() {
        let view = KeyClassifier::new(FileFlavor::View, 0);
        assert_eq!(
            view.opening_block(&parts("meta"), false),
            Some(BlockKind::Meta)
        );
        assert_eq!(
            view.opening_block(&parts("form"), true),
            Some(BlockKind::Element)
        );
        assert_eq!(view.opening_block(&parts("form"), false), None);
        assert_eq!(
            view.opening_block(&parts("link"), true),
            Some(BlockKind::Element)
        );
        assert_eq!(view.opening_block(&parts("link"), false), None);
        assert_eq!(
            view.opening_block(&parts("links"), true),
            Some(BlockKind::Container)
        );

        let machine = KeyClassifier::new(FileFlavor::Machine, 0);
        assert_eq!(
            machine.opening_block(&parts("labels"), true),
            Some(BlockKind::Machine)
        );
        assert_eq!(machine.opening_block(&parts("meta"), true), None);

        let data = KeyClassifier::new(FileFlavor::Data, 0);
        assert_eq!(
            data.opening_block(&parts("fields"), true),
            Some(BlockKind::Fields)
        );
        assert_eq!(data.opening_block(&parts("navbar"), true), None);

        let env = KeyClassifier::new(FileFlavor::Env, 0);
        assert_eq!(env.opening_block(&parts("meta"), true), None);
    }

    #[test]
    fn test_hint_and_modifiers_do_not_affect_classification() {
        assert_eq!(
            classify(FileFlavor::Machine, "!cpu*(int)", 0),
            TokenKind::MachineLockedKey
        );
        assert_eq!(
            classify(FileFlavor::Blueprint, "meta(str)", 0),
            TokenKind::MetaKey
        );
    }
}
