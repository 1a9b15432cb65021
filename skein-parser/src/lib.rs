//! # skein
//!
//! A parser for the skein format.
//!
//! Skein is an indentation-sensitive `key: value` language used for app
//! blueprints, view layouts, data schemas, machine manifests and plain
//! configuration. One source text serves two very different consumers:
//!
//! - tooling that wants a nested value tree and a hard verdict (a bad
//!   document must fail, not produce a silently wrong structure);
//! - an editor that wants semantic tokens and diagnostics for the same
//!   text on every keystroke, and must never be killed by it.
//!
//! Both run the same pipeline: clean the source, structure the lines,
//! fold them into a tree by indent, and (for the editor) walk the lines
//! once more emitting classified tokens. The entry points are
//! [`skein::parsing::parse_document`] and
//! [`skein::parsing::parse_with_tokens`].
//!
//! The file flavor (blueprint, view, data, machine, env, generic) is
//! derived from the filename and only ever affects token classification.
//! The tree never depends on it.

pub mod skein;
