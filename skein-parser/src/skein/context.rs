//! Block context tracking.
//!
//! Flavor-aware classification needs to know which blocks are open at the
//! line being classified. A block opens when its opener key is met and
//! stays open exactly while lines sit deeper than the opener's indent, so
//! the tracker is a plain stack of frames ordered by indent.
//!
//! Ordering rule: [`ContextStack::close_at`] runs with the current line's
//! indent *before* that line is classified. A line at or above an opener's
//! indent is outside the block, including the line right after an opener
//! that never got children; such a frame lives for zero lines.

use std::fmt;

/// Kinds of nestable blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `meta:` document metadata.
    Meta,
    /// `access:` role and permission rules.
    Access,
    /// `navbar:` navigation entries.
    Navbar,
    /// A UI element with properties (`form:`, `chart:`, `grid:` or a
    /// shorthand element opened with children).
    Element,
    /// A plural shorthand container holding elements (`links:`, `images:`).
    Container,
    /// A machine section with nested entries (`labels:`, `mounts:`, `network:`).
    Machine,
    /// `fields:` schema definitions.
    Fields,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Meta => "meta",
            BlockKind::Access => "access",
            BlockKind::Navbar => "navbar",
            BlockKind::Element => "element",
            BlockKind::Container => "container",
            BlockKind::Machine => "machine",
            BlockKind::Fields => "fields",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One open block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<K> {
    pub kind: K,
    /// Indent of the line that opened the block.
    pub indent: usize,
    /// Original line number of the opener.
    pub line: usize,
    /// The opener's clean key, for Element blocks the element name.
    pub label: String,
}

/// A stack of open blocks, generic over the kind vocabulary.
#[derive(Debug, Clone)]
pub struct ContextStack<K> {
    frames: Vec<Frame<K>>,
}

impl<K: Copy + PartialEq> ContextStack<K> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Close every block whose opener sits at or deeper than `indent`.
    /// Returns how many frames were popped.
    pub fn close_at(&mut self, indent: usize) -> usize {
        let before = self.frames.len();
        while self
            .frames
            .last()
            .map(|frame| frame.indent >= indent)
            .unwrap_or(false)
        {
            self.frames.pop();
        }
        before - self.frames.len()
    }

    pub fn push(&mut self, kind: K, indent: usize, line: usize, label: impl Into<String>) {
        self.frames.push(Frame {
            kind,
            indent,
            line,
            label: label.into(),
        });
    }

    /// The most recently opened block still open.
    pub fn innermost(&self) -> Option<&Frame<K>> {
        self.frames.last()
    }

    /// The innermost open block of a specific kind.
    pub fn innermost_of(&self, kind: K) -> Option<&Frame<K>> {
        self.frames.iter().rev().find(|frame| frame.kind == kind)
    }

    pub fn is_open(&self, kind: K) -> bool {
        self.innermost_of(kind).is_some()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl<K: Copy + PartialEq> Default for ContextStack<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// The tracker used by skein classification.
pub type BlockContextTracker = ContextStack<BlockKind>;
