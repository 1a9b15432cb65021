//! Parse entry points.
//!
//! One core runs for both consumers. [`parse_document`] wants a tree and
//! a verdict: the first fatal problem aborts with an error. Editor-facing
//! [`parse_with_tokens`] wants everything at once and never fails: a best
//! effort tree, the full semantic token list, and every problem downgraded
//! to a diagnostic.
//!
//! Both run the identical pipeline (clean lines, structure, tree); the
//! only difference is the optional token sink threaded through
//! [`parse_core`]. Token emission is where flavor matters, so document
//! mode ignores flavor entirely and the trees are identical across modes
//! by construction.
//!
//! Editor parsing additionally wraps the pipeline in `catch_unwind`. A
//! bug in the parser must surface as one synthetic diagnostic at the
//! document start, not as a dead language server.

use std::panic::{self, AssertUnwindSafe};

use crate::skein::classify::tables::ROOT_SCOPED_KEYS;
use crate::skein::classify::KeyClassifier;
use crate::skein::context::BlockContextTracker;
use crate::skein::diagnostics::{Diagnostic, DiagnosticFormatter};
use crate::skein::error::{ParseError, ParseResult};
use crate::skein::flavor::FileFlavor;
use crate::skein::indentation::IndentationConsistencyChecker;
use crate::skein::lines::{
    has_children, MultilineKind, PunctKind, StructuredLine, StructuredLineBuilder,
};
use crate::skein::source::SourceDocument;
use crate::skein::token::{Token, TokenCollector, TokenKind};
use crate::skein::tree::NestedTreeBuilder;
use crate::skein::typing;
use crate::skein::value::{Entries, ParsedValue};

use serde::Serialize;

/// Everything the editor path produces in one call.
#[derive(Debug, Serialize)]
pub struct EditorParse {
    pub tree: ParsedValue,
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse for programmatic consumption.
///
/// Fails on the earliest fatal problem in the document; advisory findings
/// are dropped. The returned tree is flavor independent.
pub fn parse_document(doc: &SourceDocument) -> ParseResult<ParsedValue> {
    let (tree, errors) = parse_core(doc, FileFlavor::Generic, None);

    let fatal = errors
        .into_iter()
        .filter(ParseError::is_fatal)
        .min_by_key(|error| error.range().start);
    match fatal {
        Some(error) => Err(Box::new(error)),
        None => Ok(tree),
    }
}

/// [`parse_document`] over a raw source string.
pub fn parse_str(source: &str) -> ParseResult<ParsedValue> {
    parse_document(&SourceDocument::new(source))
}

/// Parse for the editor: partial tree, full token list, diagnostics.
///
/// Never fails and never lets a panic escape.
pub fn parse_with_tokens(doc: &SourceDocument, flavor: FileFlavor) -> EditorParse {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut collector = TokenCollector::new();
        let (tree, errors) = parse_core(doc, flavor, Some(&mut collector));
        EditorParse {
            tree,
            tokens: collector.finish(),
            diagnostics: DiagnosticFormatter::render_all(&errors),
        }
    }));

    match outcome {
        Ok(parse) => parse,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unexpected panic during parsing".to_string());
            let error = ParseError::Internal { message };
            EditorParse {
                tree: ParsedValue::Map(Entries::new()),
                tokens: Vec::new(),
                diagnostics: vec![DiagnosticFormatter::render(&error)],
            }
        }
    }
}

/// The shared pipeline. With a sink, semantic tokens are emitted and the
/// token-only advisories (root-scoped keys) are reported; without one,
/// flavor is irrelevant.
fn parse_core(
    doc: &SourceDocument,
    flavor: FileFlavor,
    sink: Option<&mut TokenCollector>,
) -> (ParsedValue, Vec<ParseError>) {
    let mut errors = Vec::new();

    if let Some(error) = IndentationConsistencyChecker::check(doc) {
        errors.push(error);
    }

    let (lines, line_errors) = StructuredLineBuilder::new(doc).build();
    errors.extend(line_errors);

    let (tree, tree_errors) = NestedTreeBuilder::new(&lines).build();
    errors.extend(tree_errors);

    if let Some(collector) = sink {
        emit_tokens(doc, &lines, flavor, collector, &mut errors);
    }

    (tree, errors)
}

/// Walk the structured lines once more and emit semantic tokens.
///
/// The block tracker is pruned for the new line's indent before the key
/// is classified; classifying first would hand sibling keys to a block
/// they are not inside of.
fn emit_tokens(
    doc: &SourceDocument,
    lines: &[StructuredLine],
    flavor: FileFlavor,
    collector: &mut TokenCollector,
    errors: &mut Vec<ParseError>,
) {
    let root_indent = lines.first().map(|line| line.indent).unwrap_or(0);
    let classifier = KeyClassifier::new(flavor, root_indent);
    let mut tracker = BlockContextTracker::new();

    for (index, line) in lines.iter().enumerate() {
        tracker.close_at(line.indent);

        let parts = line.key_parts();
        let kind = classifier.classify(&parts, line.indent, &tracker);

        if classifier.is_root(line.indent) && ROOT_SCOPED_KEYS.contains(parts.name.as_str()) {
            errors.push(ParseError::RootScopedKey {
                key: parts.name.clone(),
                range: line.key_range(),
            });
        }

        let renders = flavor.renders_modifiers();
        let name_column = line.key_column + parts.name_offset;
        let name_length = parts.name.chars().count();

        if parts.locked && renders {
            collector.push(line.line, line.key_column, 1, TokenKind::Modifier);
        }
        collector.push(line.line, name_column, name_length, kind);
        if parts.required && renders {
            collector.push(line.line, name_column + name_length, 1, TokenKind::Modifier);
        }
        if let (Some(hint), Some(offset)) = (&parts.hint, parts.hint_offset) {
            collector.push(
                line.line,
                line.key_column + offset,
                hint.chars().count(),
                TokenKind::TypeHint,
            );
        }
        collector.push(line.line, line.colon_column, 1, TokenKind::Colon);

        match line.multiline {
            MultilineKind::None => {
                if line.has_inline_value() {
                    let (value, _) = typing::typed_value(&line.raw_value, parts.hint.as_deref());
                    collector.push(
                        line.line,
                        line.value_column,
                        line.raw_value.chars().count(),
                        TokenKind::for_value(&value),
                    );
                }
            }
            MultilineKind::StringBlock => {
                for fragment in &line.fragments {
                    collector.push(
                        fragment.line,
                        fragment.column,
                        fragment.text.chars().count(),
                        TokenKind::StringValue,
                    );
                }
            }
            MultilineKind::Array | MultilineKind::DashList => {
                for fragment in &line.fragments {
                    let value = typing::detect_scalar(&fragment.text);
                    collector.push(
                        fragment.line,
                        fragment.column,
                        fragment.text.chars().count(),
                        TokenKind::for_value(&value),
                    );
                }
            }
        }

        for punct in &line.punctuation {
            let kind = match punct.kind {
                PunctKind::Comma => TokenKind::Comma,
                _ => TokenKind::Structural,
            };
            collector.push(punct.line, punct.column, 1, kind);
        }

        if let Some(block) = classifier.opening_block(&parts, has_children(lines, index)) {
            tracker.push(block, line.indent, line.line, parts.name.clone());
        }
    }

    for comment in doc.comments() {
        collector.push(
            comment.line,
            comment.column,
            comment.length,
            TokenKind::Comment,
        );
    }
}
