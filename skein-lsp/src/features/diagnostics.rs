use skein_parser::skein::diagnostics::{
    Diagnostic as SkeinDiagnostic, DiagnosticSeverity as SkeinSeverity,
};
use skein_parser::skein::range::Range as SkeinRange;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

/// Protocol severity for a parser severity. The two scales line up
/// one to one.
pub fn lsp_severity(severity: SkeinSeverity) -> DiagnosticSeverity {
    match severity {
        SkeinSeverity::Error => DiagnosticSeverity::ERROR,
        SkeinSeverity::Warning => DiagnosticSeverity::WARNING,
        SkeinSeverity::Information => DiagnosticSeverity::INFORMATION,
        SkeinSeverity::Hint => DiagnosticSeverity::HINT,
    }
}

/// Protocol range for a parser range. Both sides are 0-based with
/// exclusive ends, so this is a straight field copy.
pub fn lsp_range(range: &SkeinRange) -> Range {
    Range {
        start: Position::new(range.start.line as u32, range.start.column as u32),
        end: Position::new(range.end.line as u32, range.end.column as u32),
    }
}

/// Convert one parser diagnostic to the protocol shape.
///
/// The stable code string rides along as the diagnostic code and the
/// producing source tag ("skein", "skein-lint", "legacy", ...) is kept,
/// so editors attribute findings to the right tool.
pub fn to_lsp_diagnostic(diagnostic: &SkeinDiagnostic) -> Diagnostic {
    Diagnostic {
        range: lsp_range(&diagnostic.range),
        severity: Some(lsp_severity(diagnostic.severity)),
        code: diagnostic.code.clone().map(NumberOrString::String),
        source: Some(diagnostic.source.clone()),
        message: diagnostic.message.clone(),
        ..Diagnostic::default()
    }
}

/// Convert a batch, preserving the parser's ordering.
pub fn to_lsp_diagnostics(diagnostics: &[SkeinDiagnostic]) -> Vec<Diagnostic> {
    diagnostics.iter().map(to_lsp_diagnostic).collect()
}
