//! LSP type conversion utilities.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use zsdiag_core::{
    Diagnostic as ZsDiagnostic, Position as ZsPosition, Range as ZsRange, Severity as ZsSeverity,
};

/// Message published when no installation folder is configured.
pub const MISSING_INSTALLATION_MESSAGE: &str = "Must set zscript.installationFolder setting";

/// Converts a zsdiag diagnostic to an LSP diagnostic.
pub fn to_lsp_diagnostic(diag: &ZsDiagnostic) -> Diagnostic {
    let severity = match diag.severity {
        ZsSeverity::Error => DiagnosticSeverity::ERROR,
        ZsSeverity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic {
        range: to_lsp_range(diag.range),
        severity: Some(severity),
        source: Some(diag.source.clone()),
        message: diag.message.clone(),
        ..Default::default()
    }
}

/// Converts a zsdiag range to an LSP range.
pub fn to_lsp_range(range: ZsRange) -> Range {
    Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

fn to_lsp_position(position: ZsPosition) -> Position {
    Position::new(position.line, position.character)
}

/// The diagnostic shown instead of compiling when the compiler is not configured.
pub fn missing_installation_diagnostic() -> Diagnostic {
    Diagnostic {
        range: Range::default(),
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some("extension".to_string()),
        message: MISSING_INSTALLATION_MESSAGE.to_string(),
        ..Default::default()
    }
}
