//! Text output formatter

use zsdiag_core::{Diagnostic, ParseOutput, Severity};

pub fn output_text(label: &str, output: &ParseOutput) {
    if !output.diagnostics.is_empty() {
        println!("{}:", label);
        for diag in &output.diagnostics {
            println!("  {}", format_diagnostic(diag));
        }
        println!();
    }

    let errors = output.diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = output.diagnostics.len() - errors;
    println!("Found {} errors and {} warnings", errors, warnings);
}

/// One diagnostic as `line:col-line:col severity: message`, 1-based.
///
/// Positions are widened before the shift so `u32::MAX` columns still print.
fn format_diagnostic(diag: &Diagnostic) -> String {
    let severity = match diag.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    let start = diag.range.start;
    let end = diag.range.end;
    format!(
        "{}:{}-{}:{} {}: {}",
        u64::from(start.line) + 1,
        u64::from(start.character) + 1,
        u64::from(end.line) + 1,
        u64::from(end.character) + 1,
        severity,
        diag.message
    )
}
