//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use zsdiag_core::ParseOutput;

pub fn output_json(label: &str, output: &ParseOutput) -> Result<()> {
    let value = serde_json::json!({
        "path": label,
        "diagnostics": output.diagnostics,
        "metadata": output.metadata,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&value).into_diagnostic()?
    );
    Ok(())
}
