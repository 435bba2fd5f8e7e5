//! Output formatting module

mod json;
mod text;

use miette::Result;
use zsdiag_core::ParseOutput;

use crate::cli::OutputFormat;

/// Prints the diagnostics of one run. Returns whether any is an error.
pub fn output_diagnostics(label: &str, output: &ParseOutput, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => json::output_json(label, output)?,
        OutputFormat::Text => text::output_text(label, output),
    }

    Ok(output.has_errors())
}
