//! Parse command implementation

use std::io::Read;
use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use zsdiag_core::{CompileOutcome, DiagnosticParser};

use crate::cli::{Cli, OutputFormat};
use crate::output::output_diagnostics;
use crate::utils::load_config;

/// Source tag used when the configuration names none.
const DEFAULT_SOURCE: &str = "zscript";

pub fn run_parse(
    cli: &Cli,
    log: Option<&Path>,
    failed: bool,
    format: OutputFormat,
) -> Result<bool> {
    let config = load_config(cli.config.as_deref())?;

    let (label, text) = match log {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .into_diagnostic()?;
            ("<stdin>".to_string(), text)
        }
    };

    let outcome = if failed {
        CompileOutcome::failed(text)
    } else {
        CompileOutcome::succeeded(text)
    };

    let parser = DiagnosticParser::new(config.parser_config(DEFAULT_SOURCE));
    let output = parser.parse_run(&outcome);
    output_diagnostics(&label, &output, format)
}
