//! Check command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::info;
use zsdiag_compiler::{CompilerBackend, ProcessCompiler, compile_or_report};
use zsdiag_core::DiagnosticParser;

use crate::cli::{Cli, OutputFormat};
use crate::output::output_diagnostics;
use crate::utils::{create_tokio_runtime, load_config};

pub fn run_check(
    cli: &Cli,
    file: &Path,
    installation_folder: Option<&Path>,
    format: OutputFormat,
) -> Result<bool> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(dir) = installation_folder {
        let dir = std::env::current_dir().into_diagnostic()?.join(dir);
        config.installation_folder = Some(dir);
    }

    let source = std::fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;

    let compiler = ProcessCompiler::from_config(&config).into_diagnostic()?;
    let parser = DiagnosticParser::new(config.parser_config(compiler.name()));

    info!("Compiling {}", file.display());
    let outcome = create_tokio_runtime()?.block_on(compile_or_report(&compiler, &source));

    let output = parser.parse_run(&outcome);
    output_diagnostics(&file.display().to_string(), &output, format)
}
