//! Entry point: raw compiler output in, ordered diagnostics out.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::classify;
use crate::config::ParserConfig;
use crate::diagnostic::{Diagnostic, ParseOutput, Severity};
use crate::extract::extract;
use crate::normalize::{Normalizer, OriginMatcher};

/// What one compiler invocation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOutcome {
    /// Whether the compiler reported success.
    pub success: bool,
    /// Combined stdout and stderr of the run.
    pub output: String,
}

impl CompileOutcome {
    /// A successful run.
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    /// A failed run.
    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Parses compiler output into diagnostics.
///
/// Stateless across calls: parsing the same output twice yields the same list.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticParser {
    normalizer: Normalizer,
}

impl DiagnosticParser {
    /// Creates a parser from configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            normalizer: Normalizer::new(
                OriginMatcher::new(config.temp_buffer_name),
                config.settings_hint,
                config.source,
            ),
        }
    }

    /// The source tag stamped on produced diagnostics.
    pub fn source(&self) -> &str {
        self.normalizer.source()
    }

    /// Parses every diagnostic-bearing line of `output`, in input order.
    pub fn parse(&self, output: &str) -> ParseOutput {
        let diagnostics: Vec<Diagnostic> = output
            .split('\n')
            .enumerate()
            .filter_map(|(index, line)| {
                let kind = classify(line)?;
                debug!("Output line {} classified as {:?}", index + 1, kind);
                Some(self.normalizer.normalize(extract(kind, line)))
            })
            .collect();

        ParseOutput::new(diagnostics)
    }

    /// Parses the output of a run, falling back to the raw output when a
    /// failed run yields nothing parseable.
    pub fn parse_run(&self, outcome: &CompileOutcome) -> ParseOutput {
        let mut parsed = self.parse(&outcome.output);

        if !outcome.success && parsed.diagnostics.is_empty() {
            debug!("Compiler failed without recognizable diagnostics, reporting raw output");
            parsed.diagnostics.push(
                Diagnostic::new(outcome.output.clone(), self.source())
                    .with_severity(Severity::Error),
            );
        }

        info!(
            "Compiler run {}: {} diagnostic(s)",
            if outcome.success { "succeeded" } else { "failed" },
            parsed.diagnostics.len()
        );
        parsed
    }
}

/// Parses a run with default settings and the given source tag.
pub fn parse_compiler_output(output: &str, success: bool, source: &str) -> ParseOutput {
    let parser = DiagnosticParser::new(ParserConfig {
        source: source.to_string(),
        ..ParserConfig::default()
    });
    parser.parse_run(&CompileOutcome {
        success,
        output: output.to_string(),
    })
}
