//! # zsdiag_compiler
//!
//! Ways of running the ZScript compiler over a buffer. Every backend hands
//! back the same thing, a [`CompileOutcome`], so the diagnostic parser does
//! not care which one produced it.

mod process;
mod static_output;

pub use process::{ProcessCompiler, SCRATCH_FILE_NAME, executable_name};
pub use static_output::StaticCompiler;

use async_trait::async_trait;
use zsdiag_core::{CompileOutcome, DiagError};

/// Runs the compiler and captures its output.
#[async_trait]
pub trait CompilerBackend: Send + Sync {
    /// Name used as the default diagnostic source tag.
    fn name(&self) -> &str;

    /// Compiles `source` and returns exit status plus combined output.
    ///
    /// An `Err` means the compiler could not be run at all.
    async fn compile(&self, source: &str) -> Result<CompileOutcome, DiagError>;
}

/// Compiles and turns invocation errors into a failed outcome carrying the
/// error text, so callers always have something to report.
pub async fn compile_or_report(backend: &dyn CompilerBackend, source: &str) -> CompileOutcome {
    match backend.compile(source).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("{} could not be run: {}", backend.name(), e);
            CompileOutcome::failed(e.to_string())
        }
    }
}
