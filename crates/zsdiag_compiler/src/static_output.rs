//! A backend that replays canned output.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use zsdiag_core::{CompileOutcome, DiagError};

use crate::CompilerBackend;

/// Returns the same outcome for every run. Used for captured logs and tests.
#[derive(Debug)]
pub struct StaticCompiler {
    name: String,
    outcome: CompileOutcome,
    calls: AtomicUsize,
}

impl StaticCompiler {
    /// Creates a backend that always reports `outcome`.
    pub fn new(outcome: CompileOutcome) -> Self {
        Self {
            name: "zscript".to_string(),
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Overrides the backend name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of completed `compile` calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompilerBackend for StaticCompiler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn compile(&self, _source: &str) -> Result<CompileOutcome, DiagError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome.clone())
    }
}
