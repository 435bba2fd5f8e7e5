//! Error types.
//!
//! Extraction itself never fails; these cover configuration loading and
//! compiler invocation.

use thiserror::Error;

/// Errors that can occur around a diagnostics run.
#[derive(Debug, Error)]
pub enum DiagError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The compiler could not be invoked.
    #[error("Compiler error: {0}")]
    Compiler(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DiagError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a compiler invocation error.
    pub fn compiler(message: impl Into<String>) -> Self {
        Self::Compiler(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
