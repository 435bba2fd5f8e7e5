//! CLI utility functions

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::info;
use zsdiag_core::DiagConfig;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads the explicit config file, or the nearest one above the working directory.
pub fn load_config(path: Option<&Path>) -> Result<DiagConfig> {
    if let Some(path) = path {
        return DiagConfig::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    if let Some(path) = DiagConfig::discover(&cwd) {
        info!("Using config: {}", path.display());
        return DiagConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(DiagConfig::new())
}
