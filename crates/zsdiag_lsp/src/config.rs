//! Configuration management for LSP server.

use tracing::{debug, error, info};

use zsdiag_core::DiagConfig;

use crate::state::BackendState;

/// Reloads configuration from the workspace root and rebuilds the compiler.
pub fn reload_config(state: &BackendState) {
    let root = match state.workspace_root.read() {
        Ok(g) => g.clone(),
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let discovered = root.and_then(|path| DiagConfig::discover(&path));
    let config = match discovered {
        Some(config_path) => {
            info!("Found config file: {}", config_path.display());
            match DiagConfig::from_file(&config_path) {
                Ok(config) => Some(config),
                Err(e) => {
                    error!("Failed to load config: {}", e);
                    None
                }
            }
        }
        None => {
            debug!("No config file found, using defaults");
            Some(DiagConfig::new())
        }
    };

    if let Some(config) = config {
        match state.file_config.write() {
            Ok(mut guard) => {
                *guard = config;
                info!("Loaded configuration from workspace");
            }
            Err(e) => error!("Config lock poisoned: {}", e),
        }
    }

    state.rebuild_compiler();
}
