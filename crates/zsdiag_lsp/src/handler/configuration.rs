//! Editor settings handler.

use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use crate::state::BackendState;

/// Settings section the editor sends our configuration under.
pub const SETTINGS_SECTION: &str = "zscript";

/// Handles the `workspace/didChangeConfiguration` notification.
///
/// Stores the new settings, rebuilds the compiler and returns every open
/// document for revalidation.
pub async fn handle_did_change_configuration(
    state: &BackendState,
    params: DidChangeConfigurationParams,
) -> Vec<(Url, String, i32)> {
    debug!("Configuration changed: {}", params.settings);

    let settings = extract_section(params.settings);
    match state.editor_settings.write() {
        Ok(mut guard) => *guard = settings,
        Err(e) => {
            error!("Settings lock poisoned: {}", e);
            return Vec::new();
        }
    }

    state.rebuild_compiler();
    state.open_documents()
}

/// Picks our section out of a settings payload.
///
/// Clients send either `{ "zscript": { ... } }` or the section itself.
pub(crate) fn extract_section(settings: serde_json::Value) -> Option<serde_json::Value> {
    match settings {
        serde_json::Value::Null => None,
        serde_json::Value::Object(mut map) if map.contains_key(SETTINGS_SECTION) => {
            map.remove(SETTINGS_SECTION)
        }
        other => Some(other),
    }
}
