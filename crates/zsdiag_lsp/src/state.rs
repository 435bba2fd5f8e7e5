//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;
use tracing::{debug, error};

use zsdiag_compiler::{CompilerBackend, ProcessCompiler};
use zsdiag_core::{ConstantCache, DiagConfig};

/// Document content and version cache.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
}

/// Shared backend state.
pub(crate) struct BackendState {
    /// Document contents cache.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Configuration loaded from the workspace config file.
    pub file_config: RwLock<DiagConfig>,
    /// Settings pushed by the editor, overlaid on `file_config`.
    pub editor_settings: RwLock<Option<serde_json::Value>>,
    /// Compiler backend (None until an installation folder is configured).
    pub compiler: RwLock<Option<Arc<dyn CompilerBackend>>>,
    /// When set, `compiler` is never rebuilt from configuration.
    pub fixed_compiler: bool,
    /// Completion constants per installation.
    pub constants: ConstantCache,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("file_config", &self.file_config)
            .field("compiler", &"<Option<Arc<dyn CompilerBackend>>>")
            .field("fixed_compiler", &self.fixed_compiler)
            .field("workspace_root", &self.workspace_root)
            .finish()
    }
}

impl BackendState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            file_config: RwLock::new(DiagConfig::new()),
            editor_settings: RwLock::new(None),
            compiler: RwLock::new(None),
            fixed_compiler: false,
            constants: ConstantCache::new(),
            workspace_root: RwLock::new(None),
        }
    }

    /// Creates a state that always compiles with `compiler`.
    pub fn with_compiler(compiler: Arc<dyn CompilerBackend>) -> Self {
        Self {
            compiler: RwLock::new(Some(compiler)),
            fixed_compiler: true,
            ..Self::new()
        }
    }

    /// File configuration with editor settings applied.
    pub fn effective_config(&self) -> DiagConfig {
        let mut config = match self.file_config.read() {
            Ok(g) => g.clone(),
            Err(e) => {
                error!("Config lock poisoned: {}", e);
                return DiagConfig::new();
            }
        };

        if let Ok(settings) = self.editor_settings.read()
            && let Some(settings) = settings.as_ref()
            && let Err(e) = config.merge_settings(settings)
        {
            error!("Ignoring editor settings: {}", e);
        }

        config
    }

    /// The current compiler backend, if one is configured.
    pub fn compiler(&self) -> Option<Arc<dyn CompilerBackend>> {
        match self.compiler.read() {
            Ok(g) => g.clone(),
            Err(e) => {
                error!("Compiler lock poisoned: {}", e);
                None
            }
        }
    }

    /// Recreates the compiler backend from the effective configuration.
    pub fn rebuild_compiler(&self) {
        if self.fixed_compiler {
            return;
        }

        let config = self.effective_config();
        let compiler: Option<Arc<dyn CompilerBackend>> =
            if config.resolved_installation_folder().is_none() {
                debug!("No installation folder configured");
                None
            } else {
                match ProcessCompiler::from_config(&config) {
                    Ok(c) => Some(Arc::new(c)),
                    Err(e) => {
                        error!("Failed to set up compiler: {}", e);
                        None
                    }
                }
            };

        match self.compiler.write() {
            Ok(mut guard) => *guard = compiler,
            Err(e) => error!("Compiler lock poisoned: {}", e),
        }
    }

    /// Version of an open document.
    pub fn document_version(&self, uri: &Url) -> Option<i32> {
        let docs = self.documents.read().ok()?;
        docs.get(uri).map(|d| d.version)
    }

    /// Text of an open document.
    pub fn document_text(&self, uri: &Url) -> Option<String> {
        let docs = self.documents.read().ok()?;
        docs.get(uri).map(|d| d.text.clone())
    }

    /// Every open document as `(uri, text, version)`.
    pub fn open_documents(&self) -> Vec<(Url, String, i32)> {
        match self.documents.read() {
            Ok(docs) => docs
                .iter()
                .map(|(uri, doc)| (uri.clone(), doc.text.clone(), doc.version))
                .collect(),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                Vec::new()
            }
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;

#[cfg(test)]
mod tests {
    use super::*;
    use zsdiag_compiler::StaticCompiler;
    use zsdiag_core::CompileOutcome;

    #[test]
    fn test_effective_config_applies_settings() {
        let state = BackendState::new();
        *state.editor_settings.write().unwrap() =
            Some(serde_json::json!({ "installationFolder": "/zc", "debounceMs": 10 }));

        let config = state.effective_config();
        assert_eq!(
            config.installation_folder,
            Some(PathBuf::from("/zc"))
        );
        assert_eq!(config.debounce_ms, 10);
    }

    #[test]
    fn test_invalid_settings_keep_file_config() {
        let state = BackendState::new();
        *state.editor_settings.write().unwrap() = Some(serde_json::json!({ "debounceMs": "x" }));
        assert_eq!(state.effective_config(), DiagConfig::new());
    }

    #[test]
    fn test_rebuild_without_installation_clears_compiler() {
        let state = BackendState::new();
        state.rebuild_compiler();
        assert!(state.compiler().is_none());
    }

    #[test]
    fn test_rebuild_with_installation_creates_compiler() {
        let dir = tempfile::tempdir().unwrap();
        let state = BackendState::new();
        *state.editor_settings.write().unwrap() =
            Some(serde_json::json!({ "installationFolder": dir.path() }));

        state.rebuild_compiler();
        assert!(state.compiler().is_some());
    }

    #[test]
    fn test_fixed_compiler_survives_rebuild() {
        let state = BackendState::with_compiler(Arc::new(StaticCompiler::new(
            CompileOutcome::succeeded(""),
        )));
        state.rebuild_compiler();
        assert!(state.compiler().is_some());
    }
}
