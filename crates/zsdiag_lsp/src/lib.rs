//! zsdiag LSP Server
//!
//! Language Server Protocol implementation that compiles ZScript buffers
//! with the configured compiler and publishes its diagnostics.

mod config;
mod conversion;
mod debounce;
mod handler;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info};

use zsdiag_compiler::{CompilerBackend, compile_or_report};
use zsdiag_core::DiagnosticParser;

use crate::conversion::{missing_installation_diagnostic, to_lsp_diagnostic};
use crate::debounce::spawn_debounced_validation;
use crate::state::{BackendState, SharedState};

pub use conversion::MISSING_INSTALLATION_MESSAGE;

/// The LSP backend.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend; the compiler is set up from configuration.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
        }
    }

    /// Creates a backend that always compiles with `compiler`.
    pub fn with_compiler(client: Client, compiler: Arc<dyn CompilerBackend>) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::with_compiler(compiler)),
        }
    }

    /// Compiles a document and publishes its diagnostics.
    ///
    /// Each publish replaces the document's previous diagnostics.
    async fn validate_document(&self, uri: &Url, text: &str, version: Option<i32>) {
        debug!("Validating document: {}", uri);

        let Some(compiler) = self.state.compiler() else {
            self.client
                .publish_diagnostics(uri.clone(), vec![missing_installation_diagnostic()], version)
                .await;
            return;
        };

        let config = self.state.effective_config();
        let parser = DiagnosticParser::new(config.parser_config(compiler.name()));
        let outcome = compile_or_report(compiler.as_ref(), text).await;
        let parsed = parser.parse_run(&outcome);

        if let Some(version) = version
            && self.state.document_version(uri) != Some(version)
        {
            debug!("Discarding diagnostics for outdated version of {}", uri);
            return;
        }

        let diagnostics: Vec<Diagnostic> = parsed.diagnostics.iter().map(to_lsp_diagnostic).collect();

        self.client
            .publish_diagnostics(uri.clone(), diagnostics, version)
            .await;
    }

    fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.state.effective_config().debounce_ms)
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let (uri, text, version) = handler::handle_did_open(&self.state, params).await;
        self.validate_document(&uri, &text, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some((uri, text, version)) = handler::handle_did_change(&self.state, params).await {
            let backend = self.clone();
            spawn_debounced_validation(
                self.state.clone(),
                uri,
                text,
                version,
                self.debounce_delay(),
                move |uri, text, version| async move {
                    backend.validate_document(&uri, &text, version).await;
                },
            );
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if let Some((uri, text, version)) = handler::handle_did_save(&self.state, params).await {
            self.validate_document(&uri, &text, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = handler::handle_did_close(&self.state, params).await;
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let documents = handler::handle_did_change_configuration(&self.state, params).await;
        for (uri, text, version) in documents {
            self.validate_document(&uri, &text, Some(version)).await;
        }
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        if handler::handle_did_change_watched_files(&self.state, params).await {
            for (uri, text, version) in self.state.open_documents() {
                self.validate_document(&uri, &text, Some(version)).await;
            }
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        handler::handle_completion(&self.state, params).await
    }
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("zsdiag LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
