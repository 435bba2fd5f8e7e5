//! Document lifecycle handlers (open, change, save, close).

use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use crate::state::{BackendState, DocumentData};

/// Caches the latest text of a document.
fn remember(state: &BackendState, uri: &Url, text: &str, version: i32) {
    match state.documents.write() {
        Ok(mut docs) => {
            docs.insert(
                uri.clone(),
                DocumentData {
                    text: text.to_string(),
                    version,
                },
            );
        }
        Err(e) => error!("Documents lock poisoned: {}", e),
    }
}

/// Handles `textDocument/didOpen`. The document is compiled right away.
pub async fn handle_did_open(
    state: &BackendState,
    params: DidOpenTextDocumentParams,
) -> (Url, String, Option<i32>) {
    let TextDocumentItem {
        uri, text, version, ..
    } = params.text_document;
    debug!("Opened {} (v{})", uri, version);

    remember(state, &uri, &text, version);
    (uri, text, Some(version))
}

/// Handles `textDocument/didChange`.
///
/// Sync is FULL, so the first change carries the whole buffer. Returns what
/// the debounced validation needs.
pub async fn handle_did_change(
    state: &BackendState,
    params: DidChangeTextDocumentParams,
) -> Option<(Url, String, i32)> {
    let VersionedTextDocumentIdentifier { uri, version } = params.text_document;
    let text = params.content_changes.into_iter().next()?.text;
    debug!("Changed {} (v{})", uri, version);

    remember(state, &uri, &text, version);
    Some((uri, text, version))
}

/// Handles `textDocument/didSave`.
///
/// Prefers the saved text sent by the client over the cached copy.
pub async fn handle_did_save(
    state: &BackendState,
    params: DidSaveTextDocumentParams,
) -> Option<(Url, String, Option<i32>)> {
    let uri = params.text_document.uri;
    debug!("Saved {}", uri);

    let version = state.document_version(&uri);
    let text = params.text.or_else(|| state.document_text(&uri))?;
    Some((uri, text, version))
}

/// Handles `textDocument/didClose`. The caller clears the published diagnostics.
pub async fn handle_did_close(state: &BackendState, params: DidCloseTextDocumentParams) -> Url {
    let uri = params.text_document.uri;
    debug!("Closed {}", uri);

    match state.documents.write() {
        Ok(mut docs) => {
            docs.remove(&uri);
        }
        Err(e) => error!("Documents lock poisoned: {}", e),
    }
    uri
}
