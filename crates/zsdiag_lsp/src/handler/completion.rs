//! Completion of documented standard-library constants.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use zsdiag_core::ConstantInfo;

use crate::state::BackendState;

/// Handles the `textDocument/completion` request.
pub async fn handle_completion(
    state: &BackendState,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    debug!(
        "Completion request: {}",
        params.text_document_position.text_document.uri
    );

    let Some(installation) = state.effective_config().resolved_installation_folder() else {
        return Ok(None);
    };

    let constants = state.constants.load(&installation);
    let items = constants.iter().map(to_completion_item).collect();
    Ok(Some(CompletionResponse::Array(items)))
}

fn to_completion_item(constant: &ConstantInfo) -> CompletionItem {
    CompletionItem {
        label: constant.name.clone(),
        kind: Some(CompletionItemKind::VARIABLE),
        detail: Some(constant.documentation.clone()),
        documentation: Some(Documentation::String(constant.documentation.clone())),
        ..Default::default()
    }
}
