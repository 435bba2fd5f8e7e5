//! Exercises the backend directly through `LspService::inner`.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tower_lsp::LanguageServer;
use tower_lsp::LspService;
use tower_lsp::lsp_types::*;
use zsdiag_compiler::StaticCompiler;
use zsdiag_core::CompileOutcome;
use zsdiag_lsp::Backend;

fn init_params(options: serde_json::Value) -> InitializeParams {
    InitializeParams {
        initialization_options: Some(options),
        ..Default::default()
    }
}

fn open_params(uri: &Url, text: &str) -> DidOpenTextDocumentParams {
    DidOpenTextDocumentParams {
        text_document: TextDocumentItem {
            uri: uri.clone(),
            language_id: "zscript".to_string(),
            version: 1,
            text: text.to_string(),
        },
    }
}

fn change_params(uri: &Url, version: i32, text: &str) -> DidChangeTextDocumentParams {
    DidChangeTextDocumentParams {
        text_document: VersionedTextDocumentIdentifier {
            uri: uri.clone(),
            version,
        },
        content_changes: vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: text.to_string(),
        }],
    }
}

#[tokio::test]
async fn test_initialize_advertises_capabilities() {
    let (service, _) = LspService::new(Backend::new);

    let result = service
        .inner()
        .initialize(InitializeParams::default())
        .await
        .unwrap();

    let sync = result.capabilities.text_document_sync.unwrap();
    match sync {
        TextDocumentSyncCapability::Options(options) => {
            assert_eq!(options.change, Some(TextDocumentSyncKind::FULL));
            assert_eq!(options.open_close, Some(true));
        }
        other => panic!("unexpected sync capability: {other:?}"),
    }
    assert!(result.capabilities.completion_provider.is_some());
    assert_eq!(result.server_info.unwrap().name, "zsdiag-lsp");
}

#[tokio::test]
async fn test_rapid_changes_compile_once() {
    let compiler = Arc::new(StaticCompiler::new(CompileOutcome::succeeded("")));
    let (service, _) = LspService::new({
        let compiler = compiler.clone();
        move |client| Backend::with_compiler(client, compiler)
    });
    let backend = service.inner();

    backend
        .initialize(init_params(json!({ "debounceMs": 200 })))
        .await
        .unwrap();

    let uri = Url::parse("file:///tmp/scripts/debounce.zs").unwrap();
    for version in 1..=5 {
        backend
            .did_change(change_params(&uri, version, &format!("// v{version}")))
            .await;
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(compiler.calls(), 1);
}

#[tokio::test]
async fn test_open_and_save_compile_immediately() {
    let compiler = Arc::new(StaticCompiler::new(CompileOutcome::succeeded("")));
    let (service, _) = LspService::new({
        let compiler = compiler.clone();
        move |client| Backend::with_compiler(client, compiler)
    });
    let backend = service.inner();
    backend
        .initialize(InitializeParams::default())
        .await
        .unwrap();

    let uri = Url::parse("file:///tmp/scripts/save.zs").unwrap();
    backend.did_open(open_params(&uri, "void run() {}")).await;
    assert_eq!(compiler.calls(), 1);

    backend
        .did_save(DidSaveTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            text: None,
        })
        .await;
    assert_eq!(compiler.calls(), 2);
}

#[tokio::test]
async fn test_configuration_change_revalidates_open_documents() {
    let compiler = Arc::new(StaticCompiler::new(CompileOutcome::succeeded("")));
    let (service, _) = LspService::new({
        let compiler = compiler.clone();
        move |client| Backend::with_compiler(client, compiler)
    });
    let backend = service.inner();
    backend
        .initialize(InitializeParams::default())
        .await
        .unwrap();

    let first = Url::parse("file:///tmp/scripts/a.zs").unwrap();
    let second = Url::parse("file:///tmp/scripts/b.zs").unwrap();
    backend.did_open(open_params(&first, "")).await;
    backend.did_open(open_params(&second, "")).await;
    assert_eq!(compiler.calls(), 2);

    backend
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({ "zscript": { "printCompilerOutput": true } }),
        })
        .await;

    assert_eq!(compiler.calls(), 4);
}

#[tokio::test]
async fn test_completion_lists_std_constants() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("std_zh")).unwrap();
    std::fs::write(
        dir.path().join("std_zh/std_constants.zh"),
        "const int CF_DOOR = 1; // Door combo flag\nconst int NOT_DOCUMENTED = 2;\n",
    )
    .unwrap();

    let (service, _) = LspService::new(Backend::new);
    let backend = service.inner();
    backend
        .initialize(init_params(json!({
            "zscript": { "installationFolder": dir.path() }
        })))
        .await
        .unwrap();

    let response = backend
        .completion(CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier {
                    uri: Url::parse("file:///tmp/scripts/a.zs").unwrap(),
                },
                position: Position::new(0, 0),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();

    let Some(CompletionResponse::Array(items)) = response else {
        panic!("expected completion items");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "CF_DOOR");
    assert_eq!(items[0].kind, Some(CompletionItemKind::VARIABLE));
}

#[tokio::test]
async fn test_completion_without_installation_returns_none() {
    let (service, _) = LspService::new(Backend::new);
    let backend = service.inner();
    backend
        .initialize(InitializeParams::default())
        .await
        .unwrap();

    let response = backend
        .completion(CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier {
                    uri: Url::parse("file:///tmp/scripts/a.zs").unwrap(),
                },
                position: Position::new(0, 0),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();

    assert!(response.is_none());
}
