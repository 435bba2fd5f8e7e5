//! Drives the server over the wire and checks published diagnostics.

mod common;

use std::sync::Arc;

use common::{recv_msg, send_msg, wait_for};
use tokio::sync::mpsc::UnboundedReceiver;
use tower_lsp::{LspService, Server};
use zsdiag_compiler::StaticCompiler;
use zsdiag_core::CompileOutcome;
use zsdiag_lsp::{Backend, MISSING_INSTALLATION_MESSAGE};

const STRUCTURED_LOG: &str = "Pass 1: Parsing\n\
    tmp.zs Line 3 @ Columns 5-12 - Error S009: Variable 'y' is undeclared.\n\
    tmp.zs Line 7 @ Columns 1-4 - Warning S094: Function 'Trace' is deprecated.\n";

/// Starts a server and returns a writer plus a channel of server messages.
fn start(
    service: LspService<Backend>,
    socket: tower_lsp::ClientSocket,
) -> (tokio::io::DuplexStream, UnboundedReceiver<String>) {
    let (client_read, server_write) = tokio::io::duplex(1 << 16);
    let (server_read, client_write) = tokio::io::duplex(1 << 16);

    tokio::spawn(async move {
        Server::new(server_read, server_write, socket)
            .serve(service)
            .await;
    });

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut reader = tokio::io::BufReader::new(client_read);
        while let Some(msg) = recv_msg(&mut reader).await {
            if tx.send(msg).is_err() {
                break;
            }
        }
    });

    (client_write, rx)
}

async fn initialize(writer: &mut tokio::io::DuplexStream, rx: &mut UnboundedReceiver<String>) {
    let init_req =
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"capabilities":{}}}"#;
    send_msg(writer, init_req).await;
    wait_for(rx, r#""id":1"#)
        .await
        .expect("no initialize response");

    send_msg(
        writer,
        r#"{"jsonrpc":"2.0","method":"initialized","params":{}}"#,
    )
    .await;
}

async fn open(writer: &mut tokio::io::DuplexStream, uri: &str, text: &str) {
    let did_open = serde_json::json!({
        "jsonrpc": "2.0",
        "method": "textDocument/didOpen",
        "params": {
            "textDocument": {
                "uri": uri,
                "languageId": "zscript",
                "version": 1,
                "text": text,
            }
        }
    });
    send_msg(writer, &did_open.to_string()).await;
}

fn published_diagnostics(msg: &str) -> Vec<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(msg).unwrap();
    value["params"]["diagnostics"].as_array().unwrap().clone()
}

#[tokio::test]
async fn publishes_compiler_diagnostics_on_open() {
    let compiler = Arc::new(StaticCompiler::new(CompileOutcome::failed(STRUCTURED_LOG)));
    let (service, socket) =
        LspService::new(move |client| Backend::with_compiler(client, compiler));
    let (mut writer, mut rx) = start(service, socket);

    initialize(&mut writer, &mut rx).await;
    open(&mut writer, "file:///tmp/scripts/items.zs", "void run() {}").await;

    let msg = wait_for(&mut rx, "textDocument/publishDiagnostics")
        .await
        .expect("no diagnostics published");
    let diagnostics = published_diagnostics(&msg);

    assert_eq!(diagnostics.len(), 2);

    assert_eq!(diagnostics[0]["severity"], 1);
    assert_eq!(
        diagnostics[0]["message"],
        "Error S009: Variable 'y' is undeclared."
    );
    assert_eq!(diagnostics[0]["range"]["start"]["line"], 2);
    assert_eq!(diagnostics[0]["range"]["start"]["character"], 4);
    assert_eq!(diagnostics[0]["range"]["end"]["character"], 11);
    assert_eq!(diagnostics[0]["source"], "zscript");

    assert_eq!(diagnostics[1]["severity"], 2);
    assert_eq!(diagnostics[1]["range"]["start"]["line"], 6);
}

#[tokio::test]
async fn reports_raw_output_when_failed_run_has_no_diagnostics() {
    let compiler = Arc::new(StaticCompiler::new(CompileOutcome::failed(
        "Pass 1: Parsing\nAborted (core dumped)\n",
    )));
    let (service, socket) =
        LspService::new(move |client| Backend::with_compiler(client, compiler));
    let (mut writer, mut rx) = start(service, socket);

    initialize(&mut writer, &mut rx).await;
    open(&mut writer, "file:///tmp/scripts/crash.zs", "").await;

    let msg = wait_for(&mut rx, "textDocument/publishDiagnostics")
        .await
        .expect("no diagnostics published");
    let diagnostics = published_diagnostics(&msg);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0]["message"],
        "Pass 1: Parsing\nAborted (core dumped)\n"
    );
    assert_eq!(diagnostics[0]["severity"], 1);
}

#[tokio::test]
async fn asks_for_installation_folder_when_unconfigured() {
    let (service, socket) = LspService::new(Backend::new);
    let (mut writer, mut rx) = start(service, socket);

    initialize(&mut writer, &mut rx).await;
    open(&mut writer, "file:///tmp/scripts/a.zs", "void run() {}").await;

    let msg = wait_for(&mut rx, "textDocument/publishDiagnostics")
        .await
        .expect("no diagnostics published");
    let diagnostics = published_diagnostics(&msg);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["message"], MISSING_INSTALLATION_MESSAGE);
    assert_eq!(diagnostics[0]["source"], "extension");
}

#[tokio::test]
async fn clears_diagnostics_on_close() {
    let compiler = Arc::new(StaticCompiler::new(CompileOutcome::failed(STRUCTURED_LOG)));
    let (service, socket) =
        LspService::new(move |client| Backend::with_compiler(client, compiler));
    let (mut writer, mut rx) = start(service, socket);

    initialize(&mut writer, &mut rx).await;
    open(&mut writer, "file:///tmp/scripts/b.zs", "").await;
    wait_for(&mut rx, "textDocument/publishDiagnostics")
        .await
        .expect("no diagnostics published");

    send_msg(
        &mut writer,
        r#"{"jsonrpc":"2.0","method":"textDocument/didClose","params":{"textDocument":{"uri":"file:///tmp/scripts/b.zs"}}}"#,
    )
    .await;

    let msg = wait_for(&mut rx, "textDocument/publishDiagnostics")
        .await
        .expect("no diagnostics published");
    assert!(published_diagnostics(&msg).is_empty());
}

#[tokio::test]
async fn frames_round_trip_through_helpers() {
    let payload = r#"{"jsonrpc":"2.0","method":"initialized","params":{}}"#;
    let mut framed = Vec::new();
    send_msg(&mut framed, payload).await;

    let mut reader = framed.as_slice();
    assert_eq!(recv_msg(&mut reader).await.as_deref(), Some(payload));
    assert_eq!(recv_msg(&mut reader).await, None);
}
