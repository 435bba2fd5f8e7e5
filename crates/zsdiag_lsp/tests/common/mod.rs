#![allow(dead_code)]

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;

/// Writes one framed JSON-RPC message.
pub async fn send_msg<W: AsyncWrite + Unpin>(writer: &mut W, msg: &str) {
    let framed = format!("Content-Length: {}\r\n\r\n{}", msg.len(), msg);
    writer.write_all(framed.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

/// Reads one framed JSON-RPC message. `None` at end of stream.
pub async fn recv_msg<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<String> {
    let mut length = None;

    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).await.ok()? == 0 {
            return None;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            let value = value.trim();
            length = Some(
                value
                    .parse::<usize>()
                    .unwrap_or_else(|e| panic!("bad Content-Length {value:?}: {e}")),
            );
        }
    }

    let mut body = vec![0u8; length?];
    reader.read_exact(&mut body).await.ok()?;
    Some(String::from_utf8(body).unwrap())
}

/// Waits for the first message containing `needle`, skipping everything else.
pub async fn wait_for(rx: &mut UnboundedReceiver<String>, needle: &str) -> Option<String> {
    let deadline = tokio::time::sleep(Duration::from_secs(5));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(msg) if msg.contains(needle) => return Some(msg),
                Some(_) => continue,
                None => return None,
            },
            _ = &mut deadline => return None,
        }
    }
}
