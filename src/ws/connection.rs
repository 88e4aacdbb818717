//! Per-connection request/response loop.
//!
//! Each websocket connection runs in its own task. Frames are handled
//! strictly one at a time: the reply to request N is sent before request
//! N+1 is read. Other connections keep running while this one waits on a
//! child process.

use std::sync::Arc;

use axum::extract::ws::WebSocket;
use futures_util::{SinkExt, StreamExt};

use super::messages::{Inbound, response_frame};
use crate::service::DispatchService;

/// Runs the read/dispatch/reply loop for a single websocket connection.
///
/// Every request gets exactly one reply: the tool's stdout on success,
/// an error frame otherwise. Errors never close the connection; the loop
/// ends when the peer closes or a send fails.
pub async fn run_connection(socket: WebSocket, service: Arc<DispatchService>) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    while let Some(msg) = ws_rx.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "ws receive failed");
                break;
            }
        };

        let body = match Inbound::from(msg) {
            Inbound::Request(body) => body,
            Inbound::Close => break,
            Inbound::Ignore => continue,
        };

        let result = match body {
            Ok(text) => service.handle_frame(&text).await,
            Err(e) => Err(e),
        };

        if let Err(err) = &result {
            if err.is_client_error() {
                tracing::info!(error = %err, "rejected request");
            } else {
                tracing::error!(error = %err, "request failed");
            }
        }

        if ws_tx.send(response_frame(&result)).await.is_err() {
            break;
        }
    }

    tracing::debug!("ws connection closed");
}
