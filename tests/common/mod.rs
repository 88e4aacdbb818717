//! Shared helpers for integration tests: stub tools and a live server.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use sim_gateway::app_state::AppState;
use sim_gateway::domain::CommandSpec;
use sim_gateway::server;
use sim_gateway::service::{DispatchService, ProcessRunner};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Runs one of the shell scripts under `tests/fixtures`.
pub fn fixture(name: &str) -> CommandSpec {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    CommandSpec::new("sh", [path])
}

/// A command that cannot be spawned.
pub fn missing() -> CommandSpec {
    CommandSpec::new("/definitely/not/a/tool", Vec::<String>::new())
}

/// Starts a server on an ephemeral port and returns its address.
pub async fn spawn_server(randomize: CommandSpec, simulate: CommandSpec) -> SocketAddr {
    let service = DispatchService::new(randomize, simulate, ProcessRunner::new());
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(server::serve(listener, AppState::new(service)));
    addr
}

/// Opens a websocket client to `path` on the server.
pub async fn connect(addr: SocketAddr, path: &str) -> Client {
    let url = format!("ws://{addr}{path}");
    let Ok((ws, _resp)) = tokio_tungstenite::connect_async(&url).await else {
        panic!("handshake with {url} failed");
    };
    ws
}

/// Sends one frame without waiting for the reply.
pub async fn send(ws: &mut Client, body: &str) {
    if let Err(e) = ws.send(Message::text(body)).await {
        panic!("send failed: {e}");
    }
}

/// Reads the next text frame.
pub async fn recv(ws: &mut Client) -> String {
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => return text.as_str().to_owned(),
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            other => panic!("expected text frame, got {other:?}"),
        }
    }
}

/// Sends one request and waits for its reply.
pub async fn request(ws: &mut Client, body: &str) -> String {
    send(ws, body).await;
    recv(ws).await
}

/// Parses a reply as JSON.
pub fn json(text: &str) -> serde_json::Value {
    let Ok(value) = serde_json::from_str(text) else {
        panic!("reply is not JSON: {text}");
    };
    value
}
