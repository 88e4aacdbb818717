//! # sim-gateway
//!
//! WebSocket gateway in front of two external command-line tools: a
//! *randomization* tool and a *simulation* tool.
//!
//! Each websocket frame carries one JSON request whose `type` selects the
//! tool. The gateway spawns the tool, feeds simulation requests (tagged
//! with a fresh `id`) to its stdin, and sends whatever the tool printed on
//! stdout back as the reply. Failures are answered with a structured error
//! frame; the connection stays open.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, HTTP)
//!     │
//!     ├── WS Handler (ws/)          one task per connection
//!     ├── System endpoints (api/)
//!     │
//!     ├── DispatchService (service/)
//!     │       └── Dispatch::from_frame (domain/)
//!     │
//!     └── ProcessRunner (service/)  ──► randomize / simulate
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
