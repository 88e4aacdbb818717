//! WebSocket layer: upgrade handler, connection loop, frame mapping.
//!
//! Served at both `/` and `/ws`. Each text frame is one request; each
//! reply is one text frame.

pub mod connection;
pub mod handler;
pub mod messages;
