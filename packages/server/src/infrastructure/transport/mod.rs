//! Transport implementations.
//!
//! - `websocket`: per-connection `mpsc` channels drained by WebSocket writer tasks

pub mod websocket;

pub use websocket::WebSocketTransport;
