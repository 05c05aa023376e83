//! Data transfer objects.
//!
//! Wire formats for the WebSocket envelope and the HTTP API, plus the
//! conversions from domain models.

pub mod conversion;
pub mod http;
pub mod websocket;
