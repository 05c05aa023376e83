//! Request handlers.

mod http;
mod websocket;

pub use http::{get_rooms, health_check, root};
pub use websocket::websocket_handler;
