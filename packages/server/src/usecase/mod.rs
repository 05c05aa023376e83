//! Use case layer.
//!
//! One use case per transport event (connect, join, send, disconnect) plus the
//! room listing and status counters behind the HTTP API. Each connection's events are executed
//! sequentially by its receive loop.

pub mod connect;
pub mod disconnect;
pub mod error;
pub mod join_room;
pub mod list_rooms;
pub mod send_message;
pub mod server_status;

pub use connect::ConnectUseCase;
pub use disconnect::{DisconnectUseCase, LeaveScope};
pub use error::{DisconnectError, JoinRoomError, SendMessageError};
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use list_rooms::ListRoomsUseCase;
pub use send_message::SendMessageUseCase;
pub use server_status::{ServerStatus, ServerStatusUseCase};
