//! Use case error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("failed to subscribe to room: {0}")]
    SubscribeFailed(String),

    #[error("failed to broadcast join announcement: {0}")]
    BroadcastFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// The sender never joined a room; the message is dropped
    #[error("connection '{0}' has not joined a room")]
    NotJoined(String),

    #[error("failed to broadcast message: {0}")]
    BroadcastFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("failed to broadcast leave announcement: {0}")]
    BroadcastFailed(String),
}
