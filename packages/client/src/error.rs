//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connecting or sending the join failed
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established session to the room dropped
    #[error("Connection to room '{0}' lost")]
    ConnectionLost(String),

    /// An outgoing frame could not be serialized
    #[error("Encode error: {0}")]
    EncodeError(String),
}
