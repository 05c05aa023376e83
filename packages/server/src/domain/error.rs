//! Domain error types.

use thiserror::Error;

/// Errors raised when constructing value objects from raw input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("invalid display color '{0}': expected '#' followed by 1 to 6 hex digits")]
    InvalidColor(String),
}

/// Errors raised by presence storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("presence record already exists for connection '{0}'")]
    AlreadyPresent(String),
}

/// Errors raised by the transport layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("failed to encode event: {0}")]
    Encode(String),
}
