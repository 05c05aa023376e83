//! Presence repository interface.
//!
//! The use cases depend on this trait only; the infrastructure layer provides
//! the storage.

use async_trait::async_trait;

use super::{ConnectionId, PresenceRecord, RepositoryError};

/// Storage of presence records keyed by connection identifier
///
/// Each method is atomic with respect to the others, so check-and-insert
/// never races for a given identifier.
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// Look up the record of a connection
    async fn find(&self, connection_id: &ConnectionId) -> Option<PresenceRecord>;

    /// Store a record; fails if the connection already has one
    async fn insert(
        &self,
        connection_id: ConnectionId,
        record: PresenceRecord,
    ) -> Result<(), RepositoryError>;

    /// Remove and return the record of a connection, if any
    async fn remove(&self, connection_id: &ConnectionId) -> Option<PresenceRecord>;

    /// Number of connections holding a record
    async fn count(&self) -> usize;
}
