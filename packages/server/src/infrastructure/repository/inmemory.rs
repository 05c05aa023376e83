//! In-memory presence repository.
//!
//! Implements the domain's `PresenceRepository` with a `HashMap` behind an
//! async mutex. Records vanish with the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceRecord, PresenceRepository, RepositoryError};

/// In-memory presence repository
#[derive(Default)]
pub struct InMemoryPresenceRepository {
    records: Mutex<HashMap<ConnectionId, PresenceRecord>>,
}

impl InMemoryPresenceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn find(&self, connection_id: &ConnectionId) -> Option<PresenceRecord> {
        let records = self.records.lock().await;
        records.get(connection_id).cloned()
    }

    async fn insert(
        &self,
        connection_id: ConnectionId,
        record: PresenceRecord,
    ) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;
        if records.contains_key(&connection_id) {
            return Err(RepositoryError::AlreadyPresent(
                connection_id.as_str().to_string(),
            ));
        }
        records.insert(connection_id, record);
        Ok(())
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<PresenceRecord> {
        let mut records = self.records.lock().await;
        records.remove(connection_id)
    }

    async fn count(&self) -> usize {
        let records = self.records.lock().await;
        records.len()
    }
}
