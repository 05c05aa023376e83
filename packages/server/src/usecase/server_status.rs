//! UseCase: report connection counts for the health endpoint.

use std::sync::Arc;

use crate::domain::{PresenceRepository, RoomTransport};

/// Point-in-time counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStatus {
    pub connections: usize,
    pub joined: usize,
}

pub struct ServerStatusUseCase {
    repository: Arc<dyn PresenceRepository>,
    transport: Arc<dyn RoomTransport>,
}

impl ServerStatusUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        transport: Arc<dyn RoomTransport>,
    ) -> Self {
        Self {
            repository,
            transport,
        }
    }

    pub async fn execute(&self) -> ServerStatus {
        ServerStatus {
            connections: self.transport.count_connections().await,
            joined: self.repository.count().await,
        }
    }
}
