//! UseCase: connection closed.
//!
//! The connection is released from the transport first, so it never receives
//! its own leave announcement. If it had joined, its presence record is
//! removed and the departure is announced.
//!
//! Joins are announced to the room, leaves to every connection by default.
//! `LeaveScope::Room` announces the leave to the joined room instead.

use std::{fmt, str::FromStr, sync::Arc};

use crate::domain::{
    BroadcastTarget, ChatEvent, ConnectionId, PresenceRecord, PresenceRepository, RoomTransport,
};

use super::error::DisconnectError;

/// Recipients of leave announcements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaveScope {
    /// Every connected client
    #[default]
    Global,
    /// Members of the room the departing connection joined
    Room,
}

impl FromStr for LeaveScope {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "room" => Ok(Self::Room),
            other => Err(format!(
                "unknown leave scope '{}' (expected 'global' or 'room')",
                other
            )),
        }
    }
}

impl fmt::Display for LeaveScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Room => f.write_str("room"),
        }
    }
}

pub struct DisconnectUseCase {
    repository: Arc<dyn PresenceRepository>,
    transport: Arc<dyn RoomTransport>,
    leave_scope: LeaveScope,
}

impl DisconnectUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        transport: Arc<dyn RoomTransport>,
        leave_scope: LeaveScope,
    ) -> Self {
        Self {
            repository,
            transport,
            leave_scope,
        }
    }

    /// Release the connection and announce the departure.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - the connection had joined; one leave announcement was published
    /// * `Ok(None)` - the connection never joined; nothing was published
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Option<PresenceRecord>, DisconnectError> {
        self.transport.unregister_connection(&connection_id).await;

        let Some(record) = self.repository.remove(&connection_id).await else {
            tracing::info!("Client disconnected: {}", connection_id);
            return Ok(None);
        };

        let target = match self.leave_scope {
            LeaveScope::Global => BroadcastTarget::All,
            LeaveScope::Room => BroadcastTarget::Room(record.room.clone()),
        };
        self.transport
            .publish(&target, &ChatEvent::left(&record.display_name))
            .await
            .map_err(|e| DisconnectError::BroadcastFailed(e.to_string()))?;

        tracing::info!(
            "Client disconnected: {} ('{}' left room '{}')",
            connection_id,
            record.display_name,
            record.room
        );

        Ok(Some(record))
    }
}
