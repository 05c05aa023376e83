//! WebSocket transport.
//!
//! ## Responsibilities
//!
//! - Manage the `UnboundedSender` of each WebSocket connection
//! - Maintain the room subscription table
//! - Encode chat events and push them to recipients
//!
//! Accepting the WebSocket and spawning its writer task happens in the UI layer
//! (`ui/handler/websocket.rs`); this type only sees the channel.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        BroadcastTarget, ChatEvent, ConnectionId, PusherChannel, RoomName, RoomSummary,
        RoomTransport, TransportError,
    },
    infrastructure::dto::conversion::encode_chat_event,
};

#[derive(Default)]
struct Registry {
    connections: HashMap<ConnectionId, PusherChannel>,
    /// Empty rooms are removed eagerly
    rooms: BTreeMap<RoomName, BTreeSet<ConnectionId>>,
}

/// `RoomTransport` over WebSocket writer channels
#[derive(Default)]
pub struct WebSocketTransport {
    registry: Mutex<Registry>,
}

impl WebSocketTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomTransport for WebSocketTransport {
    async fn register_connection(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut registry = self.registry.lock().await;
        tracing::debug!("Connection '{}' registered to transport", connection_id);
        registry.connections.insert(connection_id, channel);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.connections.remove(connection_id);
        registry.rooms.retain(|room, members| {
            if members.remove(connection_id) {
                tracing::debug!("Connection '{}' left room '{}'", connection_id, room);
            }
            !members.is_empty()
        });
        tracing::debug!("Connection '{}' unregistered from transport", connection_id);
    }

    async fn subscribe(
        &self,
        connection_id: &ConnectionId,
        room: &RoomName,
    ) -> Result<(), TransportError> {
        let mut registry = self.registry.lock().await;
        if !registry.connections.contains_key(connection_id) {
            return Err(TransportError::ConnectionNotFound(
                connection_id.as_str().to_string(),
            ));
        }
        registry
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(connection_id.clone());
        tracing::debug!("Connection '{}' subscribed to room '{}'", connection_id, room);
        Ok(())
    }

    async fn publish(
        &self,
        target: &BroadcastTarget,
        event: &ChatEvent,
    ) -> Result<usize, TransportError> {
        let frame = encode_chat_event(event).map_err(|e| TransportError::Encode(e.to_string()))?;
        let registry = self.registry.lock().await;

        let recipients: Vec<&ConnectionId> = match target {
            BroadcastTarget::Room(room) => registry
                .rooms
                .get(room)
                .map(|members| members.iter().collect())
                .unwrap_or_default(),
            BroadcastTarget::All => registry.connections.keys().collect(),
        };

        let mut delivered = 0;
        for recipient in recipients {
            let Some(sender) = registry.connections.get(recipient) else {
                tracing::warn!("Connection '{}' not found during publish, skipping", recipient);
                continue;
            };
            // Partial failure is tolerated during publish
            if let Err(e) = sender.send(frame.clone()) {
                tracing::warn!("Failed to push event to connection '{}': {}", recipient, e);
            } else {
                delivered += 1;
            }
        }

        tracing::debug!("Published event to {:?} ({} recipients)", target, delivered);
        Ok(delivered)
    }

    async fn rooms(&self) -> Vec<RoomSummary> {
        let registry = self.registry.lock().await;
        registry
            .rooms
            .iter()
            .map(|(name, members)| RoomSummary {
                name: name.clone(),
                members: members.len(),
            })
            .collect()
    }

    async fn count_connections(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.connections.len()
    }
}
