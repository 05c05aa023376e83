//! Transport interface.
//!
//! ## Responsibilities
//!
//! - Keep the outbound channel of each live connection
//! - Keep the room subscription table
//! - Deliver chat events to a room or to every connection
//!
//! The WebSocket upgrade itself happens in the UI layer, which hands the
//! resulting channel to `register_connection`.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatEvent, ConnectionId, RoomName, RoomSummary, TransportError};

/// Outbound channel of one connection (serialized frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Recipients of a publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastTarget {
    /// Every current subscriber of the room
    Room(RoomName),
    /// Every registered connection
    All,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomTransport: Send + Sync {
    async fn register_connection(&self, connection_id: ConnectionId, channel: PusherChannel);

    /// Drop the connection's channel and remove it from every room
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// Add a registered connection to a room's recipient set
    async fn subscribe(
        &self,
        connection_id: &ConnectionId,
        room: &RoomName,
    ) -> Result<(), TransportError>;

    /// Deliver `event` to `target`, returning the number of recipients reached.
    ///
    /// A room with no members is not an error.
    async fn publish(
        &self,
        target: &BroadcastTarget,
        event: &ChatEvent,
    ) -> Result<usize, TransportError>;

    /// Rooms with at least one member, ordered by name
    async fn rooms(&self) -> Vec<RoomSummary>;

    /// Number of registered connections
    async fn count_connections(&self) -> usize;
}
