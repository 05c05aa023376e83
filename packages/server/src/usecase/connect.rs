//! UseCase: connection opened.

use std::sync::Arc;

use crate::domain::{ConnectionId, PusherChannel, RoomTransport};

/// Registers a new connection with the transport. No presence is created
/// until the connection joins a room.
pub struct ConnectUseCase {
    transport: Arc<dyn RoomTransport>,
}

impl ConnectUseCase {
    pub fn new(transport: Arc<dyn RoomTransport>) -> Self {
        Self { transport }
    }

    pub async fn execute(&self, connection_id: ConnectionId, channel: PusherChannel) {
        tracing::info!("New client connected: {}", connection_id);
        self.transport
            .register_connection(connection_id, channel)
            .await;
    }
}
