//! UseCase: send a chat message.
//!
//! The message is stamped with the sender's presence record and published to
//! the room named in the request. That room is not checked against the room
//! the sender joined.

use std::sync::Arc;

use crate::domain::{
    BroadcastTarget, ChatEvent, ConnectionId, PresenceRepository, RoomName, RoomTransport,
};

use super::error::SendMessageError;

pub struct SendMessageUseCase {
    repository: Arc<dyn PresenceRepository>,
    transport: Arc<dyn RoomTransport>,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        transport: Arc<dyn RoomTransport>,
    ) -> Self {
        Self {
            repository,
            transport,
        }
    }

    /// Publish `text` to `room` on behalf of `connection_id`.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - number of connections the message reached
    /// * `Err(SendMessageError::NotJoined)` - the sender has no presence
    ///   record; nothing was published
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
        text: String,
    ) -> Result<usize, SendMessageError> {
        let Some(presence) = self.repository.find(&connection_id).await else {
            return Err(SendMessageError::NotJoined(
                connection_id.as_str().to_string(),
            ));
        };

        let event = ChatEvent::from_presence(&presence, text);
        self.transport
            .publish(&BroadcastTarget::Room(room), &event)
            .await
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))
    }
}
