//! UseCase: join a room.
//!
//! ## Behavior
//!
//! - The first join of a connection creates its presence record, subscribes it
//!   to the room and announces it to the room (the joiner included).
//! - Any later join of the same connection is a no-op, whatever room or
//!   username it names. A connection stays bound to its first room and name.

use std::sync::Arc;

use crate::domain::{
    BroadcastTarget, ChatEvent, ColorGenerator, ConnectionId, DisplayName, PresenceRecord,
    PresenceRepository, RoomName, RoomTransport,
};

use super::error::JoinRoomError;

/// Result of a join request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A presence record was created and the join announced
    Joined(PresenceRecord),
    /// The connection already had a presence record; nothing changed
    AlreadyJoined,
}

pub struct JoinRoomUseCase {
    repository: Arc<dyn PresenceRepository>,
    transport: Arc<dyn RoomTransport>,
    colors: Arc<dyn ColorGenerator>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        transport: Arc<dyn RoomTransport>,
        colors: Arc<dyn ColorGenerator>,
    ) -> Self {
        Self {
            repository,
            transport,
            colors,
        }
    }

    /// Join `room` as `username` (a guest name is synthesized when empty).
    ///
    /// # Errors
    ///
    /// * `SubscribeFailed` - the connection is not registered with the
    ///   transport; the presence record is rolled back
    /// * `BroadcastFailed` - the announcement could not be encoded; the join
    ///   itself stands
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room: RoomName,
        username: Option<String>,
    ) -> Result<JoinOutcome, JoinRoomError> {
        if self.repository.find(&connection_id).await.is_some() {
            tracing::debug!(
                "Connection '{}' already joined; ignoring join to '{}'",
                connection_id,
                room
            );
            return Ok(JoinOutcome::AlreadyJoined);
        }

        let display_name = DisplayName::resolve(username.as_deref(), &connection_id);
        let record = PresenceRecord::new(display_name, self.colors.generate(), room.clone());

        if self
            .repository
            .insert(connection_id.clone(), record.clone())
            .await
            .is_err()
        {
            return Ok(JoinOutcome::AlreadyJoined);
        }

        if let Err(e) = self.transport.subscribe(&connection_id, &room).await {
            self.repository.remove(&connection_id).await;
            return Err(JoinRoomError::SubscribeFailed(e.to_string()));
        }

        tracing::info!(
            "'{}' ({}) joined room '{}' with color {}",
            record.display_name,
            connection_id,
            room,
            record.display_color
        );

        self.transport
            .publish(
                &BroadcastTarget::Room(room),
                &ChatEvent::joined(&record.display_name),
            )
            .await
            .map_err(|e| JoinRoomError::BroadcastFailed(e.to_string()))?;

        Ok(JoinOutcome::Joined(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            DisplayColor, TransportError, color::MockColorGenerator,
            transport::MockRoomTransport,
        },
        infrastructure::{
            dto::websocket::ServerEvent, repository::InMemoryPresenceRepository,
            transport::WebSocketTransport,
        },
    };
    use tokio::sync::mpsc;

    // ========================================
    // What is covered
    // ========================================
    // - first join: record, subscription, room-scoped announcement
    // - guest name synthesis
    // - repeated join is a no-op (no new record, no second announcement)
    // - rollback when subscription fails
    // ========================================

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn room(value: &str) -> RoomName {
        RoomName::new(value.to_string())
    }

    fn fixed_colors(rgb: u32) -> Arc<MockColorGenerator> {
        let mut colors = MockColorGenerator::new();
        colors
            .expect_generate()
            .returning(move || DisplayColor::from_rgb(rgb));
        Arc::new(colors)
    }

    fn decode(frame: String) -> ChatEvent {
        let ServerEvent::Message(dto) = serde_json::from_str::<ServerEvent>(&frame).unwrap();
        dto.into()
    }

    struct Fixture {
        repository: Arc<InMemoryPresenceRepository>,
        transport: Arc<WebSocketTransport>,
        usecase: JoinRoomUseCase,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryPresenceRepository::new());
        let transport = Arc::new(WebSocketTransport::new());
        let usecase = JoinRoomUseCase::new(
            repository.clone(),
            transport.clone(),
            fixed_colors(0xa1b2c3),
        );
        Fixture {
            repository,
            transport,
            usecase,
        }
    }

    async fn connect(
        transport: &WebSocketTransport,
        value: &str,
    ) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        transport.register_connection(id(value), tx).await;
        rx
    }

    #[tokio::test]
    async fn test_first_join_creates_record_and_announces_to_room() {
        // given: bob already sits in "general", carol in "random"
        let f = fixture();
        let mut alice_rx = connect(&f.transport, "alice-conn").await;
        let mut bob_rx = connect(&f.transport, "bob-conn").await;
        let mut carol_rx = connect(&f.transport, "carol-conn").await;
        f.transport.subscribe(&id("bob-conn"), &room("general")).await.unwrap();
        f.transport.subscribe(&id("carol-conn"), &room("random")).await.unwrap();

        // when:
        let outcome = f
            .usecase
            .execute(id("alice-conn"), room("general"), Some("alice".to_string()))
            .await
            .unwrap();

        // then: the record is stored with the generated color
        let JoinOutcome::Joined(record) = outcome else {
            panic!("expected a fresh join");
        };
        assert_eq!(record.display_name.as_str(), "alice");
        assert_eq!(record.display_color.as_str(), "#a1b2c3");
        assert_eq!(f.repository.find(&id("alice-conn")).await, Some(record));

        // and: both room members (joiner included) get the announcement
        let expected = ChatEvent {
            username: "Admin".to_string(),
            color: "#000000".to_string(),
            text: "alice has joined the room.".to_string(),
        };
        assert_eq!(decode(alice_rx.recv().await.unwrap()), expected);
        assert_eq!(decode(bob_rx.recv().await.unwrap()), expected);
        assert!(carol_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_without_username_uses_guest_name() {
        // given:
        let f = fixture();
        let mut rx = connect(&f.transport, "k3j9xq0wz").await;

        // when:
        f.usecase
            .execute(id("k3j9xq0wz"), room("general"), None)
            .await
            .unwrap();

        // then:
        let record = f.repository.find(&id("k3j9xq0wz")).await.unwrap();
        assert_eq!(record.display_name.as_str(), "Guest_k3j9x");
        assert_eq!(
            decode(rx.recv().await.unwrap()).text,
            "Guest_k3j9x has joined the room."
        );
    }

    #[tokio::test]
    async fn test_join_with_empty_username_uses_guest_name() {
        let f = fixture();
        let _rx = connect(&f.transport, "abcdefgh").await;

        f.usecase
            .execute(id("abcdefgh"), room("general"), Some(String::new()))
            .await
            .unwrap();

        let record = f.repository.find(&id("abcdefgh")).await.unwrap();
        assert_eq!(record.display_name.as_str(), "Guest_abcde");
    }

    #[tokio::test]
    async fn test_join_empty_room_name() {
        // given:
        let f = fixture();
        let mut rx = connect(&f.transport, "alice-conn").await;

        // when:
        let outcome = f
            .usecase
            .execute(id("alice-conn"), room(""), Some("alice".to_string()))
            .await
            .unwrap();

        // then: "" is a room like any other
        assert!(matches!(outcome, JoinOutcome::Joined(_)));
        assert_eq!(
            decode(rx.recv().await.unwrap()).text,
            "alice has joined the room."
        );
        let rooms = f.transport.rooms().await;
        assert_eq!(rooms[0].name.as_str(), "");
        assert_eq!(rooms[0].members, 1);
    }

    #[tokio::test]
    async fn test_second_join_is_noop() {
        // given: alice joined "general"
        let f = fixture();
        let mut rx = connect(&f.transport, "alice-conn").await;
        f.usecase
            .execute(id("alice-conn"), room("general"), Some("alice".to_string()))
            .await
            .unwrap();
        let first = f.repository.find(&id("alice-conn")).await.unwrap();
        rx.recv().await.unwrap();

        // when: she joins another room under another name
        let outcome = f
            .usecase
            .execute(id("alice-conn"), room("random"), Some("alicia".to_string()))
            .await
            .unwrap();

        // then: nothing changed and nothing was announced
        assert_eq!(outcome, JoinOutcome::AlreadyJoined);
        assert_eq!(f.repository.find(&id("alice-conn")).await, Some(first));
        assert_eq!(f.repository.count().await, 1);
        assert!(rx.try_recv().is_err());
        let rooms = f.transport.rooms().await;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name.as_str(), "general");
    }

    #[tokio::test]
    async fn test_second_join_does_not_touch_transport_or_colors() {
        // given: a transport that must only see one subscribe and one publish
        let repository = Arc::new(InMemoryPresenceRepository::new());
        let mut transport = MockRoomTransport::new();
        transport.expect_subscribe().times(1).returning(|_, _| Ok(()));
        transport.expect_publish().times(1).returning(|_, _| Ok(1));
        let mut colors = MockColorGenerator::new();
        colors
            .expect_generate()
            .times(1)
            .returning(|| DisplayColor::from_rgb(0x010203));
        let usecase = JoinRoomUseCase::new(repository, Arc::new(transport), Arc::new(colors));

        // when:
        usecase
            .execute(id("conn"), room("general"), Some("alice".to_string()))
            .await
            .unwrap();
        let outcome = usecase
            .execute(id("conn"), room("general"), Some("alice".to_string()))
            .await
            .unwrap();

        // then: mock expectations are verified on drop
        assert_eq!(outcome, JoinOutcome::AlreadyJoined);
    }

    #[tokio::test]
    async fn test_join_announcement_is_room_scoped() {
        // given:
        let repository = Arc::new(InMemoryPresenceRepository::new());
        let mut transport = MockRoomTransport::new();
        transport.expect_subscribe().returning(|_, _| Ok(()));
        transport
            .expect_publish()
            .withf(|target, event| {
                *target == BroadcastTarget::Room(RoomName::new("general".to_string()))
                    && event.text == "alice has joined the room."
            })
            .times(1)
            .returning(|_, _| Ok(1));
        let usecase = JoinRoomUseCase::new(repository, Arc::new(transport), fixed_colors(0));

        // when / then:
        usecase
            .execute(id("conn"), room("general"), Some("alice".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_subscribe_failure_rolls_back_record() {
        // given: the connection was never registered
        let repository = Arc::new(InMemoryPresenceRepository::new());
        let mut transport = MockRoomTransport::new();
        transport
            .expect_subscribe()
            .returning(|id, _| Err(TransportError::ConnectionNotFound(id.to_string())));
        transport.expect_publish().times(0);
        let usecase =
            JoinRoomUseCase::new(repository.clone(), Arc::new(transport), fixed_colors(0));

        // when:
        let result = usecase
            .execute(id("conn"), room("general"), Some("alice".to_string()))
            .await;

        // then:
        assert!(matches!(result, Err(JoinRoomError::SubscribeFailed(_))));
        assert_eq!(repository.count().await, 0);
    }
}
