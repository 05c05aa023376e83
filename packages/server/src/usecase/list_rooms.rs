//! UseCase: list active rooms.

use std::sync::Arc;

use crate::domain::{RoomSummary, RoomTransport};

pub struct ListRoomsUseCase {
    transport: Arc<dyn RoomTransport>,
}

impl ListRoomsUseCase {
    pub fn new(transport: Arc<dyn RoomTransport>) -> Self {
        Self { transport }
    }

    /// Rooms with at least one member, ordered by name
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.transport.rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomName, transport::MockRoomTransport};

    #[tokio::test]
    async fn test_list_rooms_delegates_to_transport() {
        // given:
        let mut transport = MockRoomTransport::new();
        transport.expect_rooms().times(1).returning(|| {
            vec![RoomSummary {
                name: RoomName::new("general".to_string()),
                members: 2,
            }]
        });
        let usecase = ListRoomsUseCase::new(Arc::new(transport));

        // when:
        let rooms = usecase.execute().await;

        // then:
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name.as_str(), "general");
        assert_eq!(rooms[0].members, 2);
    }
}
