//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectUseCase, DisconnectUseCase, JoinRoomUseCase, ListRoomsUseCase, SendMessageUseCase,
    ServerStatusUseCase,
};

/// Use cases reachable from every handler
pub struct AppState {
    pub connect_usecase: Arc<ConnectUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    pub server_status_usecase: Arc<ServerStatusUseCase>,
}
