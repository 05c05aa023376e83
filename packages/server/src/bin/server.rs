//! Room chat server.
//!
//! Clients join named rooms over WebSocket; chat events are broadcast to the
//! room, leave announcements to every client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-server
//! cargo run --bin huddle-server -- --host 0.0.0.0 --port 3000
//! PORT=8080 FRONTEND_URL=https://example.app cargo run --bin huddle-server
//! ```

use std::sync::Arc;

use clap::Parser;
use huddle_server::{
    config::{ServerArgs, ServerConfig},
    infrastructure::{
        color::RandomColorGenerator, repository::InMemoryPresenceRepository,
        transport::WebSocketTransport,
    },
    ui::Server,
    usecase::{
        ConnectUseCase, DisconnectUseCase, JoinRoomUseCase, ListRoomsUseCase, SendMessageUseCase,
        ServerStatusUseCase,
    },
};
use huddle_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("huddle_server", env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(ServerArgs::parse());

    // Initialize dependencies in order:
    // 1. Repository
    // 2. Transport
    // 3. UseCases
    // 4. Server

    // 1. Presence repository (in-memory)
    let repository = Arc::new(InMemoryPresenceRepository::new());

    // 2. Transport (WebSocket channels and room subscriptions)
    let transport = Arc::new(WebSocketTransport::new());

    // 3. UseCases
    let connect_usecase = Arc::new(ConnectUseCase::new(transport.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        transport.clone(),
        Arc::new(RandomColorGenerator),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        transport.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        repository.clone(),
        transport.clone(),
        config.leave_scope,
    ));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(transport.clone()));
    let server_status_usecase = Arc::new(ServerStatusUseCase::new(
        repository.clone(),
        transport.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_usecase,
        join_room_usecase,
        send_message_usecase,
        disconnect_usecase,
        list_rooms_usecase,
        server_status_usecase,
        config,
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
