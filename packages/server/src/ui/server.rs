//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    usecase::{
        ConnectUseCase, DisconnectUseCase, JoinRoomUseCase, ListRoomsUseCase, SendMessageUseCase,
        ServerStatusUseCase,
    },
};

use super::{
    handler::{get_rooms, health_check, root, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Room chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_usecase,
///     join_room_usecase,
///     send_message_usecase,
///     disconnect_usecase,
///     list_rooms_usecase,
///     server_status_usecase,
///     config,
/// );
/// server.run().await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    config: ServerConfig,
}

impl Server {
    pub fn new(
        connect_usecase: Arc<ConnectUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
        server_status_usecase: Arc<ServerStatusUseCase>,
        config: ServerConfig,
    ) -> Self {
        let app_state = Arc::new(AppState {
            connect_usecase,
            join_room_usecase,
            send_message_usecase,
            disconnect_usecase,
            list_rooms_usecase,
            server_status_usecase,
        });
        Self { app_state, config }
    }

    /// Build the router with every endpoint and middleware attached
    pub fn router(&self) -> Router {
        let app = Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms));

        let app = match &self.config.static_dir {
            Some(dir) => {
                let index = dir.join("index.html");
                app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
            }
            None => app.route("/", get(root)),
        };

        app.layer(cors_layer(&self.config.allowed_origins))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Bind to the configured address and serve until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Server Started on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Leave announcements scope: {}", self.config.leave_scope);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
