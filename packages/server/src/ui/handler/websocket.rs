//! WebSocket connection handlers.
//!
//! Every accepted socket gets a fresh connection id and two tasks: a receive
//! loop that dispatches client events one at a time, and a pusher loop that
//! drains the connection's outbound channel into the socket. When either ends
//! the other is aborted and the connection is disconnected.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, RoomName},
    infrastructure::dto::websocket::{ClientEvent, JoinRoomPayload, SendMessagePayload},
    ui::state::AppState,
    usecase::SendMessageError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionIdFactory::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    state
        .connect_usecase
        .execute(connection_id.clone(), tx)
        .await;

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();

    // Events of one connection are handled to completion before the next is read
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch(&recv_state, &recv_connection_id, text.as_str()).await;
                }
                Message::Ping(_) => {
                    // Pong is sent automatically
                    tracing::debug!("Received ping from '{}'", recv_connection_id);
                }
                Message::Close(_) => {
                    tracing::debug!("Client '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = state.disconnect_usecase.execute(connection_id.clone()).await {
        tracing::warn!("Failed to announce departure of '{}': {}", connection_id, e);
    }
}

/// Route one text frame to the use case for its event kind.
async fn dispatch(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring unparseable frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEvent::JoinRoom(payload) => on_join_room(state, connection_id, payload).await,
        ClientEvent::SendMessage(payload) => on_send_message(state, connection_id, payload).await,
    }
}

async fn on_join_room(state: &AppState, connection_id: &ConnectionId, payload: JoinRoomPayload) {
    let room = RoomName::from(payload.room_name);

    if let Err(e) = state
        .join_room_usecase
        .execute(connection_id.clone(), room, payload.username)
        .await
    {
        tracing::warn!("joinRoom from '{}' failed: {}", connection_id, e);
    }
}

async fn on_send_message(
    state: &AppState,
    connection_id: &ConnectionId,
    payload: SendMessagePayload,
) {
    let room = RoomName::from(payload.room_name);

    match state
        .send_message_usecase
        .execute(connection_id.clone(), room, payload.message)
        .await
    {
        Ok(delivered) => {
            tracing::debug!("Message from '{}' reached {} clients", connection_id, delivered);
        }
        Err(SendMessageError::NotJoined(_)) => {
            tracing::debug!("Dropped message from '{}': not in a room", connection_id);
        }
        Err(e) => {
            tracing::warn!("sendMessage from '{}' failed: {}", connection_id, e);
        }
    }
}
