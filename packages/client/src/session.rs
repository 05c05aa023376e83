//! WebSocket client session management.

use std::io::Write;

use futures_util::{SinkExt, StreamExt};
use huddle_server::{
    domain::ChatEvent,
    infrastructure::dto::websocket::{ClientEvent, JoinRoomPayload, SendMessagePayload, ServerEvent},
};
use huddle_shared::time::{Clock, SystemClock, local_offset, timestamp_to_time_of_day};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{error::ClientError, formatter::MessageFormatter};

/// What one session connects to and as whom
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub url: String,
    pub room: String,
    /// Empty or absent lets the server pick a guest name
    pub username: Option<String>,
}

impl SessionConfig {
    /// Label shown in the prompt
    pub fn prompt_label(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => format!("{}@{}", name, self.room),
            _ => format!("guest@{}", self.room),
        }
    }
}

/// Redraw the prompt after output interrupted the input line
fn redisplay_prompt(label: &str) {
    print!("{}> ", label);
    std::io::stdout().flush().ok();
}

fn encode(event: &ClientEvent) -> Result<String, ClientError> {
    serde_json::to_string(event).map_err(|e| ClientError::EncodeError(e.to_string()))
}

/// Run one WebSocket client session
///
/// Returns `Ok(())` when the user ends input (Ctrl+C / Ctrl+D),
/// `ClientError::ConnectionError` when the server cannot be reached and
/// `ClientError::ConnectionLost` when an established session drops.
pub async fn run_client_session(config: &SessionConfig) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(config.url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    let join = encode(&ClientEvent::JoinRoom(JoinRoomPayload {
        room_name: config.room.clone(),
        username: config.username.clone(),
    }))?;
    write
        .send(Message::Text(join.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let label = config.prompt_label();
    print!("{}", MessageFormatter::format_welcome(&config.room, &label));

    // Spawn a task to handle incoming messages
    let label_for_read = label.clone();
    let mut read_task = tokio::spawn(async move {
        let offset = local_offset();

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(ServerEvent::Message(dto)) => {
                            let received_at =
                                timestamp_to_time_of_day(SystemClock.now_millis(), offset);
                            MessageFormatter::format_chat_event(&ChatEvent::from(dto), &received_at)
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&label_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&label_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return true;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return true;
                }
                _ => {}
            }
        }

        true
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt = format!("{}> ", label);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to forward input lines as sendMessage frames
    let room = config.room.clone();
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let frame = match encode(&ClientEvent::SendMessage(SendMessagePayload {
                room_name: room.clone(),
                message: line,
            })) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("{}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(frame.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                return true;
            }
        }

        if let Err(e) = write.send(Message::Close(None)).await {
            tracing::debug!("Failed to send close frame: {}", e);
        }
        false
    });

    // If any one of the tasks completes, abort the other
    let connection_lost = tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or(true)
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or(true)
        }
    };

    if connection_lost {
        return Err(ClientError::ConnectionLost(config.room.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: Option<&str>) -> SessionConfig {
        SessionConfig {
            url: "ws://127.0.0.1:5000/ws".to_string(),
            room: "general".to_string(),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn test_prompt_label() {
        assert_eq!(config(Some("alice")).prompt_label(), "alice@general");
        assert_eq!(config(Some("")).prompt_label(), "guest@general");
        assert_eq!(config(None).prompt_label(), "guest@general");
    }

    #[test]
    fn test_encode_join_frame() {
        let frame = encode(&ClientEvent::JoinRoom(JoinRoomPayload {
            room_name: "general".to_string(),
            username: None,
        }))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["event"], "joinRoom");
        assert_eq!(value["data"]["roomName"], "general");
        assert!(value["data"]["username"].is_null());
    }
}
