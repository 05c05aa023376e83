//! Domain model to DTO conversions.

use crate::domain::{ChatEvent, RoomSummary};

use super::{
    http::RoomSummaryDto,
    websocket::{ChatEventDto, ServerEvent},
};

impl From<&ChatEvent> for ChatEventDto {
    fn from(event: &ChatEvent) -> Self {
        Self {
            username: event.username.clone(),
            color: event.color.clone(),
            text: event.text.clone(),
        }
    }
}

impl From<ChatEventDto> for ChatEvent {
    fn from(dto: ChatEventDto) -> Self {
        Self {
            username: dto.username,
            color: dto.color,
            text: dto.text,
        }
    }
}

impl From<RoomSummary> for RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            name: summary.name.as_str().to_string(),
            members: summary.members,
        }
    }
}

/// Serialize a chat event into a `message` frame
pub fn encode_chat_event(event: &ChatEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerEvent::Message(event.into()))
}
