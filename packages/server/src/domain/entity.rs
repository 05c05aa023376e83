//! Entities and transient events.

use super::value_object::{DisplayColor, DisplayName, RoomName};

/// Username stamped on server-generated announcements
const SYSTEM_USERNAME: &str = "Admin";

/// Color stamped on server-generated announcements
const SYSTEM_COLOR: &str = "#000000";

/// Per-connection metadata used to stamp outgoing chat events
///
/// Created by the first successful join of a connection and never updated
/// afterwards. `room` is the room that first join subscribed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceRecord {
    pub display_name: DisplayName,
    pub display_color: DisplayColor,
    pub room: RoomName,
}

impl PresenceRecord {
    pub fn new(display_name: DisplayName, display_color: DisplayColor, room: RoomName) -> Self {
        Self {
            display_name,
            display_color,
            room,
        }
    }
}

/// Payload fanned out to room members. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub username: String,
    pub color: String,
    pub text: String,
}

impl ChatEvent {
    /// A chat line sent by the owner of `presence`
    pub fn from_presence(presence: &PresenceRecord, text: String) -> Self {
        Self {
            username: presence.display_name.as_str().to_string(),
            color: presence.display_color.as_str().to_string(),
            text,
        }
    }

    pub fn joined(name: &DisplayName) -> Self {
        Self::system(format!("{} has joined the room.", name))
    }

    pub fn left(name: &DisplayName) -> Self {
        Self::system(format!("{} has left the room.", name))
    }

    fn system(text: String) -> Self {
        Self {
            username: SYSTEM_USERNAME.to_string(),
            color: SYSTEM_COLOR.to_string(),
            text,
        }
    }

    pub fn is_system(&self) -> bool {
        self.username == SYSTEM_USERNAME && self.color == SYSTEM_COLOR
    }
}

/// Snapshot of one room in the transport subscription table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: RoomName,
    pub members: usize,
}
