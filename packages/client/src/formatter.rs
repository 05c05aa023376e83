//! Message formatting for terminal display.

use huddle_server::domain::{ChatEvent, DisplayColor};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Banner printed once the room has been requested
    pub fn format_welcome(room: &str, label: &str) -> String {
        format!(
            "\nJoining '{}' as '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
            room, label
        )
    }

    /// Format a received chat event
    ///
    /// Announcements render as `* text`; chat lines render the sender's name
    /// in their display color.
    ///
    /// # Arguments
    ///
    /// * `event` - The received event
    /// * `received_at` - Local time of day the event arrived
    pub fn format_chat_event(event: &ChatEvent, received_at: &str) -> String {
        if event.is_system() {
            return format!("\n[{}] * {}\n", received_at, event.text);
        }
        format!(
            "\n[{}] {}: {}\n",
            received_at,
            Self::colorize(&event.username, &event.color),
            event.text
        )
    }

    /// Format a text frame that is not a chat event
    pub fn format_raw_message(text: &str) -> String {
        format!("\n(unrecognized) {}\n", text)
    }

    /// Format a binary frame notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n(binary message: {} bytes)\n", byte_count)
    }

    /// Wrap `name` in a 24-bit ANSI foreground color, or return it unchanged
    /// if `color` is not a hex color.
    pub fn colorize(name: &str, color: &str) -> String {
        match DisplayColor::parse(color) {
            Ok(color) => {
                let (r, g, b) = color.rgb();
                format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, name)
            }
            Err(_) => name.to_string(),
        }
    }
}
