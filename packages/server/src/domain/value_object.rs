//! Value objects.
//!
//! Each type validates its raw input once at construction, so the rest of the
//! server can rely on the invariants without re-checking.

use std::fmt;

use super::error::ValueObjectError;

/// Number of leading identifier characters used in a synthesized guest name
const GUEST_ID_PREFIX_LEN: usize = 5;

/// Identifier issued by the transport layer for one live connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Guest_` followed by the first five characters of the identifier.
    pub fn guest_name(&self) -> String {
        let prefix: String = self.0.chars().take(GUEST_ID_PREFIX_LEN).collect();
        format!("Guest_{}", prefix)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues fresh connection identifiers
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(uuid::Uuid::new_v4().to_string())
    }
}

/// Label of a broadcast group
///
/// Opaque: any string, the empty one included, names a room and is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoomName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name stamped on a connection's chat events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Use the requested username verbatim, or synthesize a guest name from
    /// the connection identifier when it is absent or empty.
    pub fn resolve(requested: Option<&str>, connection_id: &ConnectionId) -> Self {
        match requested {
            Some(name) if !name.is_empty() => Self(name.to_string()),
            _ => Self(connection_id.guest_name()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex RGB color, `#` followed by up to six hex digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayColor(String);

impl DisplayColor {
    /// Render the low 24 bits of `value` as a zero-padded `#rrggbb`.
    pub fn from_rgb(value: u32) -> Self {
        Self(format!("#{:06x}", value & 0x00FF_FFFF))
    }

    /// Parse a color received over the wire.
    ///
    /// Unpadded values such as `#fff0` are accepted.
    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ValueObjectError::InvalidColor(value.to_string()))?;
        if digits.is_empty()
            || digits.len() > 6
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ValueObjectError::InvalidColor(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels; unpadded values are zero-extended on the left.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let value = self
            .0
            .strip_prefix('#')
            .and_then(|digits| u32::from_str_radix(digits, 16).ok())
            .unwrap_or(0);
        ((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_rejects_empty() {
        assert_eq!(
            ConnectionId::new(String::new()),
            Err(ValueObjectError::EmptyConnectionId)
        );
    }

    #[test]
    fn test_guest_name_uses_first_five_chars() {
        let id = ConnectionId::new("abcdef123456".to_string()).unwrap();
        assert_eq!(id.guest_name(), "Guest_abcde");
        // deterministic for a fixed identifier
        assert_eq!(id.guest_name(), id.guest_name());
    }

    #[test]
    fn test_guest_name_short_id_uses_whole_id() {
        let id = ConnectionId::new("ab".to_string()).unwrap();
        assert_eq!(id.guest_name(), "Guest_ab");
    }

    #[test]
    fn test_guest_name_counts_chars_not_bytes() {
        let id = ConnectionId::new("日本語のID".to_string()).unwrap();
        assert_eq!(id.guest_name(), "Guest_日本語のI");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ConnectionIdFactory::generate();
        let b = ConnectionIdFactory::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_room_name_kept_verbatim() {
        assert_eq!(RoomName::new(" general ".to_string()).as_str(), " general ");
        assert_eq!(RoomName::new("   ".to_string()).as_str(), "   ");
    }

    #[test]
    fn test_empty_room_name_is_a_room() {
        let room = RoomName::from(String::new());
        assert_eq!(room.as_str(), "");
        assert_ne!(room, RoomName::new(" ".to_string()));
    }

    #[test]
    fn test_display_name_resolve() {
        let id = ConnectionId::new("xyz987654".to_string()).unwrap();

        assert_eq!(DisplayName::resolve(Some("alice"), &id).as_str(), "alice");
        assert_eq!(DisplayName::resolve(None, &id).as_str(), "Guest_xyz98");
        assert_eq!(DisplayName::resolve(Some(""), &id).as_str(), "Guest_xyz98");
    }

    #[test]
    fn test_display_name_keeps_whitespace() {
        let id = ConnectionId::new("xyz987654".to_string()).unwrap();

        assert_eq!(DisplayName::resolve(Some(" bob "), &id).as_str(), " bob ");
        assert_eq!(DisplayName::resolve(Some("  "), &id).as_str(), "  ");
    }

    #[test]
    fn test_display_color_from_rgb_is_padded() {
        assert_eq!(DisplayColor::from_rgb(0).as_str(), "#000000");
        assert_eq!(DisplayColor::from_rgb(0xABC).as_str(), "#000abc");
        assert_eq!(DisplayColor::from_rgb(0xFF_FFFE).as_str(), "#fffffe");
    }

    #[test]
    fn test_display_color_from_rgb_masks_high_bits() {
        assert_eq!(DisplayColor::from_rgb(0x1200_0001).as_str(), "#000001");
    }

    #[test]
    fn test_display_color_parse() {
        assert!(DisplayColor::parse("#a1b2c3").is_ok());
        assert!(DisplayColor::parse("#fff0").is_ok());
        assert!(DisplayColor::parse("a1b2c3").is_err());
        assert!(DisplayColor::parse("#").is_err());
        assert!(DisplayColor::parse("#1234567").is_err());
        assert!(DisplayColor::parse("#zzzzzz").is_err());
    }

    #[test]
    fn test_display_color_rgb() {
        assert_eq!(DisplayColor::parse("#a1b2c3").unwrap().rgb(), (0xa1, 0xb2, 0xc3));
        assert_eq!(DisplayColor::parse("#fff0").unwrap().rgb(), (0x00, 0xff, 0xf0));
        assert_eq!(DisplayColor::from_rgb(0xff8000).rgb(), (255, 128, 0));
    }
}
