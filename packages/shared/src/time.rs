//! Time-related utilities.

use chrono::{FixedOffset, Local, Offset, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Offset of the machine's local time zone at this moment
pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Render a Unix timestamp (milliseconds) as `HH:MM:SS` in the given offset.
///
/// Out-of-range timestamps render as `--:--:--`.
pub fn timestamp_to_time_of_day(timestamp_millis: i64, offset: FixedOffset) -> String {
    match offset.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
