//! # Time Utilities
//!
//! Utilities for time formatting using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format time as a wall-clock `HH:MM:SS UTC` label for status lines.
pub fn format_clock(time: DateTime<Utc>) -> String {
    time.format("%H:%M:%S UTC").to_string()
}
