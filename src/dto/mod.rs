//! Bus payload types and shared formatting helpers.

use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod events;
pub mod status;

/// RFC 3339 rendering of a timestamp, used for the match-log record.
pub(crate) fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

/// MM:SS rendering of a remaining-seconds counter for the UI countdown
/// topics.
pub(crate) fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
