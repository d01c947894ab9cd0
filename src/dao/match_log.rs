use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use indexmap::IndexMap;
use serde::Serialize;

use crate::dto::format_system_time;
use crate::error::MatchLogError;
use crate::state::SafeZone;
use crate::state::toggles::ToggleStore;

/// Per-building slice of the match log.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingLogEntry {
    /// Successful douses accumulated over the match.
    pub hits: u32,
    /// Windows fully cleared over the match.
    pub windows: u32,
}

/// The record persisted once on post-match exit, keyed by the operator's
/// match identifier.
#[derive(Debug, Clone, Serialize)]
pub struct MatchLogRecord {
    /// When the record was written.
    pub recorded_at: String,
    /// Every manual declaration, flattened alongside the match id.
    #[serde(flatten)]
    pub toggles: ToggleStore,
    /// Hotspot heater id, empty when never randomized.
    pub hotspot: String,
    /// Safe-zone color, empty when never randomized.
    pub safezone: SafeZone,
    /// Per-building hit and window counters, keyed by building id.
    pub buildings: IndexMap<String, BuildingLogEntry>,
}

impl MatchLogRecord {
    /// Assemble a record from the end-of-match state.
    pub fn new(
        toggles: ToggleStore,
        hotspot: Option<&str>,
        safezone: SafeZone,
        buildings: IndexMap<String, BuildingLogEntry>,
    ) -> Self {
        Self {
            recorded_at: format_system_time(SystemTime::now()),
            toggles,
            hotspot: hotspot.unwrap_or_default().to_string(),
            safezone,
            buildings,
        }
    }
}

/// Derive the log filename stem from a match identifier: hyphens become
/// underscores and every other non-word character is stripped.
pub fn sanitize_match_id(match_id: &str) -> String {
    match_id
        .chars()
        .filter_map(|c| match c {
            '-' => Some('_'),
            c if c.is_alphanumeric() || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// Write the record to `<dir>/<sanitized-id>.json`, creating the directory
/// as needed. Returns the path written.
pub fn write_match_log(dir: &Path, record: &MatchLogRecord) -> Result<PathBuf, MatchLogError> {
    let stem = sanitize_match_id(&record.toggles.match_id);
    if stem.is_empty() {
        return Err(MatchLogError::UnusableMatchId(
            record.toggles.match_id.clone(),
        ));
    }

    fs::create_dir_all(dir).map_err(|source| MatchLogError::Write {
        path: dir.display().to_string(),
        source,
    })?;

    let encoded = serde_json::to_string_pretty(record).map_err(MatchLogError::Encode)?;
    let path = dir.join(format!("{stem}.json"));
    fs::write(&path, encoded).map_err(|source| MatchLogError::Write {
        path: path.display().to_string(),
        source,
    })?;

    Ok(path)
}
