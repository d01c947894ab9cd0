//! Outbound bus payloads read by the operator UI and the building adapters.

use serde::Serialize;

use crate::state::SafeZone;

/// `ui/state/score` payload.
#[derive(Debug, Serialize)]
pub struct ScoreState {
    /// Current recomputed match total.
    pub current_score: u32,
}

/// `ui/state/match_state` payload.
#[derive(Debug, Serialize)]
pub struct MatchState {
    /// Display label of the current phase.
    pub state: &'static str,
}

/// `ui/state/hotspot_building` payload.
#[derive(Debug, Serialize)]
pub struct HotspotState {
    /// Chosen hotspot heater id, empty when unset.
    pub building: String,
}

/// `ui/state/safezone` payload.
#[derive(Debug, Serialize)]
pub struct SafezoneState {
    /// Chosen safe-zone color, empty when unset.
    pub zone: SafeZone,
}

/// Payload of the `ui/state/{phase,match}_remaining` countdown topics.
#[derive(Debug, Serialize)]
pub struct TimeState {
    /// Remaining time rendered as MM:SS.
    pub time: String,
}

/// One row of the `ui/state/table_data` building table.
#[derive(Debug, Serialize)]
pub struct TableRow {
    /// Building id.
    pub building: String,
    /// Display label of the fire state.
    pub state: &'static str,
    /// Fire intensity mapped to 0..=100.
    pub fire_level: u32,
    /// Accumulated douse score.
    pub score: u32,
}

/// Relay channel state for `{building}/relay/set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayState {
    /// Close the relay channel.
    On,
    /// Open the relay channel.
    Off,
}

/// `{building}/relay/set` payload.
#[derive(Debug, Serialize)]
pub struct RelayCommand {
    /// Relay channel name on the building controller.
    pub channel: &'static str,
    /// Desired relay state.
    pub state: RelayState,
}

/// `{building}/progress_bar/set` payload.
#[derive(Debug, Serialize)]
pub struct PixelStrip {
    /// RGB triplets for the whole strip.
    pub pixel_data: Vec<[u8; 3]>,
}

/// `ui/state/{toggle}` payload echoing a declaration back to the UI.
#[derive(Debug, Serialize)]
pub struct ToggleState {
    /// Current toggle value.
    pub data: serde_json::Value,
}
