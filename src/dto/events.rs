//! Inbound bus payloads, deserialized before anything is dispatched.

use serde::Deserialize;

use crate::state::toggles::TogglePayload;

/// Payload published by a building detector subsystem.
#[derive(Debug, Deserialize)]
pub struct SensorEvent {
    /// Kind of sensor event; only `"hit"` is meaningful.
    pub event_type: String,
}

/// Payload published on `ui/events/#` by the operator interface.
#[derive(Debug, Deserialize)]
pub struct UiEvent {
    /// Either `"ui_toggle"` or a match-engine event name.
    pub event_type: String,
    /// Toggle data, present only for `ui_toggle` events.
    #[serde(default)]
    pub data: Option<UiToggleData>,
}

/// Toggle declaration attached to a `ui_toggle` event.
#[derive(Debug, Deserialize)]
pub struct UiToggleData {
    /// Wire name of the toggle.
    pub toggle: String,
    /// New value for the toggle.
    pub payload: TogglePayload,
}
