use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// Combined cap shared by the manual and autonomous sphero recon counters.
const SPHERO_RECON_CAP: u32 = 3;

/// Value carried by a `ui_toggle` event.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TogglePayload {
    /// Boolean achievement declaration.
    Flag(bool),
    /// Counted achievement declaration.
    Count(u32),
    /// Free-form text (match identifier).
    Text(String),
}

/// Manual scoring declarations set from the operator UI.
///
/// One named field per known toggle, so the known set is checked at compile
/// time; the wire-name mapping lives in [`ToggleStore::set`]. Defaults are
/// the zero/false/empty state restored by [`ToggleStore::reset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToggleStore {
    // Phase 1 — reconnaissance.
    /// Preflight checklist completed.
    pub preflight_complete: bool,
    /// Drone took off during phase 1.
    pub takeoff_complete: bool,
    /// Takeoff was performed autonomously.
    pub takeoff_auto: bool,
    /// Sphero recon runs completed under manual control.
    pub sphero_recon_manual: u32,
    /// Sphero recon runs completed autonomously.
    pub sphero_recon_auto: u32,
    /// Hotspot building identified by the team.
    pub hotspot_identified: bool,
    /// Hotspot identification was autonomous.
    pub hotspot_identified_auto: bool,
    /// Buildings scanned during reconnaissance.
    pub buildings_scanned: u32,
    /// Building scans were autonomous.
    pub scan_auto: bool,
    /// Drone landed on the pad at the end of phase 1.
    pub landed_on_pad: bool,
    /// Landing was autonomous.
    pub landing_auto: bool,

    // Phase 2 — logistics.
    /// Supply crates loaded.
    pub crates_loaded: u32,
    /// Supply crates unloaded.
    pub crates_unloaded: u32,
    /// Unloading was autonomous.
    pub unload_auto: bool,
    /// Crates delivered to a drop point.
    pub crates_delivered: u32,
    /// Deliveries were autonomous.
    pub delivery_auto: bool,
    /// Crates delivered into the safe zone.
    pub safezone_deliveries: u32,
    /// Team identified the safe zone color.
    pub safezone_identified: bool,
    /// Package secured for transport.
    pub package_secured: bool,

    // Phase 3 — firefighting and parking.
    /// Water drop on a ball building was autonomous.
    pub water_drop_auto: bool,
    /// Vehicle parked on the pad after the match.
    pub parked_on_pad: bool,
    /// Parking was autonomous.
    pub parking_auto: bool,
    /// Support vehicles parked.
    pub vehicles_parked: u32,

    /// Operator-entered match identifier, keys the persisted match log.
    pub match_id: String,
}

impl ToggleStore {
    /// Apply a declaration by wire name. Unknown names and payloads of the
    /// wrong type are rejected without mutating anything.
    pub fn set(&mut self, name: &str, payload: TogglePayload) -> Result<(), EventError> {
        match name {
            "preflight_complete" => self.preflight_complete = flag(name, payload)?,
            "takeoff_complete" => self.takeoff_complete = flag(name, payload)?,
            "takeoff_auto" => self.takeoff_auto = flag(name, payload)?,
            "sphero_recon_manual" => {
                let value = count(name, payload)?;
                self.sphero_recon_auto = reconciled(self.sphero_recon_auto, value);
                self.sphero_recon_manual = value;
            }
            "sphero_recon_auto" => {
                let value = count(name, payload)?;
                self.sphero_recon_manual = reconciled(self.sphero_recon_manual, value);
                self.sphero_recon_auto = value;
            }
            "hotspot_identified" => self.hotspot_identified = flag(name, payload)?,
            "hotspot_identified_auto" => self.hotspot_identified_auto = flag(name, payload)?,
            "buildings_scanned" => self.buildings_scanned = count(name, payload)?,
            "scan_auto" => self.scan_auto = flag(name, payload)?,
            "landed_on_pad" => self.landed_on_pad = flag(name, payload)?,
            "landing_auto" => self.landing_auto = flag(name, payload)?,
            "crates_loaded" => self.crates_loaded = count(name, payload)?,
            "crates_unloaded" => self.crates_unloaded = count(name, payload)?,
            "unload_auto" => self.unload_auto = flag(name, payload)?,
            "crates_delivered" => self.crates_delivered = count(name, payload)?,
            "delivery_auto" => self.delivery_auto = flag(name, payload)?,
            "safezone_deliveries" => self.safezone_deliveries = count(name, payload)?,
            "safezone_identified" => self.safezone_identified = flag(name, payload)?,
            "package_secured" => self.package_secured = flag(name, payload)?,
            "water_drop_auto" => self.water_drop_auto = flag(name, payload)?,
            "parked_on_pad" => self.parked_on_pad = flag(name, payload)?,
            "parking_auto" => self.parking_auto = flag(name, payload)?,
            "vehicles_parked" => self.vehicles_parked = count(name, payload)?,
            "match_id" => self.match_id = text(name, payload)?,
            other => return Err(EventError::UnknownToggle(other.to_string())),
        }
        Ok(())
    }

    /// Restore every declaration to its default and clear the match id.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Clip the counter paired with a freshly set sphero recon counter so the
/// combined total stays within [`SPHERO_RECON_CAP`].
fn reconciled(other: u32, new_value: u32) -> u32 {
    if other.saturating_add(new_value) > SPHERO_RECON_CAP {
        SPHERO_RECON_CAP.saturating_sub(new_value)
    } else {
        other
    }
}

fn flag(name: &str, payload: TogglePayload) -> Result<bool, EventError> {
    match payload {
        TogglePayload::Flag(value) => Ok(value),
        _ => Err(EventError::InvalidToggle {
            toggle: name.to_string(),
            expected: "boolean",
        }),
    }
}

fn count(name: &str, payload: TogglePayload) -> Result<u32, EventError> {
    match payload {
        TogglePayload::Count(value) => Ok(value),
        _ => Err(EventError::InvalidToggle {
            toggle: name.to_string(),
            expected: "non-negative integer",
        }),
    }
}

fn text(name: &str, payload: TogglePayload) -> Result<String, EventError> {
    match payload {
        TogglePayload::Text(value) => Ok(value),
        _ => Err(EventError::InvalidToggle {
            toggle: name.to_string(),
            expected: "string",
        }),
    }
}
