//! Pure score calculator: three phase sub-totals recomputed on demand from
//! the toggle declarations and the building snapshots. All arithmetic is
//! unsigned and saturating, so the total can never go negative and
//! operator-supplied counters can never overflow it.

use crate::state::building::{BuildingKind, BuildingSnapshot};
use crate::state::toggles::ToggleStore;

// Phase 1 point values. Autonomous values are always at least the manual
// value for the same achievement.
const PREFLIGHT_POINTS: u32 = 1;
const TAKEOFF_POINTS: u32 = 2;
const TAKEOFF_AUTO_POINTS: u32 = 4;
const SPHERO_MANUAL_POINTS: u32 = 2;
const SPHERO_AUTO_POINTS: u32 = 4;
const HOTSPOT_POINTS: u32 = 5;
const HOTSPOT_AUTO_POINTS: u32 = 10;
const SCAN_POINTS: u32 = 2;
const SCAN_AUTO_POINTS: u32 = 4;
const LANDING_POINTS: u32 = 3;
const LANDING_AUTO_POINTS: u32 = 6;

// Phase 2 point values.
const CRATE_LOAD_POINTS: u32 = 1;
const CRATE_UNLOAD_POINTS: u32 = 1;
const CRATE_UNLOAD_AUTO_POINTS: u32 = 2;
const DELIVERY_POINTS: u32 = 2;
const DELIVERY_AUTO_POINTS: u32 = 4;
const SAFEZONE_DELIVERY_POINTS: u32 = 1;
const PACKAGE_SECURED_POINTS: u32 = 2;

// Phase 3 point values.
const PARKED_POINTS: u32 = 5;
const PARKED_AUTO_POINTS: u32 = 10;
const VEHICLE_PARKED_POINTS: u32 = 2;

/// Phase-1 sub-total: reconnaissance, launch, and landing declarations.
pub fn phase_one_total(toggles: &ToggleStore) -> u32 {
    let mut total: u32 = 0;

    if toggles.preflight_complete {
        total = total.saturating_add(PREFLIGHT_POINTS);
    }
    if toggles.takeoff_complete {
        total = total.saturating_add(if toggles.takeoff_auto {
            TAKEOFF_AUTO_POINTS
        } else {
            TAKEOFF_POINTS
        });
    }
    total = total.saturating_add(toggles.sphero_recon_manual.saturating_mul(SPHERO_MANUAL_POINTS));
    total = total.saturating_add(toggles.sphero_recon_auto.saturating_mul(SPHERO_AUTO_POINTS));
    if toggles.hotspot_identified {
        total = total.saturating_add(if toggles.hotspot_identified_auto {
            HOTSPOT_AUTO_POINTS
        } else {
            HOTSPOT_POINTS
        });
    }
    total = total.saturating_add(toggles.buildings_scanned.saturating_mul(if toggles.scan_auto {
        SCAN_AUTO_POINTS
    } else {
        SCAN_POINTS
    }));
    if toggles.landed_on_pad {
        total = total.saturating_add(if toggles.landing_auto {
            LANDING_AUTO_POINTS
        } else {
            LANDING_POINTS
        });
    }

    total
}

/// Phase-2 sub-total: load/unload/delivery declarations. Identifying the
/// safe zone adds a bonus equal to the safe-zone delivery count, doubling
/// that counter's contribution rather than awarding a flat amount.
pub fn phase_two_total(toggles: &ToggleStore) -> u32 {
    let mut total: u32 = 0;

    total = total.saturating_add(toggles.crates_loaded.saturating_mul(CRATE_LOAD_POINTS));
    total = total.saturating_add(toggles.crates_unloaded.saturating_mul(if toggles.unload_auto {
        CRATE_UNLOAD_AUTO_POINTS
    } else {
        CRATE_UNLOAD_POINTS
    }));
    total = total.saturating_add(toggles.crates_delivered.saturating_mul(
        if toggles.delivery_auto {
            DELIVERY_AUTO_POINTS
        } else {
            DELIVERY_POINTS
        },
    ));
    total = total.saturating_add(
        toggles
            .safezone_deliveries
            .saturating_mul(SAFEZONE_DELIVERY_POINTS),
    );
    if toggles.safezone_identified {
        total = total.saturating_add(toggles.safezone_deliveries);
    }
    if toggles.package_secured {
        total = total.saturating_add(PACKAGE_SECURED_POINTS);
    }

    total
}

/// Phase-3 sub-total: accumulated douse scores plus the autonomous
/// water-drop bonus on ball buildings and parking declarations.
pub fn phase_three_total(toggles: &ToggleStore, buildings: &[BuildingSnapshot]) -> u32 {
    let mut total: u32 = 0;

    for building in buildings {
        total = total.saturating_add(building.score);
        if toggles.water_drop_auto && building.kind == BuildingKind::Ball {
            total = total.saturating_add(building.score / 4 * 2);
        }
    }
    if toggles.parked_on_pad {
        total = total.saturating_add(if toggles.parking_auto {
            PARKED_AUTO_POINTS
        } else {
            PARKED_POINTS
        });
    }
    total = total.saturating_add(toggles.vehicles_parked.saturating_mul(VEHICLE_PARKED_POINTS));

    total
}

/// Full match score: the three phase sub-totals summed.
pub fn match_total(toggles: &ToggleStore, buildings: &[BuildingSnapshot]) -> u32 {
    phase_one_total(toggles)
        .saturating_add(phase_two_total(toggles))
        .saturating_add(phase_three_total(toggles, buildings))
}
