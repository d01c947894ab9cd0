use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;
use tracing::debug;

/// Intensity removed per successful douse.
const DOUSE_AMOUNT: u32 = 1;
/// Delay before an extinguished building re-ignites when auto-reignite is on.
const REIGNITE_DELAY: Duration = Duration::from_secs(1);

/// Kind of fire building, fixing its initial fire intensity and the scoring
/// bonuses applied by the score calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Ball-drop target: larger fire, eligible for the water-drop bonus.
    Ball,
    /// Laser target: smaller fire.
    Laser,
}

impl BuildingKind {
    /// Fire intensity set on ignition.
    pub fn initial_intensity(&self) -> u32 {
        match self {
            BuildingKind::Ball => 16,
            BuildingKind::Laser => 8,
        }
    }
}

/// Fire sub-state of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FireState {
    /// Not burning and not yet extinguished this cycle.
    Idle,
    /// Burning; douses decrement the intensity.
    OnFire,
    /// Fully doused; may auto-reignite.
    Extinguished,
}

impl FireState {
    /// Display label used in the `ui/state/table_data` rows.
    pub fn label(&self) -> &'static str {
        match self {
            FireState::Idle => "Idle",
            FireState::OnFire => "Burning",
            FireState::Extinguished => "Extinguished",
        }
    }
}

#[derive(Debug)]
struct FireInner {
    state: FireState,
    intensity: u32,
    score: u32,
    auto_reignite: bool,
    /// Bumped on reset so scheduled re-ignitions from a previous cycle are
    /// discarded instead of resurrecting a cleared fire.
    epoch: u64,
}

/// A scored fire station: ignites to its kind's intensity, loses one
/// intensity per douse, and extinguishes at zero.
///
/// All mutation goes through this object's own lock; critical sections never
/// await, so it is safe to touch from timer and watcher tasks.
#[derive(Debug)]
pub struct FireBuilding {
    id: String,
    kind: BuildingKind,
    inner: Mutex<FireInner>,
}

/// Point-in-time copy of a building, read by the publisher, the score
/// calculator, and the match log.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingSnapshot {
    /// Building identifier (bus topic prefix).
    pub id: String,
    /// Kind of the building.
    pub kind: BuildingKind,
    /// Current fire sub-state.
    pub state: FireState,
    /// Current fire intensity.
    pub intensity: u32,
    /// Accumulated douse score.
    pub score: u32,
}

impl FireBuilding {
    /// Create an idle building of the given kind.
    pub fn new(id: impl Into<String>, kind: BuildingKind) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            kind,
            inner: Mutex::new(FireInner {
                state: FireState::Idle,
                intensity: 0,
                score: 0,
                auto_reignite: false,
                epoch: 0,
            }),
        })
    }

    /// Building identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Building kind.
    pub fn kind(&self) -> BuildingKind {
        self.kind
    }

    /// Current fire sub-state.
    pub fn state(&self) -> FireState {
        self.inner.lock().expect("building lock").state
    }

    /// Set the fire ablaze at the kind's initial intensity. No-op while
    /// already burning.
    pub fn ignite(&self) {
        let mut inner = self.inner.lock().expect("building lock");
        match inner.state {
            FireState::Idle | FireState::Extinguished => {
                inner.state = FireState::OnFire;
                inner.intensity = self.kind.initial_intensity();
                debug!(building = %self.id, intensity = inner.intensity, "ignited");
            }
            FireState::OnFire => {}
        }
    }

    /// Apply one douse: decrement intensity, increment score, and move to
    /// extinguished when the fire reaches zero. Ignored unless burning.
    pub fn douse(self: &Arc<Self>) {
        let mut inner = self.inner.lock().expect("building lock");
        if inner.state != FireState::OnFire || inner.intensity < DOUSE_AMOUNT {
            return;
        }
        inner.intensity -= DOUSE_AMOUNT;
        inner.score += DOUSE_AMOUNT;
        debug!(
            building = %self.id,
            intensity = inner.intensity,
            score = inner.score,
            "doused"
        );
        if inner.intensity == 0 {
            inner.state = FireState::Extinguished;
            if inner.auto_reignite {
                self.schedule_reignite(inner.epoch);
            }
        }
    }

    /// Force the building back to idle, clearing score and intensity.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().expect("building lock");
        inner.state = FireState::Idle;
        inner.intensity = 0;
        inner.score = 0;
        inner.epoch += 1;
    }

    /// Enable or disable the post-extinguish re-ignition.
    pub fn set_auto_reignite(&self, enabled: bool) {
        self.inner.lock().expect("building lock").auto_reignite = enabled;
    }

    /// Number of fully cleared windows, derived from the accumulated score
    /// (each building models two windows, one per half of the initial
    /// intensity). Persisted in the match log.
    pub fn windows_extinguished(&self) -> u32 {
        let inner = self.inner.lock().expect("building lock");
        inner.score / (self.kind.initial_intensity() / 2)
    }

    /// Copy the current state for readers outside the dispatch path.
    pub fn snapshot(&self) -> BuildingSnapshot {
        let inner = self.inner.lock().expect("building lock");
        BuildingSnapshot {
            id: self.id.clone(),
            kind: self.kind,
            state: inner.state,
            intensity: inner.intensity,
            score: inner.score,
        }
    }

    fn schedule_reignite(self: &Arc<Self>, epoch: u64) {
        let building = Arc::clone(self);
        tokio::spawn(async move {
            sleep(REIGNITE_DELAY).await;
            let mut inner = building.inner.lock().expect("building lock");
            // A reset since scheduling invalidates this re-ignition.
            if inner.epoch != epoch
                || !inner.auto_reignite
                || inner.state != FireState::Extinguished
            {
                return;
            }
            inner.state = FireState::OnFire;
            inner.intensity = building.kind.initial_intensity();
            debug!(building = %building.id, "auto-reignited");
        });
    }
}

/// Heater sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaterState {
    /// Heater relay off.
    Idle,
    /// Heater relay on (hotspot active).
    OnFire,
}

/// An unscored hotspot station: a pure relay-state reflector with no timers.
#[derive(Debug)]
pub struct Heater {
    id: String,
    state: Mutex<HeaterState>,
}

impl Heater {
    /// Create an idle heater.
    pub fn new(id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            state: Mutex::new(HeaterState::Idle),
        })
    }

    /// Heater identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current heater state.
    pub fn state(&self) -> HeaterState {
        *self.state.lock().expect("heater lock")
    }

    /// Turn the heater on.
    pub fn ignite(&self) {
        *self.state.lock().expect("heater lock") = HeaterState::OnFire;
    }

    /// Turn the heater back off.
    pub fn reset(&self) {
        *self.state.lock().expect("heater lock") = HeaterState::Idle;
    }
}
