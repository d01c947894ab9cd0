//! Shared match-engine state: the phase state machine with its entry/exit
//! side effects, the countdown timers, the building and heater models, and
//! the phase-3 watcher loop.

pub mod building;
pub mod machine;
pub mod timer;
pub mod toggles;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::dao::match_log::{BuildingLogEntry, MatchLogRecord, write_match_log};
use crate::error::EventError;
use crate::services::scoring;
use crate::state::building::{
    BuildingKind, BuildingSnapshot, FireBuilding, FireState, Heater, HeaterState,
};
use crate::state::machine::{MatchEvent, MatchPhase, transition};
use crate::state::timer::CountdownTimer;
use crate::state::toggles::{TogglePayload, ToggleStore};

/// Handle used to share the engine across tasks.
pub type SharedEngine = Arc<MatchEngine>;

/// Poll interval of the phase-3 watcher loop.
const WATCHER_POLL: Duration = Duration::from_millis(100);
/// Grace period between every fire going out and the mass re-ignition.
const REIGNITE_GRACE: Duration = Duration::from_secs(5);

/// Safe-zone color randomized during staging, `Unset` outside a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SafeZone {
    /// Not chosen yet; serializes to the empty string.
    #[default]
    #[serde(rename = "")]
    Unset,
    /// Red zone.
    #[serde(rename = "RED")]
    Red,
    /// Blue zone.
    #[serde(rename = "BLUE")]
    Blue,
}

/// Engine construction parameters, usually derived from [`crate::config`].
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Phase 1 duration in seconds.
    pub phase_one_secs: u64,
    /// Phase 2 duration in seconds.
    pub phase_two_secs: u64,
    /// Phase 3 duration in seconds.
    pub phase_three_secs: u64,
    /// Directory match logs are written to.
    pub match_log_dir: PathBuf,
    /// Ids of the ball-kind fire buildings.
    pub ball_buildings: Vec<String>,
    /// Ids of the laser-kind fire buildings.
    pub laser_buildings: Vec<String>,
    /// Ids of the heater buildings.
    pub heater_buildings: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            phase_one_secs: 10,
            phase_two_secs: 10,
            phase_three_secs: 120,
            match_log_dir: PathBuf::from("logs"),
            ball_buildings: vec!["2".into(), "6".into(), "5".into()],
            laser_buildings: vec!["1".into(), "4".into(), "3".into()],
            heater_buildings: vec!["7".into(), "8".into(), "9".into()],
        }
    }
}

/// Running phase-3 watcher: a stop signal plus the task to join on exit.
struct WatcherHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Mutable engine state guarded by the dispatch lock.
struct EngineCore {
    phase: MatchPhase,
    hotspot: Option<String>,
    safezone: SafeZone,
    toggles: ToggleStore,
    rng: StdRng,
    watcher: Option<WatcherHandle>,
}

/// Point-in-time copy of everything the status publisher needs.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    /// Current match phase.
    pub phase: MatchPhase,
    /// Seconds left on the phase timer.
    pub phase_remaining: u64,
    /// Seconds left on the match timer.
    pub match_remaining: u64,
    /// Chosen hotspot heater id.
    pub hotspot: Option<String>,
    /// Chosen safe-zone color.
    pub safezone: SafeZone,
    /// Recomputed match total.
    pub score: u32,
    /// Manual declarations.
    pub toggles: ToggleStore,
    /// Fire building states.
    pub buildings: Vec<BuildingSnapshot>,
    /// Heater states.
    pub heaters: Vec<HeaterSnapshot>,
}

/// Point-in-time copy of a heater.
#[derive(Debug, Clone, Serialize)]
pub struct HeaterSnapshot {
    /// Heater id.
    pub id: String,
    /// Current relay state.
    pub state: HeaterState,
}

/// Top-level match orchestrator.
///
/// Constructed once at process start and reused across matches; phase
/// transitions mutate it in place. [`MatchEngine::dispatch`] is the single
/// serialized entry point for state-changing events: timer expiries arrive on
/// an internal channel drained by [`run_event_pump`], bus events are
/// dispatched directly by the boundary layer. Buildings and heaters carry
/// their own locks so the watcher loop and the status publisher can read
/// them without touching the dispatch lock.
pub struct MatchEngine {
    core: Mutex<EngineCore>,
    buildings: IndexMap<String, Arc<FireBuilding>>,
    heaters: IndexMap<String, Arc<Heater>>,
    phase_timer: CountdownTimer,
    match_timer: CountdownTimer,
    settings: EngineSettings,
    events_rx: std::sync::Mutex<Option<mpsc::UnboundedReceiver<MatchEvent>>>,
}

impl MatchEngine {
    /// Build the engine and spawn its timer tasks. Must be called from
    /// within a tokio runtime.
    pub fn new(settings: EngineSettings) -> SharedEngine {
        Self::build(settings, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests.
    #[cfg(test)]
    pub(crate) fn new_seeded(settings: EngineSettings, seed: u64) -> SharedEngine {
        Self::build(settings, StdRng::seed_from_u64(seed))
    }

    fn build(settings: EngineSettings, rng: StdRng) -> SharedEngine {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut buildings = IndexMap::new();
        for id in &settings.ball_buildings {
            buildings.insert(id.clone(), FireBuilding::new(id.clone(), BuildingKind::Ball));
        }
        for id in &settings.laser_buildings {
            buildings.insert(id.clone(), FireBuilding::new(id.clone(), BuildingKind::Laser));
        }

        let mut heaters = IndexMap::new();
        for id in &settings.heater_buildings {
            heaters.insert(id.clone(), Heater::new(id.clone()));
        }

        Arc::new(Self {
            core: Mutex::new(EngineCore {
                phase: MatchPhase::Idle,
                hotspot: None,
                safezone: SafeZone::Unset,
                toggles: ToggleStore::default(),
                rng,
                watcher: None,
            }),
            buildings,
            heaters,
            phase_timer: CountdownTimer::spawn("phase", events_tx.clone()),
            match_timer: CountdownTimer::spawn("match", events_tx),
            settings,
            events_rx: std::sync::Mutex::new(Some(events_rx)),
        })
    }

    /// Apply one event: in-state handlers first, then the transition table
    /// with its exit/entry side effects. Serialized by the dispatch lock, so
    /// events take effect in arrival order.
    pub async fn dispatch(&self, event: MatchEvent) {
        let mut core = self.core.lock().await;

        if self.handle_in_state(&mut core, &event) {
            return;
        }

        let Some(next) = transition(core.phase, &event) else {
            debug!(phase = ?core.phase, ?event, "event ignored in current phase");
            return;
        };

        let prev = core.phase;
        self.exit_phase(&mut core, prev).await;
        core.phase = next;
        info!(from = ?prev, to = ?next, ?event, "match phase changed");
        self.enter_phase(&mut core, next);
    }

    /// Apply a manual scoring declaration.
    pub async fn set_toggle(&self, name: &str, payload: TogglePayload) -> Result<(), EventError> {
        let mut core = self.core.lock().await;
        core.toggles.set(name, payload)
    }

    /// Current match phase.
    pub async fn phase(&self) -> MatchPhase {
        self.core.lock().await.phase
    }

    /// Snapshot everything the status publisher and scoreboard need.
    pub async fn snapshot(&self) -> EngineSnapshot {
        let core = self.core.lock().await;
        let buildings = self.building_snapshots();
        let score = scoring::match_total(&core.toggles, &buildings);
        EngineSnapshot {
            phase: core.phase,
            phase_remaining: self.phase_timer.remaining(),
            match_remaining: self.match_timer.remaining(),
            hotspot: core.hotspot.clone(),
            safezone: core.safezone,
            score,
            toggles: core.toggles.clone(),
            buildings,
            heaters: self
                .heaters
                .values()
                .map(|heater| HeaterSnapshot {
                    id: heater.id().to_string(),
                    state: heater.state(),
                })
                .collect(),
        }
    }

    /// Take the internal event receiver; used once by [`run_event_pump`].
    fn take_event_rx(&self) -> Option<mpsc::UnboundedReceiver<MatchEvent>> {
        self.events_rx.lock().expect("event rx lock").take()
    }

    fn building_snapshots(&self) -> Vec<BuildingSnapshot> {
        self.buildings.values().map(|b| b.snapshot()).collect()
    }

    /// Handle events that act within the current phase without transitioning.
    fn handle_in_state(&self, core: &mut EngineCore, event: &MatchEvent) -> bool {
        match (core.phase, event) {
            (MatchPhase::Staging, MatchEvent::RandomizeHotspot) => {
                let ids: Vec<&String> = self.heaters.keys().collect();
                if let Some(id) = ids.choose(&mut core.rng) {
                    info!(heater = %id, "hotspot randomized");
                    core.hotspot = Some((*id).clone());
                }
                true
            }
            (MatchPhase::Staging, MatchEvent::RandomizeSafezone) => {
                core.safezone = *[SafeZone::Red, SafeZone::Blue]
                    .choose(&mut core.rng)
                    .unwrap_or(&SafeZone::Red);
                info!(zone = ?core.safezone, "safezone randomized");
                true
            }
            (MatchPhase::Staging, MatchEvent::StartPreheat) => {
                match core.hotspot.as_ref().and_then(|id| self.heaters.get(id)) {
                    Some(heater) => {
                        heater.ignite();
                        info!(heater = %heater.id(), "preheat started");
                    }
                    None => debug!("preheat requested without a hotspot"),
                }
                true
            }
            (MatchPhase::PhaseThree, MatchEvent::FireDoused(id)) => {
                match self.buildings.get(id) {
                    Some(building) => building.douse(),
                    None => debug!(building = %id, "douse for unknown building ignored"),
                }
                true
            }
            _ => false,
        }
    }

    fn enter_phase(&self, core: &mut EngineCore, phase: MatchPhase) {
        match phase {
            MatchPhase::Idle => {
                core.hotspot = None;
                core.safezone = SafeZone::Unset;
                for building in self.buildings.values() {
                    building.set_auto_reignite(false);
                    building.reset();
                }
                for heater in self.heaters.values() {
                    heater.reset();
                }
                core.toggles.reset();
            }
            MatchPhase::Staging => {}
            MatchPhase::PhaseOne => {
                self.phase_timer
                    .arm(self.settings.phase_one_secs, Some(MatchEvent::PhaseOneTimeout));
                self.phase_timer.start();

                let total = self.settings.phase_one_secs
                    + self.settings.phase_two_secs
                    + self.settings.phase_three_secs;
                self.match_timer.arm(total, None);
                self.match_timer.start();
            }
            MatchPhase::PhaseTwo => {
                self.phase_timer
                    .arm(self.settings.phase_two_secs, Some(MatchEvent::PhaseTwoTimeout));
                self.phase_timer.start();
            }
            MatchPhase::PhaseThree => {
                self.phase_timer.arm(
                    self.settings.phase_three_secs,
                    Some(MatchEvent::PhaseThreeTimeout),
                );
                self.phase_timer.start();
                for building in self.buildings.values() {
                    building.ignite();
                }
                core.watcher = Some(self.spawn_watcher());
            }
            MatchPhase::PostMatch => {
                self.phase_timer.reset();
                self.match_timer.reset();
            }
        }
    }

    async fn exit_phase(&self, core: &mut EngineCore, phase: MatchPhase) {
        match phase {
            MatchPhase::PhaseThree => {
                // The watcher only touches building locks, so joining it
                // while holding the dispatch lock cannot deadlock; it
                // observes the stop signal within one poll interval.
                if let Some(watcher) = core.watcher.take() {
                    let _ = watcher.stop.send(true);
                    if let Err(err) = watcher.task.await {
                        warn!(error = %err, "phase-3 watcher task failed");
                    }
                }
                self.match_timer.reset();
            }
            MatchPhase::PostMatch => self.persist_match_log(core),
            _ => {}
        }
    }

    fn spawn_watcher(&self) -> WatcherHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let buildings: Vec<Arc<FireBuilding>> = self.buildings.values().cloned().collect();
        let task = tokio::spawn(run_watcher(buildings, stop_rx));
        WatcherHandle {
            stop: stop_tx,
            task,
        }
    }

    /// Write the match log on post-match exit, if the match was identified
    /// and scored. Failures are logged and never disturb engine state.
    fn persist_match_log(&self, core: &EngineCore) {
        if core.toggles.match_id.is_empty() {
            debug!("no match id set; skipping match log");
            return;
        }
        let snapshots = self.building_snapshots();
        let total = scoring::match_total(&core.toggles, &snapshots);
        if total == 0 {
            debug!("match scored zero; skipping match log");
            return;
        }

        let buildings: IndexMap<String, BuildingLogEntry> = self
            .buildings
            .values()
            .map(|building| {
                (
                    building.id().to_string(),
                    BuildingLogEntry {
                        hits: building.snapshot().score,
                        windows: building.windows_extinguished(),
                    },
                )
            })
            .collect();

        let record = MatchLogRecord::new(
            core.toggles.clone(),
            core.hotspot.as_deref(),
            core.safezone,
            buildings,
        );
        match write_match_log(&self.settings.match_log_dir, &record) {
            Ok(path) => info!(path = %path.display(), score = total, "match log written"),
            Err(err) => error!(error = %err, "failed to persist match log"),
        }
    }
}

/// Drain the internal event channel (timer expiries) into the engine's
/// dispatch loop. Spawned once at startup; panics if spawned twice.
pub async fn run_event_pump(engine: SharedEngine) {
    let mut events = engine
        .take_event_rx()
        .expect("event pump may only be started once");
    while let Some(event) = events.recv().await {
        engine.dispatch(event).await;
    }
}

/// Phase-3 watcher: poll the fire buildings at 10 Hz; once every fire is
/// extinguished, wait the grace period and re-ignite them all. Terminates
/// within one poll interval of the stop signal.
async fn run_watcher(buildings: Vec<Arc<FireBuilding>>, mut stop: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            _ = stop.changed() => return,
            _ = sleep(WATCHER_POLL) => {}
        }

        let all_out = buildings
            .iter()
            .all(|b| b.state() == FireState::Extinguished);
        if !all_out {
            continue;
        }

        info!("all fires extinguished; holding grace period before re-ignition");
        tokio::select! {
            _ = stop.changed() => return,
            _ = sleep(REIGNITE_GRACE) => {}
        }
        for building in &buildings {
            building.ignite();
        }
        info!("fires re-ignited after grace period");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::SystemTime;

    use super::*;

    fn temp_log_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("fireline-engine-{tag}-{}-{nanos}", std::process::id()))
    }

    fn test_settings(tag: &str) -> EngineSettings {
        EngineSettings {
            phase_one_secs: 2,
            phase_two_secs: 2,
            phase_three_secs: 60,
            match_log_dir: temp_log_dir(tag),
            ball_buildings: vec!["b1".into()],
            laser_buildings: vec!["l1".into()],
            heater_buildings: vec!["h1".into(), "h2".into(), "h3".into()],
        }
    }

    fn spawn_engine(tag: &str) -> SharedEngine {
        let engine = MatchEngine::new_seeded(test_settings(tag), 42);
        tokio::spawn(run_event_pump(engine.clone()));
        engine
    }

    async fn extinguish_all(engine: &SharedEngine) {
        for _ in 0..16 {
            engine.dispatch(MatchEvent::FireDoused("b1".into())).await;
        }
        for _ in 0..8 {
            engine.dispatch(MatchEvent::FireDoused("l1".into())).await;
        }
    }

    #[tokio::test]
    async fn staging_randomization_and_preheat() {
        let engine = spawn_engine("staging");
        engine.dispatch(MatchEvent::NewMatch).await;
        assert_eq!(engine.phase().await, MatchPhase::Staging);

        engine.dispatch(MatchEvent::RandomizeHotspot).await;
        engine.dispatch(MatchEvent::RandomizeSafezone).await;
        let snap = engine.snapshot().await;
        let hotspot = snap.hotspot.expect("hotspot chosen");
        assert!(["h1", "h2", "h3"].contains(&hotspot.as_str()));
        assert!(matches!(snap.safezone, SafeZone::Red | SafeZone::Blue));

        engine.dispatch(MatchEvent::StartPreheat).await;
        let snap = engine.snapshot().await;
        let heater = snap
            .heaters
            .iter()
            .find(|h| h.id == hotspot)
            .expect("hotspot is a heater");
        assert_eq!(heater.state, HeaterState::OnFire);
    }

    #[tokio::test]
    async fn preheat_without_hotspot_is_a_no_op() {
        let engine = spawn_engine("no-hotspot");
        engine.dispatch(MatchEvent::NewMatch).await;
        engine.dispatch(MatchEvent::StartPreheat).await;
        let snap = engine.snapshot().await;
        assert!(snap.heaters.iter().all(|h| h.state == HeaterState::Idle));
    }

    #[tokio::test]
    async fn hotspot_randomization_is_roughly_uniform() {
        let engine = spawn_engine("uniform");
        engine.dispatch(MatchEvent::NewMatch).await;

        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..300 {
            engine.dispatch(MatchEvent::RandomizeHotspot).await;
            let hotspot = engine.snapshot().await.hotspot.expect("hotspot chosen");
            *counts.entry(hotspot).or_default() += 1;
        }

        assert_eq!(counts.len(), 3, "every heater gets picked");
        for (heater, count) in counts {
            assert!(count > 50, "heater {heater} picked only {count}/300 times");
        }
    }

    #[tokio::test]
    async fn reset_from_staging_clears_everything() {
        let engine = spawn_engine("reset");
        engine.dispatch(MatchEvent::NewMatch).await;
        engine.dispatch(MatchEvent::RandomizeHotspot).await;
        engine.dispatch(MatchEvent::RandomizeSafezone).await;
        engine.dispatch(MatchEvent::StartPreheat).await;
        engine
            .set_toggle("takeoff_complete", TogglePayload::Flag(true))
            .await
            .unwrap();

        engine.dispatch(MatchEvent::ResetMatch).await;
        let snap = engine.snapshot().await;
        assert_eq!(snap.phase, MatchPhase::Idle);
        assert_eq!(snap.hotspot, None);
        assert_eq!(snap.safezone, SafeZone::Unset);
        assert_eq!(snap.toggles, ToggleStore::default());
        assert!(snap.heaters.iter().all(|h| h.state == HeaterState::Idle));
        assert!(snap.buildings.iter().all(|b| b.state == FireState::Idle));
    }

    #[tokio::test(start_paused = true)]
    async fn phase_timers_drive_autonomous_progression() {
        let engine = spawn_engine("progression");
        engine.dispatch(MatchEvent::NewMatch).await;
        engine.dispatch(MatchEvent::MatchStart).await;
        assert_eq!(engine.phase().await, MatchPhase::PhaseOne);
        assert_eq!(engine.snapshot().await.match_remaining, 2 + 2 + 60);

        sleep(Duration::from_millis(2_200)).await;
        assert_eq!(engine.phase().await, MatchPhase::PhaseTwo);

        sleep(Duration::from_millis(2_200)).await;
        let snap = engine.snapshot().await;
        assert_eq!(snap.phase, MatchPhase::PhaseThree);
        assert!(
            snap.buildings.iter().all(|b| b.state == FireState::OnFire),
            "phase 3 entry ignites every fire building"
        );

        sleep(Duration::from_millis(60_200)).await;
        let snap = engine.snapshot().await;
        assert_eq!(snap.phase, MatchPhase::PostMatch);
        assert_eq!(snap.phase_remaining, 0);
        assert_eq!(snap.match_remaining, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn douses_only_count_during_phase_three() {
        let engine = spawn_engine("douse-phase");
        engine.dispatch(MatchEvent::NewMatch).await;
        engine.dispatch(MatchEvent::MatchStart).await;

        engine.dispatch(MatchEvent::FireDoused("b1".into())).await;
        assert_eq!(engine.snapshot().await.score, 0);

        sleep(Duration::from_millis(4_400)).await;
        assert_eq!(engine.phase().await, MatchPhase::PhaseThree);

        engine.dispatch(MatchEvent::FireDoused("b1".into())).await;
        engine.dispatch(MatchEvent::FireDoused("nope".into())).await;
        assert_eq!(engine.snapshot().await.score, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn watcher_reignites_after_the_grace_period() {
        let engine = spawn_engine("watcher");
        engine.dispatch(MatchEvent::NewMatch).await;
        engine.dispatch(MatchEvent::MatchStart).await;
        engine.dispatch(MatchEvent::PhaseOneTimeout).await;
        engine.dispatch(MatchEvent::PhaseTwoTimeout).await;
        assert_eq!(engine.phase().await, MatchPhase::PhaseThree);

        extinguish_all(&engine).await;
        let snap = engine.snapshot().await;
        assert!(
            snap.buildings
                .iter()
                .all(|b| b.state == FireState::Extinguished)
        );

        sleep(Duration::from_millis(4_800)).await;
        assert!(
            engine
                .snapshot()
                .await
                .buildings
                .iter()
                .all(|b| b.state == FireState::Extinguished),
            "no re-ignition before the grace period elapses"
        );

        sleep(Duration::from_millis(500)).await;
        let snap = engine.snapshot().await;
        assert!(
            snap.buildings.iter().all(|b| b.state == FireState::OnFire),
            "all fires re-ignited after the grace period"
        );
        assert!(snap.score >= 24, "douse score survives re-ignition");
    }

    #[tokio::test(start_paused = true)]
    async fn exiting_phase_three_cancels_the_pending_reignition() {
        let engine = spawn_engine("watcher-cancel");
        engine.dispatch(MatchEvent::NewMatch).await;
        engine.dispatch(MatchEvent::MatchStart).await;
        engine.dispatch(MatchEvent::PhaseOneTimeout).await;
        engine.dispatch(MatchEvent::PhaseTwoTimeout).await;

        extinguish_all(&engine).await;
        sleep(Duration::from_secs(1)).await;

        engine.dispatch(MatchEvent::MatchEnd).await;
        assert_eq!(engine.phase().await, MatchPhase::PostMatch);

        sleep(Duration::from_secs(30)).await;
        assert!(
            engine
                .snapshot()
                .await
                .buildings
                .iter()
                .all(|b| b.state == FireState::Extinguished),
            "stopped watcher must not re-ignite anything"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn match_log_written_only_with_id_and_score() {
        let engine = spawn_engine("log-written");
        let log_dir = engine.settings.match_log_dir.clone();

        engine.dispatch(MatchEvent::NewMatch).await;
        engine.dispatch(MatchEvent::MatchStart).await;
        engine.dispatch(MatchEvent::PhaseOneTimeout).await;
        engine.dispatch(MatchEvent::PhaseTwoTimeout).await;
        extinguish_all(&engine).await;
        engine
            .set_toggle("match_id", TogglePayload::Text("test-match 1!".into()))
            .await
            .unwrap();
        engine.dispatch(MatchEvent::MatchEnd).await;

        assert!(!log_dir.exists(), "log is written on post-match exit only");
        engine.dispatch(MatchEvent::ResetMatch).await;

        let path = log_dir.join("test_match1.json");
        assert!(path.exists(), "sanitized log file exists");
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["match_id"], "test-match 1!");
        assert_eq!(value["buildings"]["b1"]["hits"], 16);
        assert_eq!(value["buildings"]["b1"]["windows"], 2);
        std::fs::remove_dir_all(&log_dir).ok();
    }

    #[tokio::test(start_paused = true)]
    async fn no_match_log_without_an_id() {
        let engine = spawn_engine("log-skipped");
        let log_dir = engine.settings.match_log_dir.clone();

        engine.dispatch(MatchEvent::NewMatch).await;
        engine.dispatch(MatchEvent::MatchStart).await;
        engine.dispatch(MatchEvent::PhaseOneTimeout).await;
        engine.dispatch(MatchEvent::PhaseTwoTimeout).await;
        extinguish_all(&engine).await;
        engine.dispatch(MatchEvent::MatchEnd).await;
        engine.dispatch(MatchEvent::ResetMatch).await;

        assert!(!log_dir.exists(), "no id means no log");
    }
}
