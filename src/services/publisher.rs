//! Outbound status publisher: turns an engine snapshot into the bus topics
//! the operator UI and the building adapters consume, and pushes the full
//! set onto a channel at a fixed cadence. The bus transport owns the other
//! end of the channel.

use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::warn;

use crate::dto::status::{
    HotspotState, MatchState, PixelStrip, RelayCommand, RelayState, SafezoneState, ScoreState,
    TableRow, TimeState, ToggleState,
};
use crate::dto::format_clock;
use crate::state::building::{BuildingSnapshot, HeaterState};
use crate::state::machine::MatchPhase;
use crate::state::{EngineSnapshot, SharedEngine};

/// Interval between full status publications.
const PUBLISH_INTERVAL: Duration = Duration::from_millis(500);
/// Number of pixels on a building's LED strip.
const STRIP_LEN: usize = 30;
/// Strip color for a burning fire step.
const FIRE_PIXEL: [u8; 3] = [0, 0, 255];

/// One message bound for the bus.
#[derive(Debug, Clone, PartialEq)]
pub struct BusMessage {
    /// Destination topic.
    pub topic: String,
    /// JSON payload.
    pub payload: serde_json::Value,
}

fn message<T: serde::Serialize>(topic: impl Into<String>, payload: &T) -> BusMessage {
    BusMessage {
        topic: topic.into(),
        payload: serde_json::to_value(payload).unwrap_or(serde_json::Value::Null),
    }
}

/// Generate the complete outbound set for one snapshot: UI state topics
/// followed by the hardware commands.
pub fn status_messages(snapshot: &EngineSnapshot) -> Vec<BusMessage> {
    let mut messages = ui_messages(snapshot);
    messages.extend(hardware_messages(snapshot));
    messages
}

/// Operator display topics.
fn ui_messages(snapshot: &EngineSnapshot) -> Vec<BusMessage> {
    let mut messages = vec![
        message(
            "ui/state/score",
            &ScoreState {
                current_score: snapshot.score,
            },
        ),
        message(
            "ui/state/match_state",
            &MatchState {
                state: snapshot.phase.label(),
            },
        ),
        message(
            "ui/state/hotspot_building",
            &HotspotState {
                building: snapshot.hotspot.clone().unwrap_or_default(),
            },
        ),
        message(
            "ui/state/safezone",
            &SafezoneState {
                zone: snapshot.safezone,
            },
        ),
        message(
            "ui/state/phase_remaining",
            &TimeState {
                time: format_clock(snapshot.phase_remaining),
            },
        ),
        message(
            "ui/state/match_remaining",
            &TimeState {
                time: format_clock(snapshot.match_remaining),
            },
        ),
    ];

    let table: Vec<TableRow> = snapshot
        .buildings
        .iter()
        .map(|building| TableRow {
            building: building.id.clone(),
            state: building.state.label(),
            fire_level: building.intensity * 100 / building.kind.initial_intensity(),
            score: building.score,
        })
        .collect();
    messages.push(message("ui/state/table_data", &table));

    // Echo every declaration back so UI clients can stay in sync.
    if let Ok(serde_json::Value::Object(toggles)) = serde_json::to_value(&snapshot.toggles) {
        for (name, value) in toggles {
            messages.push(message(
                format!("ui/state/{name}"),
                &ToggleState { data: value },
            ));
        }
    }

    messages
}

/// Relay and LED commands derived from building and heater state.
fn hardware_messages(snapshot: &EngineSnapshot) -> Vec<BusMessage> {
    let mut messages = Vec::new();
    let hopper_state = if snapshot.phase == MatchPhase::PhaseThree {
        RelayState::On
    } else {
        RelayState::Off
    };

    for building in &snapshot.buildings {
        let id = &building.id;
        messages.push(message(
            format!("{id}/progress_bar/set"),
            &PixelStrip {
                pixel_data: strip_pixels(building),
            },
        ));

        let half = building.kind.initial_intensity() / 2;
        let (window1, window2) = if building.intensity > half {
            (RelayState::On, RelayState::On)
        } else if building.intensity > 0 {
            (RelayState::On, RelayState::Off)
        } else {
            (RelayState::Off, RelayState::Off)
        };
        messages.push(message(
            format!("{id}/relay/set"),
            &RelayCommand {
                channel: "window1",
                state: window1,
            },
        ));
        messages.push(message(
            format!("{id}/relay/set"),
            &RelayCommand {
                channel: "window2",
                state: window2,
            },
        ));
        messages.push(message(
            format!("{id}/relay/set"),
            &RelayCommand {
                channel: "hopper",
                state: hopper_state,
            },
        ));
    }

    for heater in &snapshot.heaters {
        let state = if heater.state == HeaterState::OnFire {
            RelayState::On
        } else {
            RelayState::Off
        };
        messages.push(message(
            format!("{}/relay/set", heater.id),
            &RelayCommand {
                channel: "heater",
                state,
            },
        ));
    }

    messages
}

/// Render a building's fire intensity onto its LED strip: the first window's
/// share fills from the left, the second window's share fills from the
/// right. Laser buildings light two pixels per fire step, ball buildings
/// one.
fn strip_pixels(building: &BuildingSnapshot) -> Vec<[u8; 3]> {
    let mut pixels = vec![[0, 0, 0]; STRIP_LEN];

    let init = building.kind.initial_intensity() as usize;
    let level = building.intensity as usize;
    let pixels_per_step = if init <= 8 { 2 } else { 1 };
    let half = init / 2;

    let (left, right) = if level > half {
        (half * pixels_per_step, (level - half) * pixels_per_step)
    } else {
        (level * pixels_per_step, 0)
    };

    for pixel in pixels.iter_mut().take(left) {
        *pixel = FIRE_PIXEL;
    }
    for pixel in pixels.iter_mut().rev().take(right) {
        *pixel = FIRE_PIXEL;
    }

    pixels
}

/// Publish the full status set at the fixed cadence until the transport end
/// of the channel is dropped.
pub async fn run_status_publisher(engine: SharedEngine, tx: mpsc::UnboundedSender<BusMessage>) {
    let mut ticker = interval(PUBLISH_INTERVAL);
    loop {
        ticker.tick().await;
        let snapshot = engine.snapshot().await;
        for msg in status_messages(&snapshot) {
            if tx.send(msg).is_err() {
                warn!("bus transport closed; stopping status publisher");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SafeZone;
    use crate::state::building::{BuildingKind, FireState};
    use crate::state::toggles::ToggleStore;
    use crate::state::HeaterSnapshot;

    fn building(id: &str, kind: BuildingKind, intensity: u32, score: u32) -> BuildingSnapshot {
        let state = if intensity > 0 {
            FireState::OnFire
        } else {
            FireState::Idle
        };
        BuildingSnapshot {
            id: id.to_string(),
            kind,
            state,
            intensity,
            score,
        }
    }

    fn snapshot(phase: MatchPhase) -> EngineSnapshot {
        EngineSnapshot {
            phase,
            phase_remaining: 65,
            match_remaining: 130,
            hotspot: Some("7".to_string()),
            safezone: SafeZone::Blue,
            score: 12,
            toggles: ToggleStore::default(),
            buildings: vec![
                building("2", BuildingKind::Ball, 16, 0),
                building("1", BuildingKind::Laser, 3, 5),
            ],
            heaters: vec![
                HeaterSnapshot {
                    id: "7".to_string(),
                    state: HeaterState::OnFire,
                },
                HeaterSnapshot {
                    id: "8".to_string(),
                    state: HeaterState::Idle,
                },
            ],
        }
    }

    fn find<'a>(messages: &'a [BusMessage], topic: &str) -> &'a BusMessage {
        messages
            .iter()
            .find(|m| m.topic == topic)
            .unwrap_or_else(|| panic!("missing topic {topic}"))
    }

    #[test]
    fn ui_topics_reflect_the_snapshot() {
        let messages = status_messages(&snapshot(MatchPhase::PhaseThree));

        assert_eq!(find(&messages, "ui/state/score").payload["current_score"], 12);
        assert_eq!(
            find(&messages, "ui/state/match_state").payload["state"],
            "Phase 3"
        );
        assert_eq!(
            find(&messages, "ui/state/hotspot_building").payload["building"],
            "7"
        );
        assert_eq!(find(&messages, "ui/state/safezone").payload["zone"], "BLUE");
        assert_eq!(
            find(&messages, "ui/state/phase_remaining").payload["time"],
            "01:05"
        );
        assert_eq!(
            find(&messages, "ui/state/match_remaining").payload["time"],
            "02:10"
        );

        let table = &find(&messages, "ui/state/table_data").payload;
        assert_eq!(table[0]["building"], "2");
        assert_eq!(table[0]["state"], "Burning");
        assert_eq!(table[0]["fire_level"], 100);
        assert_eq!(table[1]["fire_level"], 37, "3 of 8 steps remaining");
        assert_eq!(table[1]["score"], 5);
    }

    #[test]
    fn every_toggle_is_echoed_to_the_ui() {
        let messages = status_messages(&snapshot(MatchPhase::Idle));
        assert_eq!(
            find(&messages, "ui/state/takeoff_complete").payload["data"],
            false
        );
        assert_eq!(
            find(&messages, "ui/state/crates_loaded").payload["data"],
            0
        );
        assert_eq!(find(&messages, "ui/state/match_id").payload["data"], "");
    }

    #[test]
    fn window_relays_track_fire_halves() {
        let messages = status_messages(&snapshot(MatchPhase::PhaseThree));

        let ball_relays: Vec<_> = messages
            .iter()
            .filter(|m| m.topic == "2/relay/set")
            .collect();
        assert_eq!(ball_relays[0].payload["channel"], "window1");
        assert_eq!(ball_relays[0].payload["state"], "on");
        assert_eq!(ball_relays[1].payload["channel"], "window2");
        assert_eq!(ball_relays[1].payload["state"], "on");

        // Laser building at 3/8 is below the halfway point.
        let laser_relays: Vec<_> = messages
            .iter()
            .filter(|m| m.topic == "1/relay/set")
            .collect();
        assert_eq!(laser_relays[0].payload["state"], "on");
        assert_eq!(laser_relays[1].payload["state"], "off");
    }

    #[test]
    fn hopper_relay_is_on_during_phase_three_only() {
        for (phase, expected) in [
            (MatchPhase::PhaseThree, "on"),
            (MatchPhase::PhaseTwo, "off"),
            (MatchPhase::Idle, "off"),
        ] {
            let messages = status_messages(&snapshot(phase));
            let hopper = messages
                .iter()
                .find(|m| m.topic == "2/relay/set" && m.payload["channel"] == "hopper")
                .expect("hopper command");
            assert_eq!(hopper.payload["state"], expected, "{phase:?}");
        }
    }

    #[test]
    fn heater_relays_mirror_heater_state() {
        let messages = status_messages(&snapshot(MatchPhase::Staging));
        assert_eq!(find(&messages, "7/relay/set").payload["state"], "on");
        assert_eq!(find(&messages, "8/relay/set").payload["state"], "off");
    }

    #[test]
    fn full_ball_fire_lights_both_windows_of_the_strip() {
        let strip = strip_pixels(&building("2", BuildingKind::Ball, 16, 0));
        assert_eq!(strip.len(), STRIP_LEN);
        // 8 steps per window, one pixel per step.
        for pixel in &strip[..8] {
            assert_eq!(*pixel, FIRE_PIXEL);
        }
        for pixel in &strip[8..22] {
            assert_eq!(*pixel, [0, 0, 0]);
        }
        for pixel in &strip[22..] {
            assert_eq!(*pixel, FIRE_PIXEL);
        }
    }

    #[test]
    fn laser_strip_lights_two_pixels_per_step() {
        let strip = strip_pixels(&building("1", BuildingKind::Laser, 3, 0));
        for pixel in &strip[..6] {
            assert_eq!(*pixel, FIRE_PIXEL);
        }
        for pixel in &strip[6..] {
            assert_eq!(*pixel, [0, 0, 0]);
        }

        let strip = strip_pixels(&building("1", BuildingKind::Laser, 6, 0));
        // First window full (4 steps = 8 px), second window 2 steps from the right.
        for pixel in &strip[..8] {
            assert_eq!(*pixel, FIRE_PIXEL);
        }
        for pixel in &strip[8..26] {
            assert_eq!(*pixel, [0, 0, 0]);
        }
        for pixel in &strip[26..] {
            assert_eq!(*pixel, FIRE_PIXEL);
        }
    }

    #[test]
    fn extinguished_building_has_a_dark_strip() {
        let strip = strip_pixels(&building("2", BuildingKind::Ball, 0, 16));
        assert!(strip.iter().all(|p| *p == [0, 0, 0]));
    }
}
