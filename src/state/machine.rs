use std::str::FromStr;

use serde::Serialize;

/// High-level phases a match progresses through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// No match is running; everything is reset and waiting.
    Idle,
    /// Match is created; hotspot/safezone can be randomized and preheat started.
    Staging,
    /// Reconnaissance phase, driven by the phase timer.
    PhaseOne,
    /// Logistics phase, driven by the phase timer.
    PhaseTwo,
    /// Firefighting phase: buildings burn and the watcher loop runs.
    PhaseThree,
    /// Match is over; scores stay visible until the next reset.
    PostMatch,
}

impl MatchPhase {
    /// Display label published on the `ui/state/match_state` topic.
    pub fn label(&self) -> &'static str {
        match self {
            MatchPhase::Idle => "Idle",
            MatchPhase::Staging => "Staging/Preheat",
            MatchPhase::PhaseOne => "Phase 1",
            MatchPhase::PhaseTwo => "Phase 2",
            MatchPhase::PhaseThree => "Phase 3",
            MatchPhase::PostMatch => "End Game",
        }
    }
}

/// Events that can be dispatched to the match engine.
///
/// Timeout events are produced internally by the phase timer; the rest arrive
/// from the operator UI over the bus (see [`MatchEvent::from_str`]) or, for
/// [`MatchEvent::FireDoused`], from building hit sensors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// Operator creates a match, moving from idle to staging.
    NewMatch,
    /// Operator starts the match clock.
    MatchStart,
    /// Phase timer expired during phase 1.
    PhaseOneTimeout,
    /// Phase timer expired during phase 2.
    PhaseTwoTimeout,
    /// Phase timer expired during phase 3.
    PhaseThreeTimeout,
    /// Operator ends the match early from any running phase.
    MatchEnd,
    /// Operator returns to idle from staging or post-match.
    ResetMatch,
    /// Pick a random heater as the hotspot (staging only).
    RandomizeHotspot,
    /// Pick a random safezone color (staging only).
    RandomizeSafezone,
    /// Ignite the chosen hotspot heater (staging only).
    StartPreheat,
    /// A hit sensor on the named building reported a douse (phase 3 only).
    FireDoused(String),
}

/// Error returned when a wire event name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventName(
    /// The unrecognized wire name.
    pub String,
);

impl FromStr for MatchEvent {
    type Err = UnknownEventName;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "new_match" => Ok(MatchEvent::NewMatch),
            "match_start" => Ok(MatchEvent::MatchStart),
            "match_end" => Ok(MatchEvent::MatchEnd),
            "reset_match" => Ok(MatchEvent::ResetMatch),
            "randomize_hotspot" => Ok(MatchEvent::RandomizeHotspot),
            "randomize_safezone" => Ok(MatchEvent::RandomizeSafezone),
            "start_preheat" => Ok(MatchEvent::StartPreheat),
            other => Err(UnknownEventName(other.to_string())),
        }
    }
}

/// Compute the phase a transition event leads to, if any.
///
/// Events not listed for the current phase return `None` and leave the phase
/// unchanged; in-state events (randomization, preheat, douses) are handled by
/// the engine before this table is consulted and never appear here.
pub fn transition(phase: MatchPhase, event: &MatchEvent) -> Option<MatchPhase> {
    match (phase, event) {
        (MatchPhase::Idle, MatchEvent::NewMatch) => Some(MatchPhase::Staging),
        (MatchPhase::Staging, MatchEvent::MatchStart) => Some(MatchPhase::PhaseOne),
        (MatchPhase::PhaseOne, MatchEvent::PhaseOneTimeout) => Some(MatchPhase::PhaseTwo),
        (MatchPhase::PhaseTwo, MatchEvent::PhaseTwoTimeout) => Some(MatchPhase::PhaseThree),
        (MatchPhase::PhaseThree, MatchEvent::PhaseThreeTimeout) => Some(MatchPhase::PostMatch),
        (
            MatchPhase::PhaseOne | MatchPhase::PhaseTwo | MatchPhase::PhaseThree,
            MatchEvent::MatchEnd,
        ) => Some(MatchPhase::PostMatch),
        (MatchPhase::Staging | MatchPhase::PostMatch, MatchEvent::ResetMatch) => {
            Some(MatchPhase::Idle)
        }
        _ => None,
    }
}
