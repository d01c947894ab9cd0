use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::debug;

use crate::state::machine::MatchEvent;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct TimerState {
    remaining: u64,
    enabled: bool,
    expiry: Option<MatchEvent>,
}

/// A decrement-per-second countdown that sends an optional expiry event on
/// the engine's event channel when it reaches zero while enabled.
///
/// The ticking task is spawned once and lives for the process; the timer is
/// re-armed across matches rather than recreated. The expiry event is sent at
/// most once per arm cycle: reaching zero disables the timer, and a fresh
/// [`CountdownTimer::arm`] + [`CountdownTimer::start`] is required to fire
/// again.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    inner: Arc<Mutex<TimerState>>,
}

impl CountdownTimer {
    /// Create the timer and spawn its ticking task. Expiry events are
    /// delivered on `events`, never invoked while the timer lock is held.
    pub fn spawn(label: &'static str, events: mpsc::UnboundedSender<MatchEvent>) -> Self {
        let inner = Arc::new(Mutex::new(TimerState {
            remaining: 0,
            enabled: false,
            expiry: None,
        }));

        let tick_state = Arc::clone(&inner);
        tokio::spawn(async move {
            loop {
                sleep(TICK).await;
                let expired = {
                    let mut state = tick_state.lock().expect("timer lock");
                    if !state.enabled {
                        continue;
                    }
                    if state.remaining >= 1 {
                        state.remaining -= 1;
                    }
                    if state.remaining == 0 && state.expiry.is_some() {
                        state.enabled = false;
                        state.expiry.clone()
                    } else {
                        None
                    }
                };
                if let Some(event) = expired {
                    debug!(timer = label, ?event, "timer expired");
                    // Delivery failing means the engine is gone; the task
                    // simply keeps idling until the process exits.
                    let _ = events.send(event);
                }
            }
        });

        Self { inner }
    }

    /// Disable the timer and load a new duration and expiry event. The timer
    /// stays paused until [`CountdownTimer::start`] is called.
    pub fn arm(&self, seconds: u64, expiry: Option<MatchEvent>) {
        let mut state = self.inner.lock().expect("timer lock");
        state.enabled = false;
        state.remaining = seconds;
        state.expiry = expiry;
    }

    /// Begin (or resume) counting down.
    pub fn start(&self) {
        self.inner.lock().expect("timer lock").enabled = true;
    }

    /// Stop counting without clearing the remaining time.
    pub fn pause(&self) {
        self.inner.lock().expect("timer lock").enabled = false;
    }

    /// Disable and clear the remaining time.
    pub fn reset(&self) {
        let mut state = self.inner.lock().expect("timer lock");
        state.enabled = false;
        state.remaining = 0;
    }

    /// Seconds left on the countdown.
    pub fn remaining(&self) -> u64 {
        self.inner.lock().expect("timer lock").remaining
    }
}
