//! Inbound bus boundary: translates `{source}/events/{subsystem}` messages
//! into engine calls. All validation happens here, before anything is
//! dispatched; rejected messages leave the engine untouched.

use crate::dto::events::{SensorEvent, UiEvent};
use crate::error::EventError;
use crate::state::SharedEngine;
use crate::state::machine::MatchEvent;

/// Detector subsystems whose `hit` events count as douses.
const DETECTOR_SUBSYSTEMS: [&str; 2] = ["ball_detector", "laser_detector"];

/// Route one inbound bus message to the engine.
pub async fn handle_bus_message(
    engine: &SharedEngine,
    topic: &str,
    payload: &[u8],
) -> Result<(), EventError> {
    let parts: Vec<&str> = topic.split('/').collect();
    if parts.len() < 3 || parts[1] != "events" {
        return Err(EventError::UnroutableTopic(topic.to_string()));
    }

    if parts[0] == "ui" {
        handle_ui_event(engine, topic, payload).await
    } else {
        handle_sensor_event(engine, topic, parts[0], parts[2], payload).await
    }
}

/// Operator UI traffic: either a toggle declaration or a named engine event.
async fn handle_ui_event(
    engine: &SharedEngine,
    topic: &str,
    payload: &[u8],
) -> Result<(), EventError> {
    let event: UiEvent = decode(topic, payload)?;

    if event.event_type == "ui_toggle" {
        let data = event.data.ok_or_else(|| EventError::MalformedPayload {
            topic: topic.to_string(),
            reason: "ui_toggle without toggle data".to_string(),
        })?;
        return engine.set_toggle(&data.toggle, data.payload).await;
    }

    let event: MatchEvent = event
        .event_type
        .parse()
        .map_err(|_| EventError::UnknownEvent(event.event_type))?;
    engine.dispatch(event).await;
    Ok(())
}

/// Building detector traffic: `hit` events become douses on that building.
async fn handle_sensor_event(
    engine: &SharedEngine,
    topic: &str,
    source: &str,
    subsystem: &str,
    payload: &[u8],
) -> Result<(), EventError> {
    if !DETECTOR_SUBSYSTEMS.contains(&subsystem) {
        return Err(EventError::UnroutableTopic(topic.to_string()));
    }

    let event: SensorEvent = decode(topic, payload)?;
    if event.event_type != "hit" {
        return Err(EventError::UnknownEvent(event.event_type));
    }

    engine
        .dispatch(MatchEvent::FireDoused(source.to_string()))
        .await;
    Ok(())
}

fn decode<T: serde::de::DeserializeOwned>(topic: &str, payload: &[u8]) -> Result<T, EventError> {
    serde_json::from_slice(payload).map_err(|err| EventError::MalformedPayload {
        topic: topic.to_string(),
        reason: err.to_string(),
    })
}
