use thiserror::Error;

/// Errors raised at the bus boundary while translating inbound messages.
///
/// All of these are observability events: the message is dropped, the engine
/// state is untouched, and the caller logs the error.
#[derive(Debug, Error)]
pub enum EventError {
    /// Payload was not valid JSON or was missing required fields.
    #[error("malformed payload on `{topic}`: {reason}")]
    MalformedPayload {
        /// Topic the message arrived on.
        topic: String,
        /// Why the payload was rejected.
        reason: String,
    },
    /// Topic did not match the consumed `{source}/events/{subsystem}` grammar.
    #[error("unroutable topic `{0}`")]
    UnroutableTopic(String),
    /// The `event_type` field named an event the engine does not know.
    #[error("unknown event `{0}`")]
    UnknownEvent(String),
    /// A UI toggle referenced a name outside the known toggle set.
    #[error("unknown toggle `{0}`")]
    UnknownToggle(String),
    /// A UI toggle carried a payload of the wrong type for its field.
    #[error("invalid payload for toggle `{toggle}`: expected {expected}")]
    InvalidToggle {
        /// Toggle name as received.
        toggle: String,
        /// Payload kind the toggle requires.
        expected: &'static str,
    },
}

/// Errors from persisting the end-of-match log record.
#[derive(Debug, Error)]
pub enum MatchLogError {
    /// The sanitized match identifier was empty, leaving no usable filename.
    #[error("match id `{0}` sanitizes to an empty filename")]
    UnusableMatchId(String),
    /// The record could not be serialized.
    #[error("failed to encode match log")]
    Encode(#[source] serde_json::Error),
    /// The log directory or file could not be written.
    #[error("failed to write match log to {path}")]
    Write {
        /// Destination path of the failed write.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
