/// Inbound bus message routing and decoding.
pub mod events;
/// Outbound status and hardware command generation.
pub mod publisher;
/// Pure score computation over toggles and building state.
pub mod scoring;
