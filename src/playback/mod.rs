//! Playback: scheduling a composed performance against a real-time clock.
//!
//! [`PlaybackController`] drives the seams in [`engine`]; [`Transport`] is
//! the crate's thread-backed clock implementation.

pub mod controller;
pub mod engine;
pub mod transport;

pub use controller::{PlaybackController, PlaybackError, GRACE_LEAD, LEAD_TIME};
pub use engine::{
    AudioEngine, EngineError, EventCallback, FxChain, FxParams, Instrument, PlaybackClock,
    ScheduleHandle, VisualSync,
};
pub use transport::Transport;
