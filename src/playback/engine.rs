//! Collaborator seams for the playback side: the audio engine that renders
//! notes, the shared clock events are scheduled against, and the drawing
//! surface that mirrors each note visually.
//!
//! The crate never renders audio itself; it owns timing, ordering, and
//! resource lifecycle, and drives these traits.

use std::sync::Arc;

use crate::sequencing::Duration;
use crate::style::Style;

/// A callback scheduled on the playback clock. Receives the exact scheduled
/// time so triggers can be sample-accurate even if dispatch runs late.
pub type EventCallback = Box<dyn FnOnce(f64) + Send>;

/// Identifies one scheduled callback for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(pub u64);

/// The shared absolute-time reference all events are scheduled against.
///
/// One clock per process playback session: `start(lead)` begins advancing
/// time `lead` seconds later, `stop` halts and guarantees no further callback
/// fires, `reset` rewinds the position to zero.
pub trait PlaybackClock: Send + Sync {
    /// Register `callback` to fire at absolute time `at` (seconds). Callbacks
    /// registered before `start` are held until the clock reaches them.
    fn schedule(&self, at: f64, callback: EventCallback) -> ScheduleHandle;

    /// Drop one pending callback. Unknown or already-fired handles are
    /// ignored.
    fn cancel(&self, handle: ScheduleHandle);

    /// Drop every pending callback.
    fn cancel_all(&self);

    /// Begin advancing time, with time zero `lead` seconds in the future.
    fn start(&self, lead: f64);

    /// Halt the clock. After this returns, no callback will fire. No-op when
    /// already stopped.
    fn stop(&self);

    /// Rewind the position to zero. Pending callbacks are kept.
    fn reset(&self);

    /// Tempo hint for tempo-synced collaborators (delay times etc.).
    fn set_bpm(&self, bpm: f64);

    /// Current position in seconds; 0 while stopped, negative during the
    /// lead-in.
    fn now(&self) -> f64;
}

/// A playable voice. `Send + Sync` because triggers run on the clock's
/// dispatch thread while the controller keeps its own handle for disposal.
pub trait Instrument: Send + Sync {
    /// Sound `pitch` for `duration` seconds starting at absolute clock time
    /// `at`, at normalized `velocity`.
    fn trigger_note(&self, pitch: i32, duration: f64, at: f64, velocity: f64);

    /// Release any underlying resources. Must be safe to call once playback
    /// has stopped; further triggers after disposal are ignored.
    fn dispose(&self) {}
}

/// An effects chain built for one session, disposed with it.
pub trait FxChain: Send {
    fn dispose(&mut self);
}

/// Parameters for the default reverb-into-ping-pong-delay chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FxParams {
    pub reverb_decay: f64,
    pub reverb_wet: f64,
    /// Delay time as a note value, resolved at the session tempo.
    pub delay_time: Duration,
    pub delay_feedback: f64,
    pub delay_wet: f64,
}

impl Default for FxParams {
    fn default() -> Self {
        Self {
            reverb_decay: 2.5,
            reverb_wet: 0.25,
            delay_time: Duration::EIGHTH,
            delay_feedback: 0.25,
            delay_wet: 0.2,
        }
    }
}

/// Instrument construction failure (missing samples, decode errors). Always
/// recoverable: the controller substitutes the fallback voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub reason: String,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "instrument load failed: {}", self.reason)
    }
}

impl std::error::Error for EngineError {}

/// The audio engine collaborator: owns the clock and builds per-session
/// resources.
pub trait AudioEngine: Send {
    /// The process-wide playback clock.
    fn clock(&self) -> Arc<dyn PlaybackClock>;

    /// Build the effects chain for a session. Connected on construction,
    /// released via [`FxChain::dispose`].
    fn build_fx_chain(&mut self, style: Style, params: &FxParams) -> Box<dyn FxChain>;

    /// Load the style's preferred instrument. Sample-backed voices may fail.
    fn load_instrument(&mut self, style: Style) -> Result<Arc<dyn Instrument>, EngineError>;

    /// The always-available synthesizer voice used when loading fails.
    fn fallback_instrument(&mut self) -> Arc<dyn Instrument>;
}

/// Visual-sync collaborator: a surface that can capture a baseline frame and
/// later restore it with a marker drawn at the given pixel.
pub trait VisualSync: Send + Sync {
    /// Capture the current frame as the baseline for marker drawing.
    fn capture_baseline(&self);

    /// Restore the baseline and draw a marker at `(x, y)`. Called when the
    /// matching note is dispatched, not at schedule time.
    fn draw_marker(&self, x: u32, y: u32);
}
