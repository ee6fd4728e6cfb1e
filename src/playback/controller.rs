//! Playback controller: owns the session lifecycle around a performance.
//!
//! One session at a time. `play` while a session is active is rejected;
//! callers stop first. All resource handles (instrument, effects, schedule
//! handles) live in the session object, so stopping tears everything down
//! without ambient state.

use std::sync::Arc;

use log::{info, warn};

use crate::pipeline::Performance;
use crate::style::note_name;

use super::engine::{
    AudioEngine, FxChain, FxParams, Instrument, PlaybackClock, ScheduleHandle, VisualSync,
};

/// Seconds between `play` returning and the clock reaching time zero, giving
/// resource setup room to finish before the first event.
pub const LEAD_TIME: f64 = 0.05;

/// Grace notes sound this long before their main note.
pub const GRACE_LEAD: f64 = 0.05;
const GRACE_DURATION: f64 = 0.06;
const GRACE_VELOCITY: f64 = 0.3;

/// Why a play request was refused. Raised before any scheduling side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// A session is already active; call [`PlaybackController::stop`] first.
    SessionActive,
    /// The performance has no events to schedule.
    NoEvents,
}

impl std::fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackError::SessionActive => {
                write!(f, "a playback session is already active (stop it first)")
            }
            PlaybackError::NoEvents => write!(f, "performance contains no events"),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Resources owned by one active session.
struct Session {
    instrument: Arc<dyn Instrument>,
    fx: Box<dyn FxChain>,
    handles: Vec<ScheduleHandle>,
}

/// Schedules a composed performance against the engine's clock and owns
/// start/stop of the audio resources.
pub struct PlaybackController {
    engine: Box<dyn AudioEngine>,
    session: Option<Session>,
    lead_time: f64,
}

impl PlaybackController {
    pub fn new(engine: Box<dyn AudioEngine>) -> Self {
        Self {
            engine,
            session: None,
            lead_time: LEAD_TIME,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// Start a playback session for `performance`.
    ///
    /// Contract: rejects with [`PlaybackError::SessionActive`] while a
    /// session is active — this controller never implicitly stops. An empty
    /// performance is rejected before anything is scheduled. Instrument load
    /// failure is non-fatal: the engine's fallback voice substitutes.
    ///
    /// Every event is dispatched at its onset: the main voice triggers and
    /// the visual marker draws at that same instant. A grace note gets its
    /// own schedule entry `GRACE_LEAD` earlier, clamped so it never precedes
    /// the clock's current position.
    pub fn play(
        &mut self,
        performance: &Performance,
        visual: Arc<dyn VisualSync>,
    ) -> Result<(), PlaybackError> {
        if self.session.is_some() {
            return Err(PlaybackError::SessionActive);
        }
        if performance.events.is_empty() {
            return Err(PlaybackError::NoEvents);
        }

        let profile = performance.style.profile();
        let clock = self.engine.clock();

        // The clock is process-wide: make sure no stale schedule survives
        // from a previous session before this one touches it.
        clock.stop();
        clock.cancel_all();
        clock.reset();
        clock.set_bpm(profile.bpm);

        let fx = self
            .engine
            .build_fx_chain(performance.style, &FxParams::default());
        let instrument = match self.engine.load_instrument(performance.style) {
            Ok(instrument) => instrument,
            Err(err) => {
                warn!("{err}; substituting fallback synth");
                self.engine.fallback_instrument()
            }
        };

        visual.capture_baseline();

        let mut handles = Vec::with_capacity(performance.events.len());
        for event in &performance.events {
            let event = *event;
            let instrument = Arc::clone(&instrument);
            let visual = Arc::clone(&visual);

            if let Some(grace) = event.grace_pitch {
                let grace_voice = Arc::clone(&instrument);
                let clock_for_grace = Arc::clone(&clock);
                handles.push(clock.schedule(
                    (event.onset - GRACE_LEAD).max(0.0),
                    Box::new(move |_time| {
                        // Safety clamp only: a grace near time zero must not
                        // land before the clock's current position.
                        let grace_at = (event.onset - GRACE_LEAD).max(clock_for_grace.now());
                        grace_voice.trigger_note(grace, GRACE_DURATION, grace_at, GRACE_VELOCITY);
                    }),
                ));
            }

            handles.push(clock.schedule(
                event.onset,
                Box::new(move |time| {
                    instrument.trigger_note(event.pitch, event.duration, time, event.velocity);
                    visual.draw_marker(event.source_x, event.source_y);
                }),
            ));
        }

        clock.start(self.lead_time);
        info!(
            "session started: {} events, {:?}, {} bpm, first note {}",
            performance.events.len(),
            performance.style,
            profile.bpm,
            note_name(performance.events[0].pitch),
        );

        self.session = Some(Session {
            instrument,
            fx,
            handles,
        });
        Ok(())
    }

    /// Stop the active session and release its resources.
    ///
    /// Idempotent: with no session this is a no-op, never an error. After
    /// returning, no scheduled callback will fire.
    pub fn stop(&mut self) {
        let clock = self.engine.clock();
        clock.stop();

        if let Some(mut session) = self.session.take() {
            for handle in session.handles.drain(..) {
                clock.cancel(handle);
            }
            clock.cancel_all();
            clock.reset();

            session.instrument.dispose();
            session.fx.dispose();
            info!("session stopped");
        } else {
            clock.cancel_all();
            clock.reset();
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.stop();
    }
}
