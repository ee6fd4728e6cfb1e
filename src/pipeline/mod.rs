//! Edge-to-music pipeline: banding, thinning, pitch mapping, rhythm.
//!
//! [`compose`] runs the whole chain synchronously and returns a finished
//! [`Performance`]; nothing touches the playback clock here. Every random
//! choice (pattern draw, humanization, nudge direction, grace chance) comes
//! from the caller's injected rng, so a seeded run replays exactly.

pub mod banding;
pub mod mapping;
pub mod rhythm;

pub use banding::Band;
pub use mapping::{MappedPoint, PitchMapper};
pub use rhythm::MusicalEvent;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::debug;
use rand::Rng;

use crate::edge::EdgePoint;
use crate::sequencing::{DurationPattern, Groove};
use crate::style::Style;

/// Tunables for the edge-to-music mapping. `Default` is the shipped tuning:
/// 48 bands of 2 s, light shuffle, velocities in the upper dynamic range.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposeConfig {
    /// Number of horizontal bands the image is sliced into.
    pub bands: u32,
    /// Seconds of timeline per band.
    pub span_seconds: f64,
    /// Silent gap between consecutive bands, seconds.
    pub gap_seconds: f64,
    /// Horizontal thinning cell width in pixels.
    pub thin_cell_x: u32,
    /// Number of vertical pitch lanes.
    pub lanes: u32,
    /// Exponent biasing lanes toward lower pitches (> 1 darkens).
    pub pitch_curve: f64,
    /// Octave transposition applied after the scale walk.
    pub octave_shift: i32,
    /// Velocity range for normalized magnitudes.
    pub vel_min: f64,
    pub vel_max: f64,
    /// Whether the top of the image maps to higher pitch.
    pub y_up_is_higher: bool,
    /// Swing amount; 0.5 is straight time.
    pub swing: f64,
    /// Humanization jitter bound, seconds.
    pub humanize: f64,
    /// Chance of attaching a grace note to an eligible event.
    pub grace_probability: f64,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            bands: 48,
            span_seconds: 2.0,
            gap_seconds: 0.10,
            thin_cell_x: 6,
            lanes: 10,
            pitch_curve: 1.3,
            octave_shift: -1,
            vel_min: 0.55,
            vel_max: 0.95,
            y_up_is_higher: true,
            swing: 0.58,
            humanize: 0.020,
            grace_probability: 0.15,
        }
    }
}

/// A finished composition: the resolved style plus the time-ordered events.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Performance {
    pub style: Style,
    pub events: Vec<MusicalEvent>,
}

impl Performance {
    /// Timeline position just past the last onset, seconds. Zero when empty.
    pub fn end_seconds(&self) -> f64 {
        self.events
            .iter()
            .map(|e| e.onset + e.duration)
            .fold(0.0, f64::max)
    }
}

/// Why a composition produced nothing playable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// No edge points were supplied, or the image dimensions are degenerate.
    NoEdgePoints,
    /// Every band came out empty after thinning and cutoff.
    NoPlayableEvents,
}

impl std::fmt::Display for ComposeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComposeError::NoEdgePoints => {
                write!(f, "no edge points to map (run edge detection first)")
            }
            ComposeError::NoPlayableEvents => {
                write!(f, "edge points produced no playable events")
            }
        }
    }
}

impl std::error::Error for ComposeError {}

/// Map an edge point set into a scheduled performance.
///
/// Runs end-to-end before any playback: band segmentation, per-band thinning,
/// pitch/velocity mapping, rhythm layout with groove quantization, and
/// ornamentation. Bands without points keep their time slot, so pacing does
/// not depend on edge density.
pub fn compose(
    points: &[EdgePoint],
    img_w: u32,
    img_h: u32,
    style: Style,
    config: &ComposeConfig,
    rng: &mut impl Rng,
) -> Result<Performance, ComposeError> {
    if points.is_empty() || img_w == 0 || img_h == 0 {
        return Err(ComposeError::NoEdgePoints);
    }

    let profile = style.profile();
    let groove = Groove::new(profile.bpm, config.swing, config.humanize);
    let mapper = PitchMapper::new(img_h, profile.scale, config);
    let bands = banding::segment(img_h, config.bands, config.span_seconds, config.gap_seconds);

    let mut events = Vec::new();
    for band in &bands {
        let in_band = banding::points_in_band(points, band);
        let thinned = banding::thin(&in_band, config.thin_cell_x);
        if thinned.is_empty() {
            // The band still occupies its slot on the timeline.
            continue;
        }

        let mapped = mapper.map_band(&thinned);
        let pattern = DurationPattern::choose(rng);
        let before = events.len();
        rhythm::lay_out_band(
            &mapped,
            band,
            pattern,
            profile.bpm,
            &groove,
            profile.ornaments,
            config.grace_probability,
            &mut events,
            rng,
        );

        debug!(
            "band {}: {} points, {} thinned, {} events",
            band.index,
            in_band.len(),
            mapped.len(),
            events.len() - before
        );
    }

    if events.is_empty() {
        return Err(ComposeError::NoPlayableEvents);
    }

    debug!(
        "composed {} events over {} bands ({:?})",
        events.len(),
        bands.len(),
        style
    );

    Ok(Performance { style, events })
}
