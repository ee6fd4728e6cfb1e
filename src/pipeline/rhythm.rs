//! Rhythm assigner and ornamentation.
//!
//! Points arrive sorted left to right; each takes the next entry of the
//! band's duration template. A cursor walks the band's span and stops the
//! walk with a hard cutoff once the span is filled — leftover points are
//! dropped, not squeezed in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::sequencing::{DurationPattern, Groove};

use super::banding::Band;
use super::mapping::MappedPoint;

/// One scheduled note of the performance.
///
/// Created here, consumed (never mutated) by the playback scheduler.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicalEvent {
    /// MIDI note number.
    pub pitch: i32,
    /// Absolute onset on the playback clock, seconds.
    pub onset: f64,
    /// Note length in seconds.
    pub duration: f64,
    /// Normalized velocity.
    pub velocity: f64,
    /// Pixel coordinates of the source edge point, for visual sync.
    pub source_x: u32,
    pub source_y: u32,
    /// Ornament: grace note pitch to sound just before the main onset.
    pub grace_pitch: Option<i32>,
}

/// Lay out one band's mapped points as events, appending to `out`.
///
/// `ornaments` gates grace notes; the pitch-repeat nudge always applies.
/// Repeat tracking is local to the band.
#[allow(clippy::too_many_arguments)]
pub fn lay_out_band(
    mapped: &[MappedPoint],
    band: &Band,
    pattern: DurationPattern,
    bpm: f64,
    groove: &Groove,
    ornaments: bool,
    grace_probability: f64,
    out: &mut Vec<MusicalEvent>,
    rng: &mut impl Rng,
) {
    let durations = pattern.seconds(bpm);
    let mut cursor = 0.0_f64;
    let mut prev_pitch: Option<i32> = None;

    for (i, point) in mapped.iter().enumerate() {
        let duration = durations[i % durations.len()];
        let onset = band.start_seconds + groove.quantize(cursor, rng);

        // Nudge exact repeats a semitone off so runs along a flat edge
        // don't hammer one note.
        let pitch = if prev_pitch == Some(point.pitch) {
            point.pitch + if rng.random_bool(0.5) { 1 } else { -1 }
        } else {
            point.pitch
        };
        prev_pitch = Some(pitch);

        let grace_pitch = if ornaments && i > 0 && rng.random_bool(grace_probability) {
            Some(pitch - 1)
        } else {
            None
        };

        out.push(MusicalEvent {
            pitch,
            onset,
            duration,
            velocity: point.velocity,
            source_x: point.x,
            source_y: point.y,
            grace_pitch,
        });

        cursor += duration;
        if cursor >= band.span_seconds {
            break;
        }
    }
}
