//! Pitch/velocity mapper: vertical position to scale-quantized pitch,
//! gradient magnitude to normalized velocity.
//!
//! The image height is divided into `lanes` discrete zones. A point's lane is
//! biased through `lane01 ^ pitch_curve` (curve > 1 favors lower pitches),
//! then walked across the scale with `octave_shift` transposition. Velocity
//! normalizes the point's magnitude against the loudest point of the same
//! thinned set, so every band uses its full dynamic range.

use crate::edge::EdgePoint;
use crate::style::Scale;
use crate::MIN_MAGNITUDE;

use super::ComposeConfig;

/// A thinned point after pitch/velocity mapping. `x` is kept only as the
/// within-band ordering key and visual-sync coordinate; it does not place an
/// absolute onset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPoint {
    pub pitch: i32,
    /// Normalized velocity in `[vel_min, vel_max]`.
    pub velocity: f64,
    pub x: u32,
    pub y: u32,
}

/// Maps a band's thinned points into pitches and velocities.
#[derive(Debug, Clone, Copy)]
pub struct PitchMapper {
    scale: Scale,
    lanes: u32,
    lane_height: u32,
    pitch_curve: f64,
    octave_shift: i32,
    y_up_is_higher: bool,
    vel_min: f64,
    vel_max: f64,
}

impl PitchMapper {
    pub fn new(img_h: u32, scale: Scale, config: &ComposeConfig) -> Self {
        Self {
            scale,
            lanes: config.lanes.max(1),
            lane_height: (img_h / config.lanes.max(1)).max(1),
            pitch_curve: config.pitch_curve,
            octave_shift: config.octave_shift,
            y_up_is_higher: config.y_up_is_higher,
            vel_min: config.vel_min,
            vel_max: config.vel_max,
        }
    }

    /// Lane index after inversion and curve bias, in `0..lanes`.
    pub fn curved_index(&self, y: u32) -> u32 {
        let mut lane = (y / self.lane_height).min(self.lanes - 1);
        if self.y_up_is_higher {
            lane = self.lanes - 1 - lane;
        }

        let lane01 = if self.lanes > 1 {
            lane as f64 / (self.lanes - 1) as f64
        } else {
            0.0
        };
        let biased = lane01.powf(self.pitch_curve);

        (biased * (self.lanes - 1) as f64).round() as u32
    }

    /// Walk the scale: curved index selects degree and octave, then the
    /// global octave shift transposes the result.
    pub fn pitch_for(&self, y: u32) -> i32 {
        let curved = self.curved_index(y) as usize;
        let degree = curved % self.scale.len();
        let octave = (curved / self.scale.len()) as i32 + self.octave_shift;
        self.scale.pitch_at(degree, octave)
    }

    /// Map a band's thinned points, sorted by ascending `x`.
    pub fn map_band(&self, thinned: &[&EdgePoint]) -> Vec<MappedPoint> {
        let max_mag = thinned
            .iter()
            .map(|p| p.mag)
            .fold(MIN_MAGNITUDE, f32::max) as f64;

        let mut mapped: Vec<MappedPoint> = thinned
            .iter()
            .map(|p| {
                let velocity = self.vel_min
                    + (self.vel_max - self.vel_min) * (p.mag as f64 / max_mag);

                MappedPoint {
                    pitch: self.pitch_for(p.y),
                    velocity: velocity.clamp(self.vel_min, self.vel_max),
                    x: p.x,
                    y: p.y,
                }
            })
            .collect();

        mapped.sort_by_key(|p| p.x);
        mapped
    }
}
