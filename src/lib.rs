pub mod edge;
pub mod pipeline; // Edge-to-event mapping stages
pub mod playback; // Event scheduling and session lifecycle
pub mod sequencing; // Musical timing and groove
pub mod style;

/// Magnitudes below this are treated as zero when normalizing velocity.
pub(crate) const MIN_MAGNITUDE: f32 = 1e-6;
