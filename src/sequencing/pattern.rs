//! Duration-pattern templates.
//!
//! A band's rhythm comes from one small repeating template of note values
//! rather than free placement; cycling a fixed template keeps the feel
//! predictable while the edge content varies. One template is drawn per band.

use rand::Rng;

use super::duration::Duration;

/// The fixed pool of templates a band's rhythm is drawn from.
const TEMPLATES: [&[Duration]; 4] = [
    &[
        Duration::EIGHTH,
        Duration::EIGHTH,
        Duration::EIGHTH,
        Duration::EIGHTH,
    ],
    &[
        Duration::EIGHTH,
        Duration::SIXTEENTH,
        Duration::SIXTEENTH,
        Duration::EIGHTH,
    ],
    &[
        Duration::QUARTER,
        Duration::EIGHTH,
        Duration::EIGHTH,
        Duration::QUARTER,
    ],
    &[Duration::QUARTER, Duration::EIGHTH, Duration::QUARTER],
];

/// A repeating sequence of note values assigned to a band's events in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPattern(&'static [Duration]);

impl DurationPattern {
    /// Draw one template uniformly at random from the pool.
    pub fn choose(rng: &mut impl Rng) -> Self {
        DurationPattern(TEMPLATES[rng.random_range(0..TEMPLATES.len())])
    }

    /// Entry for the `index`-th event, cycling past the template's end.
    pub fn duration_at(&self, index: usize) -> Duration {
        self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The template's entries converted to seconds at the given tempo.
    pub fn seconds(&self, bpm: f64) -> Vec<f64> {
        self.0.iter().map(|d| d.to_seconds(bpm)).collect()
    }

    /// Longest single entry in seconds: the most one emitted event can
    /// overshoot a band's span before the cutoff stops the walk.
    pub fn max_unit_seconds(&self, bpm: f64) -> f64 {
        self.0
            .iter()
            .map(|d| d.to_seconds(bpm))
            .fold(0.0, f64::max)
    }
}
