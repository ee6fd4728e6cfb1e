//! Edge input types and the collaborator seams that produce them.
//!
//! Edge detection and style classification run outside this crate. The
//! pipeline only consumes their results: a set of weighted edge points and a
//! probability pair over the two style labels.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single detected edge pixel with gradient magnitude and orientation.
///
/// Produced externally by the vision collaborator; never mutated here.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePoint {
    /// Horizontal pixel position (0 = left edge).
    pub x: u32,
    /// Vertical pixel position (0 = top edge).
    pub y: u32,
    /// Gradient magnitude at this pixel (>= 0).
    pub mag: f32,
    /// Gradient orientation in radians.
    pub theta: f32,
}

impl EdgePoint {
    pub fn new(x: u32, y: u32, mag: f32, theta: f32) -> Self {
        Self { x, y, mag, theta }
    }
}

/// Vision collaborator: runs edge detection over its current frame and
/// returns the detected points in no particular order.
pub trait EdgeSource {
    fn edge_points(&mut self) -> Vec<EdgePoint>;
}

/// Classification collaborator: returns a probability pair over the two
/// style labels, ordered `[diatonic, pentatonic]`.
///
/// Callers select the style with [`crate::style::Style::from_probabilities`].
pub trait StyleClassifier {
    fn probabilities(&mut self) -> [f32; 2];
}
