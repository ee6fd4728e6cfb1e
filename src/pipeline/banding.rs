//! Band segmenter and spatial thinner.
//!
//! The image is read top to bottom as a score: each horizontal slice (band)
//! owns a fixed time slot, and within a band the point density is capped by
//! keeping one representative point per horizontal cell.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edge::EdgePoint;

/// A horizontal slice of the image bound to a fixed slot on the timeline.
///
/// Bands are generated in strictly increasing `start_seconds`; an empty band
/// still occupies its slot, so overall pacing is independent of edge density.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub index: u32,
    /// Inclusive lower y bound.
    pub y_low: u32,
    /// Exclusive upper y bound.
    pub y_high: u32,
    /// Seconds of timeline this band may fill with events.
    pub span_seconds: f64,
    /// Absolute timeline position of the band's first possible onset.
    pub start_seconds: f64,
}

impl Band {
    pub fn contains(&self, point: &EdgePoint) -> bool {
        point.y >= self.y_low && point.y < self.y_high
    }
}

/// Partition the image height into `bands` half-open ranges, the last band
/// absorbing any remainder up to `img_h`. Band height is at least 1 px, so a
/// short image yields bands past its bottom edge; those stay empty and only
/// advance the timeline. A zero band count is treated as one band.
pub fn segment(img_h: u32, bands: u32, span_seconds: f64, gap_seconds: f64) -> Vec<Band> {
    let bands = bands.max(1);
    let band_height = (img_h / bands).max(1);

    (0..bands)
        .map(|index| {
            let y_low = index * band_height;
            let y_high = if index == bands - 1 {
                img_h.max(y_low + band_height)
            } else {
                y_low + band_height
            };

            Band {
                index,
                y_low,
                y_high,
                span_seconds,
                start_seconds: index as f64 * (span_seconds + gap_seconds),
            }
        })
        .collect()
}

/// Collect the subset of points falling inside a band, in input order.
pub fn points_in_band<'a>(points: &'a [EdgePoint], band: &Band) -> Vec<&'a EdgePoint> {
    points.iter().filter(|p| band.contains(p)).collect()
}

/// Keep exactly one (first-seen) point per occupied horizontal cell of
/// `cell_x` pixels. Bounds the rhythm assigner's input at one point per cell
/// regardless of how busy the edge image is.
pub fn thin<'a>(points: &[&'a EdgePoint], cell_x: u32) -> Vec<&'a EdgePoint> {
    let cell_x = cell_x.max(1);
    let mut taken: HashSet<u32> = HashSet::new();

    points
        .iter()
        .filter(|p| taken.insert(p.x / cell_x))
        .copied()
        .collect()
}
