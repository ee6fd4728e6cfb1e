//! Groove quantizer: sixteenth-note grid snap, swing, and humanization.

use rand::Rng;

use super::duration::Duration;

/// Snaps raw onsets to a tempo-derived grid, then loosens the result with
/// swing and random micro-timing.
///
/// Swing shifts every odd eighth-note slot late by `(swing - 0.5)` of an
/// eighth; 0.5 is straight time, the 0.58 default a light shuffle.
/// Humanization adds independent uniform jitter of up to `humanize` seconds
/// in either direction.
#[derive(Debug, Clone, Copy)]
pub struct Groove {
    swing: f64,
    humanize: f64,
    /// Seconds per sixteenth note at the active tempo.
    sixteenth: f64,
    /// Seconds per eighth note at the active tempo.
    eighth: f64,
}

impl Groove {
    pub fn new(bpm: f64, swing: f64, humanize: f64) -> Self {
        Self {
            swing,
            humanize,
            sixteenth: Duration::SIXTEENTH.to_seconds(bpm),
            eighth: Duration::EIGHTH.to_seconds(bpm),
        }
    }

    /// Quantize an onset (seconds from band start). Never returns a negative
    /// time, even when jitter pulls a grid-zero onset backwards.
    pub fn quantize(&self, t: f64, rng: &mut impl Rng) -> f64 {
        let mut qt = (t / self.sixteenth).round() * self.sixteenth;

        let eighth_index = (qt / self.eighth).round() as i64;
        if eighth_index % 2 != 0 {
            qt += (self.swing - 0.5) * self.eighth;
        }

        if self.humanize > 0.0 {
            qt += rng.random_range(-self.humanize..=self.humanize);
        }

        qt.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rigid(bpm: f64) -> Groove {
        // No swing offset, no jitter: quantization reduces to grid snapping.
        Groove::new(bpm, 0.5, 0.0)
    }

    #[test]
    fn snaps_to_sixteenth_grid() {
        let groove = rigid(120.0); // sixteenth = 0.125 s
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(groove.quantize(0.0, &mut rng), 0.0);
        assert_eq!(groove.quantize(0.11, &mut rng), 0.125);
        assert_eq!(groove.quantize(0.19, &mut rng), 0.25);
        assert_eq!(groove.quantize(0.5, &mut rng), 0.5);
    }

    #[test]
    fn swing_delays_odd_eighths_only() {
        let groove = Groove::new(120.0, 0.58, 0.0); // eighth = 0.25 s
        let mut rng = StdRng::seed_from_u64(1);

        // Even eighth slot: unchanged.
        assert_eq!(groove.quantize(0.5, &mut rng), 0.5);
        // Odd eighth slot: pushed late by (0.58 - 0.5) * 0.25.
        let swung = groove.quantize(0.25, &mut rng);
        assert!((swung - (0.25 + 0.08 * 0.25)).abs() < 1e-12);
    }

    #[test]
    fn never_negative_for_any_input() {
        let groove = Groove::new(100.0, 0.58, 0.020);
        let mut rng = StdRng::seed_from_u64(7);

        for &t in &[-10.0, -0.3, -0.001, 0.0, 0.004, 3.7] {
            for _ in 0..200 {
                assert!(groove.quantize(t, &mut rng) >= 0.0);
            }
        }
    }

    #[test]
    fn jitter_stays_within_humanize_bound() {
        let groove = Groove::new(120.0, 0.5, 0.020);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let qt = groove.quantize(0.5, &mut rng);
            assert!((qt - 0.5).abs() <= 0.020 + 1e-12);
        }
    }
}
