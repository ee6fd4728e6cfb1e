/// Musical note duration represented as a rational fraction of a whole note.
/// Kept rational so patterns cycle without floating point drift; conversion
/// to seconds happens once, at the active tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    /// Numerator: how many parts
    pub numerator: u32,
    /// Denominator: of what size (4 = quarter, 8 = eighth, etc.)
    pub denominator: u32,
}

impl Duration {
    // Note values the pattern pool and groove grid are built from
    pub const QUARTER: Duration = Duration {
        numerator: 1,
        denominator: 4,
    };
    pub const EIGHTH: Duration = Duration {
        numerator: 1,
        denominator: 8,
    };
    pub const SIXTEENTH: Duration = Duration {
        numerator: 1,
        denominator: 16,
    };

    /// Length of this duration in seconds at the given tempo.
    ///
    /// The beat is a quarter note, so a whole note lasts `240 / bpm` seconds.
    pub fn to_seconds(&self, bpm: f64) -> f64 {
        (self.numerator as f64 / self.denominator as f64) * 240.0 / bpm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_durations_at_120_bpm() {
        // At 120 BPM a quarter note is exactly half a second.
        assert_eq!(Duration::QUARTER.to_seconds(120.0), 0.5);
        assert_eq!(Duration::EIGHTH.to_seconds(120.0), 0.25);
        assert_eq!(Duration::SIXTEENTH.to_seconds(120.0), 0.125);
    }

    #[test]
    fn test_tempo_scaling() {
        // 90 BPM: quarter = 60/90 s
        let quarter = Duration::QUARTER.to_seconds(90.0);
        assert!((quarter - 60.0 / 90.0).abs() < 1e-12);

        // Doubling the tempo halves every duration.
        let at_100 = Duration::EIGHTH.to_seconds(100.0);
        let at_200 = Duration::EIGHTH.to_seconds(200.0);
        assert!((at_100 - 2.0 * at_200).abs() < 1e-12);
    }

    #[test]
    fn test_sixteenth_divides_the_eighth() {
        let bpm = 100.0;
        let eighth = Duration::EIGHTH.to_seconds(bpm);
        let sixteenth = Duration::SIXTEENTH.to_seconds(bpm);
        assert!((eighth - 2.0 * sixteenth).abs() < 1e-12);
    }
}
