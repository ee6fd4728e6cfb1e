//! Style profiles: the scale, tempo, and instrument bound to each style label.
//!
//! The classifier collaborator only produces a probability pair; everything
//! musical about a style lives here as constant data, dispatched by matching
//! on the [`Style`] variant rather than branching on strings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A musical scale: a root pitch and an ordered set of semitone offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    /// Root pitch as a MIDI note number.
    pub root: i32,
    /// Semitone offsets from the root, ascending, non-empty.
    pub intervals: &'static [i32],
}

impl Scale {
    /// Major pentatonic on A3. The five-tone set keeps any pair of mapped
    /// pitches consonant, which suits dense edge images.
    pub const PENTATONIC: Scale = Scale {
        root: 57,
        intervals: &[0, 2, 5, 7, 9],
    };

    /// Major (diatonic) scale on middle C.
    pub const DIATONIC: Scale = Scale {
        root: 60,
        intervals: &[0, 2, 4, 5, 7, 9, 11],
    };

    /// Number of degrees in one octave of this scale.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Pitch of `degree` (0-based, within one octave) transposed by `octave`.
    pub fn pitch_at(&self, degree: usize, octave: i32) -> i32 {
        self.root + self.intervals[degree % self.intervals.len()] + 12 * octave
    }
}

/// Which kind of voice the audio engine should build for a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    /// Sample-backed plucked string. Loading may fail; playback falls back
    /// to [`InstrumentKind::Poly`].
    Pluck,
    /// Polyphonic synthesizer, always available.
    Poly,
}

/// One of the two supported style labels.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Pentatonic scale, 100 BPM, ornamented, plucked-string voice.
    Pentatonic,
    /// Diatonic scale, 90 BPM, plain, polyphonic synth voice.
    Diatonic,
}

/// Constant configuration bound to a style.
#[derive(Debug, Clone, Copy)]
pub struct StyleProfile {
    pub scale: Scale,
    /// Tempo in beats per minute.
    pub bpm: f64,
    /// Whether ornamentation (grace notes) is applied.
    pub ornaments: bool,
    pub instrument: InstrumentKind,
}

impl Style {
    /// The scale/tempo/instrument profile for this style.
    pub fn profile(&self) -> StyleProfile {
        match self {
            Style::Pentatonic => StyleProfile {
                scale: Scale::PENTATONIC,
                bpm: 100.0,
                ornaments: true,
                instrument: InstrumentKind::Pluck,
            },
            Style::Diatonic => StyleProfile {
                scale: Scale::DIATONIC,
                bpm: 90.0,
                ornaments: false,
                instrument: InstrumentKind::Poly,
            },
        }
    }

    /// Select a style from the classifier's probability pair, ordered
    /// `[diatonic, pentatonic]`. The maximum wins; a tie resolves to the
    /// second label.
    pub fn from_probabilities(probs: [f32; 2]) -> Style {
        if probs[0] > probs[1] {
            Style::Diatonic
        } else {
            Style::Pentatonic
        }
    }
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Render a MIDI note number as a name with octave (C4 = 60).
pub fn note_name(pitch: i32) -> String {
    let semitone = pitch.rem_euclid(12) as usize;
    let octave = pitch.div_euclid(12) - 1;
    format!("{}{}", NOTE_NAMES[semitone], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_walk_spans_octaves() {
        let scale = Scale::DIATONIC;
        assert_eq!(scale.pitch_at(0, 0), 60);
        assert_eq!(scale.pitch_at(2, 0), 64); // E4
        assert_eq!(scale.pitch_at(0, 1), 72); // next octave
        assert_eq!(scale.pitch_at(7, 0), 60); // degree wraps within octave
        assert_eq!(scale.pitch_at(1, -1), 50); // D3
    }

    #[test]
    fn profiles_bind_expected_scales() {
        let p = Style::Pentatonic.profile();
        assert_eq!(p.scale.root, 57);
        assert_eq!(p.scale.len(), 5);
        assert!(p.ornaments);

        let d = Style::Diatonic.profile();
        assert_eq!(d.scale.root, 60);
        assert_eq!(d.scale.len(), 7);
        assert!(!d.ornaments);
        assert_eq!(d.bpm, 90.0);
    }

    #[test]
    fn classifier_selection_takes_maximum() {
        assert_eq!(Style::from_probabilities([0.9, 0.1]), Style::Diatonic);
        assert_eq!(Style::from_probabilities([0.2, 0.8]), Style::Pentatonic);
        // Ties resolve to the second label.
        assert_eq!(Style::from_probabilities([0.5, 0.5]), Style::Pentatonic);
    }

    #[test]
    fn note_names_round_common_pitches() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(69), "A4");
        assert_eq!(note_name(57), "A3");
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(48), "C3");
    }
}
