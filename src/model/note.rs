use super::pitch::PitchClass;

/// Per-session judgment state of a note. Transitions Unjudged -> terminal
/// exactly once and never reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgmentStatus {
    Unjudged,
    Perfect,
    Good,
    Miss,
}

impl JudgmentStatus {
    pub fn is_unjudged(self) -> bool {
        matches!(self, Self::Unjudged)
    }

    /// Whether the note was hit (perfect or good).
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Perfect | Self::Good)
    }
}

/// A single note in the loaded song. Immutable for the whole session; only
/// its judgment status (stored alongside in the timeline) ever changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub pitch_class: PitchClass,
    /// MIDI note number (0-127).
    pub midi: u8,
    /// Scheduled time in seconds from song start.
    pub start_time: f64,
    /// Sounding duration in seconds.
    pub duration: f64,
}

impl Note {
    /// Create a note from a MIDI number, deriving its pitch class.
    pub fn new(midi: u8, start_time: f64, duration: f64) -> Self {
        Self {
            pitch_class: PitchClass::from_midi(midi),
            midi,
            start_time,
            duration,
        }
    }

    /// End of the sounding interval.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// A note is well-formed when its times are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.start_time.is_finite()
            && self.duration.is_finite()
            && self.start_time >= 0.0
            && self.duration >= 0.0
    }
}
