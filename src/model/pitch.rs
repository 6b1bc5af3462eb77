/// Number of chromatic pitch classes.
pub const PITCH_CLASS_COUNT: usize = 12;

/// One of the 12 chromatic pitch classes, independent of octave.
/// Sharps are the canonical spelling; flat names normalize to their
/// enharmonic sharp equivalent on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    /// Returns all pitch classes in chromatic order.
    pub fn all() -> &'static [PitchClass] {
        &[
            PitchClass::C,
            PitchClass::Cs,
            PitchClass::D,
            PitchClass::Ds,
            PitchClass::E,
            PitchClass::F,
            PitchClass::Fs,
            PitchClass::G,
            PitchClass::Gs,
            PitchClass::A,
            PitchClass::As,
            PitchClass::B,
        ]
    }

    /// Returns the chromatic index (0 = C .. 11 = B).
    pub fn index(self) -> usize {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }

    /// Create a pitch class from a 0-based chromatic index.
    pub fn from_index(index: usize) -> Option<PitchClass> {
        PitchClass::all().get(index).copied()
    }

    /// Derive the pitch class from a MIDI note number.
    pub fn from_midi(midi: u8) -> PitchClass {
        // midi % 12 is always in 0..12, so the lookup cannot fail
        PitchClass::all()[(midi % 12) as usize]
    }

    /// Canonical (sharp) display name.
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// Parse a note name into a pitch class.
    ///
    /// Enharmonic normalization is a fixed lookup: flat spellings ("Db",
    /// "Eb", ...) map to their sharp equivalents, and the irregular
    /// spellings ("Cb", "B#", "E#", "Fb") wrap to the natural they sound
    /// as. An optional trailing octave digit is ignored ("C4" parses as C).
    pub fn from_name(name: &str) -> Option<PitchClass> {
        let trimmed = name.trim();
        let spelled: String = trimmed
            .chars()
            .take_while(|c| !c.is_ascii_digit())
            .collect();

        match spelled.as_str() {
            "C" => Some(PitchClass::C),
            "C#" | "Db" => Some(PitchClass::Cs),
            "D" => Some(PitchClass::D),
            "D#" | "Eb" => Some(PitchClass::Ds),
            "E" | "Fb" => Some(PitchClass::E),
            "F" | "E#" => Some(PitchClass::F),
            "F#" | "Gb" => Some(PitchClass::Fs),
            "G" => Some(PitchClass::G),
            "G#" | "Ab" => Some(PitchClass::Gs),
            "A" => Some(PitchClass::A),
            "A#" | "Bb" => Some(PitchClass::As),
            "B" | "Cb" => Some(PitchClass::B),
            "B#" => Some(PitchClass::C),
            _ => None,
        }
    }
}
