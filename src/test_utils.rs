//! Test utilities for building notes and timelines.

#[cfg(test)]
pub mod builders {
    use crate::model::{Note, NoteTimeline};

    /// Builder for assembling a timeline in a fluent manner.
    #[derive(Debug, Clone, Default)]
    pub struct TimelineBuilder {
        notes: Vec<Note>,
    }

    impl TimelineBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a quarter-second note of the given MIDI pitch.
        pub fn note(mut self, midi: u8, start_time: f64) -> Self {
            self.notes.push(Note::new(midi, start_time, 0.25));
            self
        }

        /// Add a note with an explicit duration.
        pub fn held_note(mut self, midi: u8, start_time: f64, duration: f64) -> Self {
            self.notes.push(Note::new(midi, start_time, duration));
            self
        }

        /// Add several notes sounding at the same instant.
        pub fn chord(mut self, midis: &[u8], start_time: f64) -> Self {
            for &midi in midis {
                self.notes.push(Note::new(midi, start_time, 0.25));
            }
            self
        }

        pub fn build(self) -> NoteTimeline {
            NoteTimeline::load(self.notes).expect("builder produced an invalid timeline")
        }

        pub fn into_notes(self) -> Vec<Note> {
            self.notes
        }
    }

    /// One note of the given MIDI pitch per second, starting at 1.0.
    pub fn evenly_spaced(midi: u8, count: usize) -> Vec<Note> {
        (0..count)
            .map(|i| Note::new(midi, 1.0 + i as f64, 0.25))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::builders::*;
    use crate::model::PitchClass;

    #[test]
    fn builder_sorts_and_derives_pitch() {
        let tl = TimelineBuilder::new().note(64, 2.0).note(60, 1.0).build();
        assert_eq!(tl.note(0).unwrap().pitch_class, PitchClass::C);
        assert_eq!(tl.note(1).unwrap().pitch_class, PitchClass::E);
    }

    #[test]
    fn chord_shares_start_time() {
        let tl = TimelineBuilder::new().chord(&[60, 64, 67], 1.0).build();
        assert_eq!(tl.len(), 3);
        assert!(tl.notes().iter().all(|n| n.start_time == 1.0));
    }

    #[test]
    fn evenly_spaced_counts() {
        let notes = evenly_spaced(60, 4);
        assert_eq!(notes.len(), 4);
        assert_eq!(notes[3].start_time, 4.0);
    }
}
