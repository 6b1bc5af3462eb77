use log::debug;

use crate::model::PitchClass;

/// The note playback is frozen on, when wait mode has engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNote {
    /// Timeline index of the missed note.
    pub note_index: usize,
    pub pitch_class: PitchClass,
}

/// Pacing mode that freezes song progress on a miss until the player
/// supplies the missed note's pitch class. At most one note is pending at a
/// time: a further miss while already waiting does not re-trigger.
///
/// The controller only tracks the wait state; the session owns the actual
/// pause/resume of the clock and the suspension of sweep and judgment.
#[derive(Debug, Clone)]
pub struct WaitMode {
    enabled: bool,
    pending: Option<PendingNote>,
}

impl WaitMode {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<PendingNote> {
        self.pending
    }

    /// React to a missed note. Returns true when this miss engaged the wait
    /// (the caller must then pause playback); false when wait mode is off or
    /// a note is already pending.
    pub fn on_miss(&mut self, note_index: usize, pitch_class: PitchClass) -> bool {
        if !self.enabled {
            return false;
        }
        if let Some(pending) = self.pending {
            debug!(
                "already waiting on note {}, ignoring miss of note {}",
                pending.note_index, note_index
            );
            return false;
        }
        self.pending = Some(PendingNote {
            note_index,
            pitch_class,
        });
        true
    }

    /// Whether a press of `pitch_class` resolves the pending note.
    pub fn resolves(&self, pitch_class: PitchClass) -> bool {
        self.pending.is_some_and(|p| p.pitch_class == pitch_class)
    }

    /// Clear the pending note (the caller resumes playback).
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Toggle the mode. Returns true when the caller must force an immediate
    /// resume because the mode was disabled mid-wait.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        if !enabled && self.pending.is_some() {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}
