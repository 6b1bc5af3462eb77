use log::debug;

use super::note::{JudgmentStatus, Note};
use crate::util::EngineError;

/// The ordered note collection for one session, with one mutable judgment
/// status per note. The timeline exclusively owns both; statuses are only
/// written through `set_status` and `mark_missed`, each of which checks the
/// current status first so a note can never be judged twice.
#[derive(Debug, Clone)]
pub struct NoteTimeline {
    /// Notes sorted ascending by start time (stable, input order on ties).
    notes: Vec<Note>,
    /// Judgment status per note, parallel to `notes`.
    statuses: Vec<JudgmentStatus>,
}

impl NoteTimeline {
    /// Build a timeline from parsed note data. Rejects empty or malformed
    /// input without constructing anything.
    pub fn load(mut notes: Vec<Note>) -> Result<Self, EngineError> {
        if notes.is_empty() {
            return Err(EngineError::InvalidTimeline("empty note list".into()));
        }
        if let Some(bad) = notes.iter().position(|n| !n.is_valid()) {
            return Err(EngineError::InvalidTimeline(format!(
                "note {} has a negative or non-finite time",
                bad
            )));
        }

        // Stable sort keeps input order for simultaneous notes, which makes
        // the judge's tie-break deterministic.
        notes.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        let statuses = vec![JudgmentStatus::Unjudged; notes.len()];
        Ok(Self { notes, statuses })
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn statuses(&self) -> &[JudgmentStatus] {
        &self.statuses
    }

    pub fn note(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn status(&self, index: usize) -> Option<JudgmentStatus> {
        self.statuses.get(index).copied()
    }

    /// Record a terminal judgment for a note. Returns false (and changes
    /// nothing) if the note is out of range or already judged.
    pub(crate) fn set_status(&mut self, index: usize, status: JudgmentStatus) -> bool {
        match self.statuses.get_mut(index) {
            Some(slot) if slot.is_unjudged() && !status.is_unjudged() => {
                *slot = status;
                true
            }
            _ => false,
        }
    }

    /// Age out notes whose hit window has fully passed: every unjudged note
    /// with start time earlier than `now - window` becomes a miss. Returns
    /// the indices of the newly missed notes, in timeline order.
    ///
    /// This sweep is the sole producer of misses; a press that finds no
    /// eligible note is not one. The caller runs it once per tick.
    pub fn mark_missed(&mut self, now: f64, window: f64) -> Vec<usize> {
        let cutoff = now - window;
        let mut missed = Vec::new();
        for (i, note) in self.notes.iter().enumerate() {
            if note.start_time >= cutoff {
                // Sorted ascending, nothing later can be overdue.
                break;
            }
            if self.statuses[i].is_unjudged() {
                self.statuses[i] = JudgmentStatus::Miss;
                missed.push(i);
            }
        }
        if !missed.is_empty() {
            debug!("miss sweep at {:.3}s aged out {} note(s)", now, missed.len());
        }
        missed
    }

    /// Reset every status to unjudged (restart path). The notes themselves
    /// never change.
    pub fn reset(&mut self) {
        for status in &mut self.statuses {
            *status = JudgmentStatus::Unjudged;
        }
    }

    pub fn all_judged(&self) -> bool {
        self.statuses.iter().all(|s| !s.is_unjudged())
    }

    pub fn unjudged_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_unjudged()).count()
    }

    /// End of the last sounding note, used for natural-end detection.
    pub fn last_note_end(&self) -> f64 {
        self.notes.iter().map(Note::end_time).fold(0.0, f64::max)
    }
}
