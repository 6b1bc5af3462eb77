use log::trace;

use crate::model::{JudgmentStatus, NoteTimeline, PitchClass};

/// Outcome of judging a single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeOutcome {
    Perfect,
    Good,
    Miss,
}

impl JudgeOutcome {
    pub fn breaks_combo(self) -> bool {
        matches!(self, Self::Miss)
    }

    pub fn status(self) -> JudgmentStatus {
        match self {
            Self::Perfect => JudgmentStatus::Perfect,
            Self::Good => JudgmentStatus::Good,
            Self::Miss => JudgmentStatus::Miss,
        }
    }
}

/// Half-windows around a note's scheduled time, in seconds. A press within
/// `perfect` of the note is perfect, within `good` is good, outside has no
/// effect. Invariant: perfect <= good.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgeWindows {
    pub perfect: f64,
    pub good: f64,
}

impl JudgeWindows {
    pub fn new(perfect: f64, good: f64) -> Self {
        Self {
            perfect: perfect.min(good),
            good,
        }
    }

    /// Derive both windows from the configured good window in milliseconds.
    /// The perfect window is half the good window.
    pub fn from_good_ms(good_ms: f64) -> Self {
        let good = good_ms / 1000.0;
        Self::new(good / 2.0, good)
    }
}

impl Default for JudgeWindows {
    fn default() -> Self {
        Self::from_good_ms(crate::config::GameOptions::default().hit_window_good_ms)
    }
}

/// A successfully judged key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Judgment {
    /// Index of the judged note in the timeline.
    pub note_index: usize,
    pub outcome: JudgeOutcome,
    /// press time - note start time (positive = late press).
    pub time_diff: f64,
}

/// Cumulative early/late statistics over judged non-perfect hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingStats {
    pub early_count: u32,
    pub late_count: u32,
}

impl TimingStats {
    fn record(&mut self, judgment: &Judgment) {
        // Perfect hits are close enough that the direction is noise.
        if judgment.outcome != JudgeOutcome::Good {
            return;
        }
        if judgment.time_diff < 0.0 {
            self.early_count += 1;
        } else {
            self.late_count += 1;
        }
    }
}

/// Maps key-press events to note judgments against a timeline.
#[derive(Debug)]
pub struct JudgeEngine {
    windows: JudgeWindows,
    stats: TimingStats,
}

impl JudgeEngine {
    pub fn new(windows: JudgeWindows) -> Self {
        Self {
            windows,
            stats: TimingStats::default(),
        }
    }

    pub fn windows(&self) -> JudgeWindows {
        self.windows
    }

    pub fn stats(&self) -> TimingStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = TimingStats::default();
    }

    /// Judge one key press of `pitch_class` at song time `now`.
    ///
    /// Scans unjudged notes of the same pitch class inside the good window
    /// and judges the one closest in time; exact ties go to the earlier
    /// timeline entry (stable, because the scan runs in ascending start
    /// order and only a strictly closer note replaces the candidate). Each
    /// chord note is judged independently, so one press consumes at most one
    /// note. A press with no eligible note returns None and has no effect.
    pub fn judge(
        &mut self,
        timeline: &mut NoteTimeline,
        pitch_class: PitchClass,
        now: f64,
    ) -> Option<Judgment> {
        let mut best: Option<(usize, f64)> = None;

        for (i, note) in timeline.notes().iter().enumerate() {
            if note.start_time > now + self.windows.good {
                // Sorted ascending; everything later is out of reach.
                break;
            }
            if note.pitch_class != pitch_class {
                continue;
            }
            if !timeline.status(i).is_some_and(JudgmentStatus::is_unjudged) {
                continue;
            }
            let diff = now - note.start_time;
            if diff.abs() > self.windows.good {
                continue;
            }
            let closer = match best {
                None => true,
                Some((_, best_diff)) => diff.abs() < best_diff.abs(),
            };
            if closer {
                best = Some((i, diff));
            }
        }

        let (note_index, time_diff) = best?;
        let outcome = if time_diff.abs() <= self.windows.perfect {
            JudgeOutcome::Perfect
        } else {
            JudgeOutcome::Good
        };

        // The eligibility filter above only admits unjudged notes, so this
        // write cannot clash with the miss sweep or an earlier press.
        timeline.set_status(note_index, outcome.status());

        let judgment = Judgment {
            note_index,
            outcome,
            time_diff,
        };
        self.stats.record(&judgment);
        trace!(
            "judged note {} as {:?} ({:+.1} ms)",
            note_index,
            outcome,
            time_diff * 1000.0
        );
        Some(judgment)
    }
}
