use log::{error, warn};
use serde::Serialize;

use crate::config::GameOptions;
use crate::model::{JudgmentStatus, Note, NoteTimeline, PitchClass};
use crate::traits::time::TimeProvider;
use crate::util::EngineError;

use super::clock::PlaybackClock;
use super::judge::{JudgeEngine, JudgeOutcome, Judgment, TimingStats};
use super::result::PlayResult;
use super::score::{ScoreEffects, ScoreKeeper, ScoreSnapshot};
use super::wait::{PendingNote, WaitMode};

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// No timeline loaded yet.
    Idle,
    /// Timeline loaded, clock at zero, ready to start.
    Initialized,
    Running,
    /// Explicitly paused by the player.
    Paused,
    /// Frozen by wait mode on a missed note.
    Waiting,
    /// Terminal until restart.
    Over,
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    SongFinished,
    GameOver,
}

/// Everything one update tick produced, for the caller to render.
#[derive(Debug, Clone, Default)]
pub struct TickEffects {
    /// Song time the tick ran at.
    pub now: f64,
    /// Indices of notes the sweep aged out this tick.
    pub missed: Vec<usize>,
    /// Score snapshot after the misses were applied, if any were.
    pub score: Option<ScoreSnapshot>,
    /// Wait mode engaged on this note during the tick.
    pub wait_engaged: Option<PendingNote>,
    pub game_over: bool,
    pub song_finished: bool,
}

/// Everything one key press produced.
#[derive(Debug, Clone, Copy)]
pub struct KeyEffects {
    pub judgment: Option<Judgment>,
    pub score: Option<ScoreEffects>,
    /// True when the press released a wait-mode freeze.
    pub resumed: bool,
}

/// HUD-facing snapshot, queried on demand. The engine never pushes frames.
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub time: f64,
    pub phase: SessionPhase,
    pub score: ScoreSnapshot,
    pub accuracy: f64,
    /// Pitch class name the session is frozen on, in wait mode.
    pub waiting_on: Option<&'static str>,
}

/// Ties clock, timeline, judgment, scoring, and wait mode into one session
/// lifecycle. The session is the single mutation authority: collaborators
/// are only reached through its methods, and every call returns its effects
/// instead of invoking callbacks.
///
/// Single-threaded and cooperative: the host calls `tick` once per frame
/// and `key_pressed` synchronously from its input handler, so judgment sees
/// the exact press time rather than the last tick's sample.
pub struct GameSession<T: TimeProvider> {
    options: GameOptions,
    clock: PlaybackClock<T>,
    judge: JudgeEngine,
    score: ScoreKeeper,
    wait: WaitMode,
    timeline: Option<NoteTimeline>,
    phase: SessionPhase,
    end_reason: Option<EndReason>,
}

impl<T: TimeProvider> GameSession<T> {
    pub fn new(options: GameOptions, time: T) -> Self {
        let judge = JudgeEngine::new(options.windows());
        let score = ScoreKeeper::new(options.score_policy, options.no_death_mode);
        let wait = WaitMode::new(options.wait_mode);
        Self {
            options,
            clock: PlaybackClock::new(time),
            judge,
            score,
            wait,
            timeline: None,
            phase: SessionPhase::Idle,
            end_reason: None,
        }
    }

    /// Load a parsed note list and move to Initialized. On failure the
    /// previous session state is left untouched.
    pub fn load(&mut self, notes: Vec<Note>) -> Result<(), EngineError> {
        let timeline = NoteTimeline::load(notes)?;
        self.timeline = Some(timeline);
        self.clock.stop();
        self.score.reset();
        self.wait.reset();
        self.judge.reset_stats();
        self.end_reason = None;
        self.phase = SessionPhase::Initialized;
        Ok(())
    }

    /// Start or resume playback. A fresh start (from Initialized) applies
    /// the configured pre-delay; resuming from Paused does not. Redundant
    /// calls are logged no-ops; on a clock failure the phase is unchanged.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.phase {
            SessionPhase::Initialized => {
                self.clock.start(0.0, self.options.pre_delay_seconds)?;
                self.phase = SessionPhase::Running;
                Ok(())
            }
            SessionPhase::Paused => {
                self.resume_playback()?;
                self.phase = SessionPhase::Running;
                Ok(())
            }
            SessionPhase::Idle => Err(EngineError::InvalidTimeline(
                "no timeline loaded".into(),
            )),
            SessionPhase::Running | SessionPhase::Waiting | SessionPhase::Over => {
                warn!("start ignored in phase {:?}", self.phase);
                Ok(())
            }
        }
    }

    /// Explicit player pause. No scoring effect.
    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.clock.pause();
            self.phase = SessionPhase::Paused;
        } else {
            warn!("pause ignored in phase {:?}", self.phase);
        }
    }

    /// Full reset back to Initialized: statuses, score, clock, wait state.
    pub fn restart(&mut self) {
        let Some(timeline) = self.timeline.as_mut() else {
            warn!("restart ignored: no timeline loaded");
            return;
        };
        timeline.reset();
        self.clock.stop();
        self.score.reset();
        self.wait.reset();
        self.judge.reset_stats();
        self.end_reason = None;
        self.phase = SessionPhase::Initialized;
    }

    /// One cooperative update tick: sample the clock, age out overdue notes,
    /// propagate the misses, and detect the end of the session. While
    /// waiting or paused the sweep is suspended and the tick only reports
    /// the frozen time.
    pub fn tick(&mut self) -> TickEffects {
        let now = self.clock.current_time();
        let mut fx = TickEffects {
            now,
            ..TickEffects::default()
        };

        if self.phase != SessionPhase::Running {
            return fx;
        }
        let Some(timeline) = self.timeline.as_mut() else {
            return fx;
        };

        let missed = timeline.mark_missed(now, self.judge.windows().good);
        for &idx in &missed {
            let effects = self.score.apply(JudgeOutcome::Miss);
            fx.score = Some(effects.snapshot);
            if effects.game_over_signal {
                fx.game_over = true;
            }
            if !self.score.is_game_over() {
                let pitch = timeline.notes()[idx].pitch_class;
                if self.wait.on_miss(idx, pitch) {
                    fx.wait_engaged = self.wait.pending();
                }
            }
        }
        fx.missed = missed;

        if fx.game_over {
            self.clock.pause();
            self.wait.clear();
            self.phase = SessionPhase::Over;
            self.end_reason = Some(EndReason::GameOver);
            return fx;
        }

        if fx.wait_engaged.is_some() {
            self.clock.pause();
            self.phase = SessionPhase::Waiting;
            return fx;
        }

        if timeline.all_judged() && now >= timeline.last_note_end() {
            self.clock.pause();
            self.phase = SessionPhase::Over;
            self.end_reason = Some(EndReason::SongFinished);
            fx.song_finished = true;
        }

        fx
    }

    /// Judge one key press at the exact current song time. Returns None
    /// when the press had no effect (no eligible note, or the session is
    /// not accepting input).
    ///
    /// While waiting, dispatch is suspended for every pitch class except
    /// the pending note's; a press of that pitch class releases the freeze
    /// (and may additionally judge a still-open note of the same class at
    /// the frozen time).
    pub fn key_pressed(&mut self, pitch_class: PitchClass) -> Option<KeyEffects> {
        match self.phase {
            SessionPhase::Running => {
                let now = self.clock.current_time();
                let timeline = self.timeline.as_mut()?;
                let judgment = self.judge.judge(timeline, pitch_class, now)?;
                let effects = self.score.apply(judgment.outcome);
                Some(KeyEffects {
                    judgment: Some(judgment),
                    score: Some(effects),
                    resumed: false,
                })
            }
            SessionPhase::Waiting => {
                if !self.wait.resolves(pitch_class) {
                    return None;
                }
                let now = self.clock.current_time();
                let judgment = self
                    .timeline
                    .as_mut()
                    .and_then(|tl| self.judge.judge(tl, pitch_class, now));
                let score = judgment.map(|j| self.score.apply(j.outcome));

                if let Err(err) = self.resume_playback() {
                    // Stay frozen rather than corrupt the clock state.
                    error!("resume after wait failed: {err}");
                    return None;
                }
                self.wait.clear();
                self.phase = SessionPhase::Running;
                Some(KeyEffects {
                    judgment,
                    score,
                    resumed: true,
                })
            }
            _ => None,
        }
    }

    /// Forward an end-of-media notification from the host clock. Returns
    /// true when it was accepted as the natural end of the song; a callback
    /// racing an explicit stop or pause is ignored.
    pub fn handle_media_end(&mut self) -> bool {
        let Some(timeline) = self.timeline.as_ref() else {
            return false;
        };
        if self.phase == SessionPhase::Running
            && self.clock.is_natural_end(timeline.last_note_end())
        {
            self.clock.pause();
            self.phase = SessionPhase::Over;
            self.end_reason = Some(EndReason::SongFinished);
            true
        } else {
            warn!("ignoring end-of-media in phase {:?}", self.phase);
            false
        }
    }

    /// Toggle wait mode at runtime. Disabling it mid-wait forces an
    /// immediate resume so playback can never be left stuck.
    pub fn set_wait_mode(&mut self, enabled: bool) {
        self.options.wait_mode = enabled;
        let force_resume = self.wait.set_enabled(enabled);
        if force_resume && self.phase == SessionPhase::Waiting {
            match self.resume_playback() {
                Ok(()) => self.phase = SessionPhase::Running,
                Err(err) => error!("forced resume failed: {err}"),
            }
        }
    }

    /// Toggle no-death mode at runtime.
    pub fn set_no_death(&mut self, enabled: bool) {
        self.options.no_death_mode = enabled;
        self.score.set_no_death(enabled);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn timing_stats(&self) -> TimingStats {
        self.judge.stats()
    }

    /// Notes for the renderer, in timeline order.
    pub fn notes(&self) -> &[Note] {
        self.timeline.as_ref().map(NoteTimeline::notes).unwrap_or(&[])
    }

    /// Judgment statuses parallel to `notes`.
    pub fn statuses(&self) -> &[JudgmentStatus] {
        self.timeline
            .as_ref()
            .map(NoteTimeline::statuses)
            .unwrap_or(&[])
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            time: self.clock.current_time(),
            phase: self.phase,
            score: self.score.snapshot(),
            accuracy: self.score.accuracy(),
            waiting_on: self.wait.pending().map(|p| p.pitch_class.name()),
        }
    }

    /// Final statistics, available once the session is over.
    pub fn result(&self) -> Option<PlayResult> {
        if self.phase != SessionPhase::Over {
            return None;
        }
        let snapshot = self.score.snapshot();
        let stats = self.judge.stats();
        Some(PlayResult {
            total_notes: self.timeline.as_ref().map(|t| t.len() as u32).unwrap_or(0),
            perfect_count: snapshot.perfect_count,
            good_count: snapshot.good_count,
            miss_count: snapshot.miss_count,
            max_combo: snapshot.max_combo,
            score: snapshot.score,
            accuracy: self.score.accuracy(),
            early_count: stats.early_count,
            late_count: stats.late_count,
            cleared: self.end_reason == Some(EndReason::SongFinished),
        })
    }

    fn resume_playback(&mut self) -> Result<(), EngineError> {
        let offset = self.clock.resume_offset();
        // Mid-song resume, never a pre-delay.
        self.clock.start(offset, 0.0)
    }
}
