use log::info;
use serde::{Deserialize, Serialize};

use super::judge::JudgeOutcome;

/// Energy and health policy constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScorePolicy {
    pub max_health: i32,
    pub initial_health: i32,
    /// Signed energy per outcome, before any combo bonus.
    pub perfect_energy: i32,
    pub good_energy: i32,
    pub miss_energy: i32,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            max_health: 75,
            initial_health: 75,
            perfect_energy: 2,
            good_energy: 0,
            miss_energy: -5,
        }
    }
}

/// Bonus energy for a sustained combo: one point per full ten notes of the
/// streak, nothing below ten. Applied to hits only; a miss has already reset
/// the streak by the time energy is computed.
pub fn combo_bonus(combo: u32) -> i32 {
    if combo < 10 { 0 } else { (combo / 10) as i32 }
}

/// Read-only view of the scoring state for UI refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSnapshot {
    pub health: i32,
    pub max_health: i32,
    pub score: i64,
    pub combo: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub miss_count: u32,
    pub game_over: bool,
}

/// What one applied outcome did to the score state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEffects {
    pub outcome: JudgeOutcome,
    /// Raw (unclamped) energy applied, combo bonus included.
    pub energy: i32,
    pub combo_bonus: i32,
    /// True only on the call that transitioned to game over.
    pub game_over_signal: bool,
    pub snapshot: ScoreSnapshot,
}

/// Health, score, and combo state machine. The sole mutator of health; all
/// updates flow through `apply`.
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    policy: ScorePolicy,
    health: i32,
    score: i64,
    combo: u32,
    max_combo: u32,
    perfect_count: u32,
    good_count: u32,
    miss_count: u32,
    game_over: bool,
    no_death: bool,
}

impl ScoreKeeper {
    pub fn new(policy: ScorePolicy, no_death: bool) -> Self {
        Self {
            policy,
            health: policy.initial_health.clamp(0, policy.max_health),
            score: 0,
            combo: 0,
            max_combo: 0,
            perfect_count: 0,
            good_count: 0,
            miss_count: 0,
            game_over: false,
            no_death,
        }
    }

    /// Fold one judgment outcome into the score state and report the
    /// effects. A no-op once game over until `reset`.
    pub fn apply(&mut self, outcome: JudgeOutcome) -> ScoreEffects {
        if self.game_over {
            return ScoreEffects {
                outcome,
                energy: 0,
                combo_bonus: 0,
                game_over_signal: false,
                snapshot: self.snapshot(),
            };
        }

        let (base_energy, bonus) = match outcome {
            JudgeOutcome::Perfect => {
                self.perfect_count += 1;
                self.combo += 1;
                self.max_combo = self.max_combo.max(self.combo);
                (self.policy.perfect_energy, combo_bonus(self.combo))
            }
            JudgeOutcome::Good => {
                self.good_count += 1;
                self.combo += 1;
                self.max_combo = self.max_combo.max(self.combo);
                (self.policy.good_energy, combo_bonus(self.combo))
            }
            JudgeOutcome::Miss => {
                self.miss_count += 1;
                self.max_combo = self.max_combo.max(self.combo);
                self.combo = 0;
                (self.policy.miss_energy, 0)
            }
        };

        let energy = base_energy + bonus;
        self.health = (self.health + energy).clamp(0, self.policy.max_health);
        // Score records the raw delta, including energy the health clamp
        // discarded at either bound.
        self.score += energy as i64;

        let mut game_over_signal = false;
        if self.health == 0 && !self.no_death && !self.game_over {
            self.game_over = true;
            game_over_signal = true;
            info!("health exhausted, game over");
        }

        ScoreEffects {
            outcome,
            energy,
            combo_bonus: bonus,
            game_over_signal,
            snapshot: self.snapshot(),
        }
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            health: self.health,
            max_health: self.policy.max_health,
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
            perfect_count: self.perfect_count,
            good_count: self.good_count,
            miss_count: self.miss_count,
            game_over: self.game_over,
        }
    }

    /// Weighted hit ratio: perfect counts double, misses count nothing.
    pub fn accuracy(&self) -> f64 {
        let total = self.perfect_count + self.good_count + self.miss_count;
        if total == 0 {
            return 100.0;
        }
        let points = 2 * self.perfect_count + self.good_count;
        (points as f64 / (2 * total) as f64) * 100.0
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// No-death mode pins health at zero instead of ending the game. Takes
    /// effect from the next applied outcome; an already-fired game over
    /// stays terminal until restart.
    pub fn set_no_death(&mut self, no_death: bool) {
        self.no_death = no_death;
    }

    /// Wholesale reset for restart. Policy and no-death setting survive.
    pub fn reset(&mut self) {
        *self = Self::new(self.policy, self.no_death);
    }
}
