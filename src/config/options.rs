use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::play::{JudgeWindows, ScorePolicy};

/// Engine options recognized by a session.
///
/// `scroll_speed` and `use_colored_notes` are carried for renderers and never
/// read by judgment or scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOptions {
    /// Good half-window in milliseconds; the perfect window is derived from
    /// it (see `JudgeWindows::from_good_ms`).
    #[serde(default = "default_hit_window_good_ms")]
    pub hit_window_good_ms: f64,
    /// Staff scroll speed multiplier (render-only).
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed: f64,
    /// Per-pitch note coloring (render-only).
    #[serde(default)]
    pub use_colored_notes: bool,
    /// Health pinned at zero instead of game over.
    #[serde(default)]
    pub no_death_mode: bool,
    /// Freeze playback on a miss until the missed pitch class is played.
    #[serde(default)]
    pub wait_mode: bool,
    /// Lead-in before the first start of a song, in seconds.
    #[serde(default = "default_pre_delay_seconds")]
    pub pre_delay_seconds: f64,
    /// Health/energy policy constants.
    #[serde(default)]
    pub score_policy: ScorePolicy,
}

fn default_hit_window_good_ms() -> f64 {
    100.0
}

fn default_scroll_speed() -> f64 {
    1.0
}

fn default_pre_delay_seconds() -> f64 {
    2.0
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            hit_window_good_ms: default_hit_window_good_ms(),
            scroll_speed: default_scroll_speed(),
            use_colored_notes: false,
            no_death_mode: false,
            wait_mode: false,
            pre_delay_seconds: default_pre_delay_seconds(),
            score_policy: ScorePolicy::default(),
        }
    }
}

impl GameOptions {
    /// Judgment windows derived from the configured good window.
    pub fn windows(&self) -> JudgeWindows {
        JudgeWindows::from_good_ms(self.hit_window_good_ms)
    }

    /// Load options from a JSON file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading options from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing options from {}", path.display()))
    }

    /// Save options as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("writing options to {}", path.display()))
    }
}
