use serde::Serialize;

/// Final statistics for a finished session, handed to the UI with the
/// terminal game-over or song-finished signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayResult {
    pub total_notes: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub miss_count: u32,
    pub max_combo: u32,
    pub score: i64,
    pub accuracy: f64,
    pub early_count: u32,
    pub late_count: u32,
    /// True when the song ran to its end without game over.
    pub cleared: bool,
}
