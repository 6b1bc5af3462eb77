use thiserror::Error;

/// Fatal engine errors. Redundant transitions (pause while paused, start
/// while playing) are deliberately not here: those are logged no-ops so UI
/// callback races can never corrupt session state.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The loaded note data is empty or malformed. No partial session is
    /// created when this is returned.
    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    /// The host clock could not be read. The session stays in its previous
    /// state when this is returned from start/resume.
    #[error("playback clock unavailable: {0}")]
    ClockUnavailable(String),
}
