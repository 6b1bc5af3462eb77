//! The playing core: clock, judgment, scoring, wait mode, and the session
//! that ties them together.

pub mod clock;
pub mod judge;
pub mod result;
pub mod score;
pub mod session;
pub mod wait;

pub use clock::{MEDIA_END_TOLERANCE, PlaybackClock};
pub use judge::{JudgeEngine, JudgeOutcome, JudgeWindows, Judgment, TimingStats};
pub use result::PlayResult;
pub use score::{ScoreEffects, ScoreKeeper, ScorePolicy, ScoreSnapshot, combo_bonus};
pub use session::{EndReason, GameSession, HudSnapshot, KeyEffects, SessionPhase, TickEffects};
pub use wait::{PendingNote, WaitMode};
