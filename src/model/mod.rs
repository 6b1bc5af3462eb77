mod note;
mod pitch;
mod timeline;

pub use note::{JudgmentStatus, Note};
pub use pitch::{PITCH_CLASS_COUNT, PitchClass};
pub use timeline::NoteTimeline;
