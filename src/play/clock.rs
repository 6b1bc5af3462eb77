use log::warn;

use crate::traits::time::TimeProvider;
use crate::util::EngineError;

/// How close (seconds) the playback position must be to the expected media
/// duration for an end-of-media callback to count as a natural end rather
/// than the echo of an explicit stop or pause.
pub const MEDIA_END_TOLERANCE: f64 = 0.1;

/// Single source of truth for the current song time.
///
/// While paused, `offset` is the authoritative resume point. While playing,
/// song time = offset + (provider now - scheduled start); a scheduled start
/// in the future (pre-delay) holds the reading at the offset until it
/// elapses, so the clock never reads negative.
#[derive(Debug)]
pub struct PlaybackClock<T: TimeProvider> {
    time: T,
    offset: f64,
    playing: bool,
    /// Provider reading at which playback (re)starts. None while paused.
    scheduled_start: Option<f64>,
}

impl<T: TimeProvider> PlaybackClock<T> {
    pub fn new(time: T) -> Self {
        Self {
            time,
            offset: 0.0,
            playing: false,
            scheduled_start: None,
        }
    }

    /// Schedule playback from `resume_offset`. The pre-delay applies only to
    /// a fresh start (offset 0); a mid-song resume begins immediately.
    /// Calling start while already playing is a logged no-op.
    pub fn start(&mut self, resume_offset: f64, pre_delay: f64) -> Result<(), EngineError> {
        if self.playing {
            warn!("start requested while already playing; ignored");
            return Ok(());
        }

        let now = self.time.now();
        if !now.is_finite() {
            return Err(EngineError::ClockUnavailable(format!(
                "host clock returned {now}"
            )));
        }

        let delay = if resume_offset == 0.0 { pre_delay.max(0.0) } else { 0.0 };
        self.offset = resume_offset.max(0.0);
        self.scheduled_start = Some(now + delay);
        self.playing = true;
        Ok(())
    }

    /// Freeze the clock and capture the current song time as the new resume
    /// point. Idempotent: pausing while paused returns the stored offset
    /// without side effects.
    pub fn pause(&mut self) -> f64 {
        if !self.playing {
            warn!("pause requested while already paused; returning stored offset");
            return self.offset;
        }
        self.offset = self.current_time();
        self.playing = false;
        self.scheduled_start = None;
        self.offset
    }

    /// Current song time in seconds. Within the pre-delay this reads the
    /// pre-scheduled offset.
    pub fn current_time(&self) -> f64 {
        if !self.playing {
            return self.offset;
        }
        match self.scheduled_start {
            Some(start) => {
                let elapsed = self.time.now() - start;
                if elapsed <= 0.0 {
                    self.offset
                } else {
                    self.offset + elapsed
                }
            }
            None => self.offset,
        }
    }

    /// Hard reset to offset 0, not playing. Used only on restart; does not
    /// go through pause semantics.
    pub fn stop(&mut self) {
        self.offset = 0.0;
        self.playing = false;
        self.scheduled_start = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The offset playback would resume from.
    pub fn resume_offset(&self) -> f64 {
        if self.playing { self.current_time() } else { self.offset }
    }

    /// Decide whether an end-of-media callback is a genuine natural end.
    /// True only when the clock is still actively playing and the playback
    /// position is within tolerance of the expected duration; otherwise the
    /// callback raced an explicit stop or pause and must not be forwarded.
    pub fn is_natural_end(&self, expected_duration: f64) -> bool {
        self.playing && (self.current_time() - expected_duration).abs() <= MEDIA_END_TOLERANCE
    }
}
