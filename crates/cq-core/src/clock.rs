//! Frame clock driving deferred steps.

use std::time::Duration;

/// Tracks presentation time: a monotonic frame counter and elapsed wall time.
///
/// The session never reads the system clock itself. The owning application
/// passes the frame delta to [`crate::DialogueSession::tick`], which keeps the
/// state machine deterministic under test.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frame: u64,
    elapsed: Duration,
}

impl FrameClock {
    /// Create a clock at frame 0 with nothing elapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame that took `dt`. Returns the new frame number.
    pub fn advance(&mut self, dt: Duration) -> u64 {
        self.frame += 1;
        self.elapsed += dt;
        self.frame
    }

    /// Return the current frame number.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
