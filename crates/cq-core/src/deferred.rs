//! Deferred steps and the generation tokens that guard them.

use std::fmt;
use std::time::Duration;

use crate::clock::FrameClock;

/// Identifies one session run. Bumped on every entry and teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Return the following generation.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generation {}", self.0)
    }
}

/// When a deferred step becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    /// Due once the clock has reached this frame.
    Frame(u64),
    /// Due once this much time has elapsed on the clock.
    Elapsed(Duration),
}

/// A step scheduled for later, tagged with the generation that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    generation: Generation,
    due: Due,
}

impl Deferred {
    /// Schedule a step for the frame after the clock's current one.
    pub fn next_frame(generation: Generation, clock: &FrameClock) -> Self {
        Self {
            generation,
            due: Due::Frame(clock.frame() + 1),
        }
    }

    /// Schedule a step once `delay` has elapsed from the clock's current time.
    pub fn after(generation: Generation, clock: &FrameClock, delay: Duration) -> Self {
        Self {
            generation,
            due: Due::Elapsed(clock.elapsed() + delay),
        }
    }

    /// Generation the step belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// When the step becomes due.
    pub fn due(&self) -> Due {
        self.due
    }

    /// Whether the step may run at the clock's current position.
    pub fn is_due(&self, clock: &FrameClock) -> bool {
        match self.due {
            Due::Frame(frame) => clock.frame() >= frame,
            Due::Elapsed(at) => clock.elapsed() >= at,
        }
    }

    /// Whether the step still belongs to the `current` generation.
    pub fn is_current(&self, current: Generation) -> bool {
        self.generation == current
    }
}
