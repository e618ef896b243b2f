//! Session configuration.

use std::time::Duration;

/// Default cooldown between the exhausting advance and deactivation.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(200);

/// Configuration for a dialogue session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cooldown between the script running out and the session going inactive.
    ///
    /// Keeps the input that ended the dialogue from reaching the surrounding
    /// application as a fresh action.
    pub exit_delay: Duration,
    /// Trip a debug assertion when a selection arrives for a slot that is not
    /// on display. The selection is rejected either way.
    pub strict_choice_index: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exit_delay: DEFAULT_EXIT_DELAY,
            strict_choice_index: cfg!(debug_assertions),
        }
    }
}

impl SessionConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exit cooldown.
    pub fn with_exit_delay(mut self, delay: Duration) -> Self {
        self.exit_delay = delay;
        self
    }

    /// Set whether invalid selections trip a debug assertion.
    pub fn with_strict_choice_index(mut self, strict: bool) -> Self {
        self.strict_choice_index = strict;
        self
    }
}
