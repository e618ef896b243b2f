//! Error types for the dialogue core.

use thiserror::Error;

use crate::deferred::Generation;

/// Boxed error coming from an external collaborator (loader or interpreter).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for dialogue operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while driving a dialogue session.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The script could not be turned into an interpreter.
    #[error("failed to load script: {0}")]
    ScriptLoad(#[source] BoxError),

    /// The interpreter failed while the session was running.
    #[error("interpreter error: {0}")]
    Interpreter(#[source] BoxError),

    /// More choices were offered than the surface has slots for.
    #[error("{given} choices offered but only {capacity} slots available")]
    CapacityExceeded {
        /// Number of choices the interpreter produced.
        given: usize,
        /// Number of presentation slots.
        capacity: usize,
    },

    /// A selection arrived for a choice that is not on display.
    #[error("invalid choice index {index} ({available} available)")]
    InvalidChoiceIndex {
        /// The rejected index.
        index: usize,
        /// Size of the current choice set.
        available: usize,
    },

    /// A deferred step resumed after its session was torn down or replaced.
    #[error("stale resumption: scheduled in {scheduled}, current is {current}")]
    StaleResumption {
        /// Generation the step was scheduled in.
        scheduled: Generation,
        /// Generation at the time of resumption.
        current: Generation,
    },
}

impl CoreError {
    /// Whether this error is reported and then ignored by the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::CapacityExceeded { .. } | CoreError::StaleResumption { .. }
        )
    }
}
