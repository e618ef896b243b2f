//! Error types for the story interpreter.

use thiserror::Error;

/// Result type for story operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors raised while loading or running a story.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The source is not a valid story document.
    #[error("malformed story: {0}")]
    Parse(#[from] serde_json::Error),

    /// A divert, goto, or the start names a knot that does not exist.
    #[error("unknown knot '{knot}' referenced from {from}")]
    UnknownKnot {
        /// The missing knot.
        knot: String,
        /// Where it was referenced.
        from: String,
    },

    /// A choice block without any choices.
    #[error("empty choice block in knot '{0}'")]
    EmptyChoices(String),

    /// Diverts chase each other without producing a line.
    #[error("divert loop through knot '{0}'")]
    DivertLoop(String),

    /// No line is available at this point.
    #[error("story cannot continue here")]
    CannotContinue,

    /// Choice index outside the current choice set.
    #[error("no choice {index} ({available} available)")]
    InvalidChoice {
        /// The rejected index.
        index: usize,
        /// Size of the current choice set.
        available: usize,
    },
}
