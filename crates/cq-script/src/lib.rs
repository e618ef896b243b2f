//! JSON story interpreter for Colloquy.
//!
//! A story is a set of named knots. Each knot is a list of steps: lines of
//! text, choice blocks, diverts to other knots, and an explicit end. [`Story`]
//! runs a validated [`Script`] and implements [`cq_core::Interpreter`], and
//! [`StoryLoader`] plugs it into a [`cq_core::DialogueSession`].

/// Error types for the story interpreter.
pub mod error;
/// Loader adapter for dialogue sessions.
pub mod loader;
/// Story document model and validation.
pub mod script;
/// Story execution.
pub mod story;

pub use error::{ScriptError, ScriptResult};
pub use loader::StoryLoader;
pub use script::{ChoiceDef, Script, ScriptStats, Step};
pub use story::Story;
