//! [`ScriptLoader`] for JSON stories.

use cq_core::ScriptLoader;

use crate::error::ScriptError;
use crate::story::Story;

/// Loads JSON story source into a fresh [`Story`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StoryLoader;

impl ScriptLoader for StoryLoader {
    type Interpreter = Story;
    type Error = ScriptError;

    fn load(&self, source: &str) -> Result<Story, ScriptError> {
        Story::from_json(source)
    }
}
