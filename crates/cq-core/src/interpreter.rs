//! The narrative-script interpreter contract.
//!
//! The core never looks inside a script. It asks a [`ScriptLoader`] for a
//! fresh [`Interpreter`] per session and then only talks to that.

use crate::choice::ChoiceOption;

/// Executes a loaded branching script one step at a time.
pub trait Interpreter {
    /// Error raised by a failed step.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether another line of text is available right now.
    ///
    /// False both when the script has ended and when it is waiting on a
    /// choice; [`Interpreter::current_choices`] tells the two apart.
    fn can_continue(&self) -> bool;

    /// Produce the next line of text.
    fn continue_story(&mut self) -> Result<String, Self::Error>;

    /// The choice set offered at the current point, in script order.
    fn current_choices(&self) -> Vec<ChoiceOption>;

    /// Commit to the choice at `index` of [`Interpreter::current_choices`].
    fn choose_index(&mut self, index: usize) -> Result<(), Self::Error>;
}

/// Builds interpreters from script source.
pub trait ScriptLoader {
    /// Interpreter produced by this loader.
    type Interpreter: Interpreter;
    /// Error raised for malformed scripts.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load `source` into a fresh interpreter positioned at the start.
    fn load(&self, source: &str) -> Result<Self::Interpreter, Self::Error>;
}
