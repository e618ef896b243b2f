//! Choice options and presentation slots.

/// One option of a choice set as produced by the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// The text shown to the player.
    pub text: String,
    /// Metadata tags attached by the script, used for cue lookup.
    pub tags: Vec<String>,
}

impl ChoiceOption {
    /// Create a choice with the given text and no tags.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: Vec::new(),
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A reusable presentation element showing one choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSlot {
    /// Position of the slot, 0-based.
    pub ordinal: usize,
    /// Whether the slot is shown and can be activated.
    pub enabled: bool,
    /// Text currently assigned to the slot.
    pub display_text: String,
}

impl ChoiceSlot {
    /// Create a disabled, empty slot.
    pub fn new(ordinal: usize) -> Self {
        Self {
            ordinal,
            enabled: false,
            display_text: String::new(),
        }
    }
}
