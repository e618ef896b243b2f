//! Presentation cues fired in response to choices.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::choice::ChoiceOption;

/// A named presentation trigger, e.g. an expression or animation signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cue(String);

impl Cue {
    /// Create a cue with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The cue's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a selected choice to the cue it should fire.
///
/// Tag rules win over index rules. The first tag on the choice that has a
/// rule decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueMap {
    by_index: BTreeMap<usize, Cue>,
    by_tag: BTreeMap<String, Cue>,
}

impl CueMap {
    /// Create an empty map. No choice fires a cue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `cue` whenever the choice at `index` is selected.
    pub fn with_index_cue(mut self, index: usize, cue: Cue) -> Self {
        self.by_index.insert(index, cue);
        self
    }

    /// Fire `cue` whenever a choice carrying `tag` is selected.
    pub fn with_tag_cue(mut self, tag: impl Into<String>, cue: Cue) -> Self {
        self.by_tag.insert(tag.into(), cue);
        self
    }

    /// Whether the map has no rules.
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty() && self.by_tag.is_empty()
    }

    /// Resolve the cue for selecting `choice` at `index`.
    pub fn resolve(&self, index: usize, choice: &ChoiceOption) -> Option<&Cue> {
        choice
            .tags
            .iter()
            .find_map(|tag| self.by_tag.get(tag))
            .or_else(|| self.by_index.get(&index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_fires_nothing() {
        let map = CueMap::new();
        assert!(map.is_empty());
        assert_eq!(map.resolve(1, &ChoiceOption::new("Yes")), None);
    }

    #[test]
    fn index_rule() {
        let map = CueMap::new()
            .with_index_cue(1, Cue::new("Happy"))
            .with_index_cue(2, Cue::new("Sad"));

        let choice = ChoiceOption::new("Sure");
        assert_eq!(map.resolve(0, &choice), None);
        assert_eq!(map.resolve(1, &choice), Some(&Cue::new("Happy")));
        assert_eq!(map.resolve(2, &choice).map(Cue::name), Some("Sad"));
    }

    #[test]
    fn tag_rule_beats_index_rule() {
        let map = CueMap::new()
            .with_index_cue(0, Cue::new("Happy"))
            .with_tag_cue("grim", Cue::new("Sad"));

        let tagged = ChoiceOption::new("Refuse").with_tag("grim");
        assert_eq!(map.resolve(0, &tagged), Some(&Cue::new("Sad")));

        let untagged = ChoiceOption::new("Accept").with_tag("plain");
        assert_eq!(map.resolve(0, &untagged), Some(&Cue::new("Happy")));
    }
}
