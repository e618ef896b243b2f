//! Story documents: knots of lines, choice blocks, and diverts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ScriptError, ScriptResult};

/// A parsed and validated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Knot the story begins in.
    pub start: String,
    /// Named sequences of steps.
    pub knots: BTreeMap<String, Vec<Step>>,
}

/// One step of a knot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// A line of text.
    Line(String),
    /// A decision point.
    Choices(Vec<ChoiceDef>),
    /// Jump to the start of another knot.
    Divert(String),
    /// Stop the story.
    End,
}

/// A single option of a choice block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoiceDef {
    /// The text shown to the player.
    pub text: String,
    /// Metadata tags handed to the presentation layer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Line produced right after the choice is taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Knot to continue in. Without one the story resumes after the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goto: Option<String>,
}

impl ChoiceDef {
    /// Create a choice with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: Vec::new(),
            response: None,
            goto: None,
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the response line.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Set the knot to continue in.
    pub fn with_goto(mut self, knot: impl Into<String>) -> Self {
        self.goto = Some(knot.into());
        self
    }
}

/// Size summary of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptStats {
    /// Number of knots.
    pub knots: usize,
    /// Number of line steps.
    pub lines: usize,
    /// Number of choice blocks.
    pub choice_points: usize,
    /// Number of options across all choice blocks.
    pub choices: usize,
}

impl Script {
    /// Create a script starting in `start` with no knots yet.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            knots: BTreeMap::new(),
        }
    }

    /// Add a knot.
    pub fn with_knot(mut self, name: impl Into<String>, steps: Vec<Step>) -> Self {
        self.knots.insert(name.into(), steps);
        self
    }

    /// Parse and validate a JSON story.
    pub fn from_json(source: &str) -> ScriptResult<Self> {
        let script: Script = serde_json::from_str(source)?;
        script.validate()?;
        Ok(script)
    }

    /// Check that every knot reference resolves and no choice block is empty.
    pub fn validate(&self) -> ScriptResult<()> {
        self.require_knot(&self.start, "start")?;

        for (name, steps) in &self.knots {
            for step in steps {
                match step {
                    Step::Divert(target) => {
                        self.require_knot(target, &format!("divert in '{name}'"))?;
                    }
                    Step::Choices(set) if set.is_empty() => {
                        return Err(ScriptError::EmptyChoices(name.clone()));
                    }
                    Step::Choices(set) => {
                        for goto in set.iter().filter_map(|c| c.goto.as_deref()) {
                            self.require_knot(goto, &format!("choice in '{name}'"))?;
                        }
                    }
                    Step::Line(_) | Step::End => {}
                }
            }
        }
        Ok(())
    }

    /// Count knots, lines, and choices.
    pub fn stats(&self) -> ScriptStats {
        let mut stats = ScriptStats {
            knots: self.knots.len(),
            ..ScriptStats::default()
        };
        for step in self.knots.values().flatten() {
            match step {
                Step::Line(_) => stats.lines += 1,
                Step::Choices(set) => {
                    stats.choice_points += 1;
                    stats.choices += set.len();
                }
                Step::Divert(_) | Step::End => {}
            }
        }
        stats
    }

    /// Render back to pretty JSON.
    pub fn to_json(&self) -> ScriptResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn require_knot(&self, knot: &str, from: &str) -> ScriptResult<()> {
        if self.knots.contains_key(knot) {
            Ok(())
        } else {
            Err(ScriptError::UnknownKnot {
                knot: knot.to_string(),
                from: from.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "start": "intro",
        "knots": {
            "intro": [
                { "line": "Hello" },
                { "choices": [
                    { "text": "Yes", "goto": "yes", "tags": ["happy"] },
                    { "text": "No", "response": "Oh.", "goto": "no" }
                ] }
            ],
            "yes": [ { "line": "Great!" }, "end" ],
            "no": [ { "divert": "intro" } ]
        }
    }"#;

    #[test]
    fn parses_all_step_kinds() {
        let script = Script::from_json(SAMPLE).unwrap();
        assert_eq!(script.start, "intro");
        assert_eq!(script.knots["yes"][1], Step::End);
        assert_eq!(script.knots["no"][0], Step::Divert("intro".to_string()));

        let Step::Choices(set) = &script.knots["intro"][1] else {
            panic!("expected choices");
        };
        assert_eq!(set[0], ChoiceDef::new("Yes").with_tag("happy").with_goto("yes"));
        assert_eq!(set[1].response.as_deref(), Some("Oh."));
    }

    #[test]
    fn builder_matches_json() {
        let built = Script::new("intro")
            .with_knot(
                "intro",
                vec![
                    Step::Line("Hello".to_string()),
                    Step::Choices(vec![
                        ChoiceDef::new("Yes").with_tag("happy").with_goto("yes"),
                        ChoiceDef::new("No").with_response("Oh.").with_goto("no"),
                    ]),
                ],
            )
            .with_knot("yes", vec![Step::Line("Great!".to_string()), Step::End])
            .with_knot("no", vec![Step::Divert("intro".to_string())]);

        assert_eq!(built, Script::from_json(SAMPLE).unwrap());
        let reparsed = Script::from_json(&built.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, built);
    }

    #[test]
    fn stats_count_steps() {
        let stats = Script::from_json(SAMPLE).unwrap().stats();
        assert_eq!(
            stats,
            ScriptStats {
                knots: 3,
                lines: 2,
                choice_points: 1,
                choices: 2,
            }
        );
    }

    #[test]
    fn rejects_syntax_errors() {
        let err = Script::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Script::from_json(r#"{"start": "a", "knots": {"a": []}, "extra": 1}"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn rejects_missing_start() {
        let err = Script::from_json(r#"{"start": "nowhere", "knots": {"a": []}}"#).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownKnot { ref knot, .. } if knot == "nowhere"));
    }

    #[test]
    fn rejects_dangling_goto() {
        let source = r#"{"start": "a", "knots": {"a": [
            {"choices": [{"text": "go", "goto": "b"}]}
        ]}}"#;
        let err = Script::from_json(source).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown knot 'b' referenced from choice in 'a'"
        );
    }

    #[test]
    fn rejects_empty_choice_block() {
        let source = r#"{"start": "a", "knots": {"a": [{"choices": []}]}}"#;
        let err = Script::from_json(source).unwrap_err();
        assert!(matches!(err, ScriptError::EmptyChoices(ref k) if k == "a"));
    }
}
