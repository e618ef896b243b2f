//! Stepwise execution of a [`Script`].

use std::collections::HashSet;

use cq_core::{ChoiceOption, Interpreter};

use crate::error::{ScriptError, ScriptResult};
use crate::script::{ChoiceDef, Script, Step};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cursor {
    knot: String,
    index: usize,
}

impl Cursor {
    fn start_of(knot: impl Into<String>) -> Self {
        Self {
            knot: knot.into(),
            index: 0,
        }
    }
}

/// A running story.
///
/// After every operation the cursor rests on a line, on a choice block, or
/// past the end. Diverts are followed eagerly.
#[derive(Debug, Clone)]
pub struct Story {
    script: Script,
    cursor: Option<Cursor>,
    choices: Vec<ChoiceDef>,
    pending_response: Option<String>,
    lines_shown: usize,
}

impl Story {
    /// Start `script` at its start knot.
    pub fn new(script: Script) -> ScriptResult<Self> {
        let cursor = Some(Cursor::start_of(script.start.clone()));
        let mut story = Self {
            script,
            cursor,
            choices: Vec::new(),
            pending_response: None,
            lines_shown: 0,
        };
        story.settle()?;
        Ok(story)
    }

    /// Parse, validate, and start a JSON story.
    pub fn from_json(source: &str) -> ScriptResult<Self> {
        Self::new(Script::from_json(source)?)
    }

    /// The script being run.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Whether the story has nothing left to say or offer.
    pub fn is_ended(&self) -> bool {
        self.cursor.is_none() && self.pending_response.is_none()
    }

    /// Name of the knot the cursor is in.
    pub fn current_knot(&self) -> Option<&str> {
        self.cursor.as_ref().map(|c| c.knot.as_str())
    }

    /// Number of lines produced so far.
    pub fn lines_shown(&self) -> usize {
        self.lines_shown
    }

    /// The choice definitions currently on offer.
    pub fn choice_defs(&self) -> &[ChoiceDef] {
        if self.pending_response.is_some() {
            &[]
        } else {
            &self.choices
        }
    }

    /// Produce the next line.
    pub fn next_line(&mut self) -> ScriptResult<String> {
        if let Some(response) = self.pending_response.take() {
            self.lines_shown += 1;
            return Ok(response);
        }

        let cursor = self.cursor.as_mut().ok_or(ScriptError::CannotContinue)?;
        let line = match self
            .script
            .knots
            .get(&cursor.knot)
            .and_then(|steps| steps.get(cursor.index))
        {
            Some(Step::Line(text)) => text.clone(),
            _ => return Err(ScriptError::CannotContinue),
        };
        cursor.index += 1;
        self.lines_shown += 1;
        self.settle()?;
        Ok(line)
    }

    /// Take the choice at `index`.
    pub fn choose(&mut self, index: usize) -> ScriptResult<()> {
        let available = self.choice_defs().len();
        if index >= available {
            return Err(ScriptError::InvalidChoice { index, available });
        }
        let chosen = self.choices.swap_remove(index);
        self.choices.clear();

        self.cursor = match (chosen.goto, self.cursor.take()) {
            (Some(knot), _) => Some(Cursor::start_of(knot)),
            (None, Some(block)) => Some(Cursor {
                knot: block.knot,
                index: block.index + 1,
            }),
            (None, None) => None,
        };
        self.pending_response = chosen.response;
        self.settle()
    }

    /// Move the cursor forward to the next line or choice block.
    fn settle(&mut self) -> ScriptResult<()> {
        self.choices.clear();
        let mut visited = HashSet::new();

        while let Some(cursor) = self.cursor.as_mut() {
            let step = self
                .script
                .knots
                .get(&cursor.knot)
                .and_then(|steps| steps.get(cursor.index));
            match step {
                None | Some(Step::End) => self.cursor = None,
                Some(Step::Line(_)) => return Ok(()),
                Some(Step::Choices(set)) => {
                    self.choices = set.clone();
                    return Ok(());
                }
                Some(Step::Divert(target)) => {
                    if !visited.insert(target.clone()) {
                        return Err(ScriptError::DivertLoop(target.clone()));
                    }
                    *cursor = Cursor::start_of(target.clone());
                }
            }
        }
        Ok(())
    }
}

impl Interpreter for Story {
    type Error = ScriptError;

    fn can_continue(&self) -> bool {
        if self.pending_response.is_some() {
            return true;
        }
        self.cursor.as_ref().is_some_and(|c| {
            matches!(
                self.script.knots.get(&c.knot).and_then(|s| s.get(c.index)),
                Some(Step::Line(_))
            )
        })
    }

    fn continue_story(&mut self) -> ScriptResult<String> {
        self.next_line()
    }

    fn current_choices(&self) -> Vec<ChoiceOption> {
        self.choice_defs()
            .iter()
            .map(|c| ChoiceOption {
                text: c.text.clone(),
                tags: c.tags.clone(),
            })
            .collect()
    }

    fn choose_index(&mut self, index: usize) -> ScriptResult<()> {
        self.choose(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn start(steps: Vec<(&str, Vec<Step>)>) -> Story {
        let script = steps
            .into_iter()
            .fold(Script::new("start"), |s, (name, knot)| s.with_knot(name, knot));
        Story::new(script).unwrap()
    }

    fn line(text: &str) -> Step {
        Step::Line(text.to_string())
    }

    #[test]
    fn lines_then_end() {
        let mut story = start(vec![("start", vec![line("one"), line("two")])]);
        assert!(story.can_continue());
        assert_eq!(story.continue_story().unwrap(), "one");
        assert_eq!(story.continue_story().unwrap(), "two");
        assert!(!story.can_continue());
        assert!(story.is_ended());
        assert!(matches!(
            story.continue_story(),
            Err(ScriptError::CannotContinue)
        ));
    }

    #[test]
    fn choices_follow_their_line() {
        let mut story = start(vec![(
            "start",
            vec![
                line("Hello"),
                Step::Choices(vec![ChoiceDef::new("Yes"), ChoiceDef::new("No")]),
            ],
        )]);
        assert!(story.current_choices().is_empty());

        assert_eq!(story.continue_story().unwrap(), "Hello");
        assert!(!story.can_continue());
        let texts: Vec<_> = story.current_choices().into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["Yes", "No"]);
        assert!(!story.is_ended());
    }

    #[test]
    fn choice_without_goto_resumes_after_block() {
        let mut story = start(vec![(
            "start",
            vec![
                Step::Choices(vec![ChoiceDef::new("a"), ChoiceDef::new("b")]),
                line("after"),
            ],
        )]);
        assert_eq!(story.current_choices().len(), 2);

        story.choose_index(1).unwrap();
        assert!(story.current_choices().is_empty());
        assert_eq!(story.continue_story().unwrap(), "after");
    }

    #[test]
    fn goto_and_response() {
        let mut story = start(vec![
            (
                "start",
                vec![
                    line("Well?"),
                    Step::Choices(vec![
                        ChoiceDef::new("Leave").with_response("Bye then.").with_goto("out"),
                    ]),
                ],
            ),
            ("out", vec![line("The door shuts."), Step::End]),
        ]);
        story.continue_story().unwrap();
        story.choose_index(0).unwrap();

        assert!(story.can_continue());
        assert_eq!(story.continue_story().unwrap(), "Bye then.");
        assert_eq!(story.current_knot(), Some("out"));
        assert_eq!(story.continue_story().unwrap(), "The door shuts.");
        assert!(story.is_ended());
        assert_eq!(story.lines_shown(), 3);
    }

    #[test]
    fn response_hides_next_choices_until_spoken() {
        let mut story = start(vec![(
            "start",
            vec![
                Step::Choices(vec![ChoiceDef::new("Ask").with_response("Sure.")]),
                Step::Choices(vec![ChoiceDef::new("Thanks")]),
            ],
        )]);
        story.choose_index(0).unwrap();

        assert!(story.current_choices().is_empty());
        assert_eq!(story.continue_story().unwrap(), "Sure.");
        assert_eq!(story.current_choices()[0].text, "Thanks");
    }

    #[test]
    fn diverts_are_followed() {
        let mut story = start(vec![
            ("start", vec![Step::Divert("middle".to_string())]),
            ("middle", vec![Step::Divert("end".to_string())]),
            ("end", vec![line("arrived")]),
        ]);
        assert_eq!(story.current_knot(), Some("end"));
        assert_eq!(story.continue_story().unwrap(), "arrived");
    }

    #[test]
    fn divert_loop_is_an_error() {
        let script = Script::new("start")
            .with_knot("start", vec![Step::Divert("other".to_string())])
            .with_knot("other", vec![Step::Divert("start".to_string())]);
        let err = Story::new(script).unwrap_err();
        assert!(matches!(err, ScriptError::DivertLoop(_)));
    }

    #[test]
    fn loop_through_a_line_is_fine() {
        let mut story = start(vec![(
            "start",
            vec![line("again"), Step::Divert("start".to_string())],
        )]);
        for _ in 0..5 {
            assert_eq!(story.continue_story().unwrap(), "again");
        }
    }

    #[test]
    fn tags_reach_choice_options() {
        let story = start(vec![(
            "start",
            vec![Step::Choices(vec![ChoiceDef::new("Smile").with_tag("happy")])],
        )]);
        assert_eq!(story.current_choices()[0].tags, vec!["happy"]);
    }

    #[test]
    fn invalid_choice_index() {
        let mut story = start(vec![(
            "start",
            vec![Step::Choices(vec![ChoiceDef::new("only")])],
        )]);
        let err = story.choose_index(3).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::InvalidChoice {
                index: 3,
                available: 1
            }
        ));
        assert_eq!(story.current_choices().len(), 1);
    }

    proptest! {
        #[test]
        fn linear_knots_speak_every_line(knots in prop::collection::vec(1usize..5, 1..6)) {
            let names: Vec<String> = (0..knots.len()).map(|i| format!("k{i}")).collect();
            let script = knots.iter().enumerate().fold(Script::new("k0"), |s, (i, &n)| {
                let mut steps: Vec<Step> = (0..n).map(|j| line(&format!("{i}.{j}"))).collect();
                if let Some(next) = names.get(i + 1) {
                    steps.push(Step::Divert(next.clone()));
                }
                s.with_knot(names[i].clone(), steps)
            });
            let mut story = Story::new(script).unwrap();

            let mut spoken = 0;
            while story.can_continue() {
                story.continue_story().unwrap();
                spoken += 1;
            }
            prop_assert_eq!(spoken, knots.iter().sum::<usize>());
            prop_assert!(story.is_ended());
        }
    }
}
