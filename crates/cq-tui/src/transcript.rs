//! Non-interactive runs: a printed transcript and a validity check.

use std::io::Write;

use cq_core::{DialogueSession, HeadlessSurface, SessionState, SurfaceEvent};
use cq_script::{Script, Story, StoryLoader};
use tracing::info;

use crate::config::TuiConfig;

/// Upper bound on session steps before a run is declared stuck.
const MAX_STEPS: usize = 100_000;

/// Play `source` to the end, answering choice points from `answers` in order.
///
/// Lines go to `out` as they are shown; each choice point prints its options
/// as `[n] text` followed by `> text` for the answer taken.
pub fn run(
    source: &str,
    answers: &[usize],
    config: &TuiConfig,
    out: &mut impl Write,
) -> Result<(), String> {
    config.validate()?;
    let mut session = DialogueSession::new(
        StoryLoader,
        HeadlessSurface::new(config.slots),
        config.session_config().with_strict_choice_index(false),
    );
    let tick = config.tick_rate();
    let mut answers = answers.iter().copied();

    session
        .enter_dialogue_mode(source, config.cue_map()?)
        .map_err(|e| e.to_string())?;

    for _ in 0..MAX_STEPS {
        print_events(session.surface_mut().drain_events(), out)?;

        match session.state() {
            SessionState::Inactive => {
                info!("transcript finished");
                return Ok(());
            }
            SessionState::Active if session.awaiting_choice() => {
                let shown = session.surface().visible_choices();
                for (i, text) in shown.iter().enumerate() {
                    writeln!(out, "  [{i}] {text}").map_err(|e| e.to_string())?;
                }
                let answer = answers.next().ok_or_else(|| {
                    "story is waiting for a choice but no --choose answers are left".to_string()
                })?;
                let text = shown
                    .get(answer)
                    .map(|t| t.to_string())
                    .ok_or_else(|| {
                        format!("choice {answer} is out of range ({} shown)", shown.len())
                    })?;
                writeln!(out, "> {text}").map_err(|e| e.to_string())?;

                session.select_choice(answer).map_err(|e| e.to_string())?;
                session.tick(&mut false, tick).map_err(|e| e.to_string())?;
            }
            SessionState::Active => {
                session.tick(&mut true, tick).map_err(|e| e.to_string())?;
            }
            SessionState::Exiting => {
                session.tick(&mut false, tick).map_err(|e| e.to_string())?;
            }
        }
    }
    Err(format!("story did not finish within {MAX_STEPS} steps"))
}

fn print_events(events: Vec<SurfaceEvent>, out: &mut impl Write) -> Result<(), String> {
    for event in events {
        match event {
            SurfaceEvent::Text(text) if !text.is_empty() => {
                writeln!(out, "{text}").map_err(|e| e.to_string())?;
            }
            SurfaceEvent::Cue(cue) => {
                writeln!(out, "[cue: {cue}]").map_err(|e| e.to_string())?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Validate a story and describe its size.
pub fn check(source: &str) -> Result<String, String> {
    let script = Script::from_json(source).map_err(|e| e.to_string())?;
    let stats = script.stats();
    Story::new(script).map_err(|e| e.to_string())?;
    Ok(format!(
        "{} knots, {} lines, {} choice points ({} choices)",
        stats.knots, stats.lines, stats.choice_points, stats.choices
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORY: &str = r#"{
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
            "no": [ { "line": "Maybe later." } ]
        }
    }"#;

    fn transcript(answers: &[usize], config: &TuiConfig) -> Result<String, String> {
        let mut out = Vec::new();
        run(STORY, answers, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn accepting_prints_cue_and_line() {
        let config = TuiConfig::parse("[[cues]]\ntag = \"happy\"\ncue = \"Happy\"\n").unwrap();
        let text = transcript(&[0], &config).unwrap();
        assert_eq!(
            text,
            "Hello\n  [0] Yes\n  [1] No\n> Yes\n[cue: Happy]\nGreat!\n"
        );
    }

    #[test]
    fn declining_prints_response_first() {
        let text = transcript(&[1], &TuiConfig::default()).unwrap();
        assert!(text.ends_with("> No\nOh.\nMaybe later.\n"));
    }

    #[test]
    fn running_out_of_answers_fails() {
        let err = transcript(&[], &TuiConfig::default()).unwrap_err();
        assert!(err.contains("no --choose answers"));
    }

    #[test]
    fn out_of_range_answer_fails() {
        let err = transcript(&[5], &TuiConfig::default()).unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn overflowing_slots_shows_prefix() {
        let config = TuiConfig {
            slots: 1,
            ..TuiConfig::default()
        };
        let text = transcript(&[0], &config).unwrap();
        assert!(text.contains("  [0] Yes\n> Yes"));
        assert!(!text.contains("[1] No"));
    }

    #[test]
    fn zero_slots_is_rejected_before_playing() {
        let config = TuiConfig {
            slots: 0,
            ..TuiConfig::default()
        };
        let err = transcript(&[0], &config).unwrap_err();
        assert!(err.contains("at least 1"));
    }

    #[test]
    fn check_reports_stats() {
        assert_eq!(
            check(STORY).unwrap(),
            "3 knots, 3 lines, 1 choice points (2 choices)"
        );
    }

    #[test]
    fn check_rejects_divert_loop() {
        let err = check(r#"{"start": "a", "knots": {"a": [{"divert": "a"}]}}"#).unwrap_err();
        assert!(err.contains("a"));
    }
}
