//! Integration tests for session flow.
use std::time::Duration;

use cq_core::{
    AdvanceOutcome, CoreError, Cue, CueMap, DialogueSession, HeadlessSurface, SessionConfig,
    SessionState,
};
use cq_script::StoryLoader;

const FRAME: Duration = Duration::from_millis(16);

const GREETING: &str = r#"{
    "start": "intro",
    "knots": {
        "intro": [
            { "line": "Hello" },
            { "choices": [
                { "text": "Yes", "goto": "yes", "tags": ["happy"] },
                { "text": "No", "response": "Oh.", "goto": "no" }
            ] }
        ],
        "yes": [ "end" ],
        "no": [ { "line": "Maybe later." } ]
    }
}"#;

fn session() -> DialogueSession<StoryLoader, HeadlessSurface> {
    let config = SessionConfig::new().with_strict_choice_index(false);
    DialogueSession::new(StoryLoader, HeadlessSurface::new(4), config)
}

fn run_frames(session: &mut DialogueSession<StoryLoader, HeadlessSurface>, frames: usize) {
    for _ in 0..frames {
        session.tick(&mut false, FRAME).unwrap();
    }
}

#[test]
fn greeting_accepts_and_leaves() {
    let mut session = session();
    let cues = CueMap::new().with_tag_cue("happy", Cue::new("Happy"));

    session.enter_dialogue_mode(GREETING, cues).unwrap();
    assert_eq!(session.surface().text(), "Hello");
    assert_eq!(session.surface().visible_choices(), vec!["Yes", "No"]);

    session.tick(&mut true, FRAME).unwrap();
    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(session.surface().text(), "Hello");
    assert_eq!(session.surface().focus(), Some(0));

    session.select_choice(0).unwrap();
    assert_eq!(session.state(), SessionState::Exiting);
    assert_eq!(session.surface().cues(), &[Cue::new("Happy")]);
    assert!(!session.surface().container_visible());

    // 200ms default cooldown
    run_frames(&mut session, 13);
    assert_eq!(session.state(), SessionState::Inactive);
    assert!(!session.surface().panel_visible());
    assert_eq!(session.surface().text(), "");
}

#[test]
fn declining_speaks_response_then_follows_goto() {
    let mut session = session();
    session.enter_dialogue_mode(GREETING, CueMap::new()).unwrap();

    session.select_choice(1).unwrap();
    assert_eq!(session.surface().text(), "Oh.");
    assert!(session.surface().cues().is_empty());

    session.tick(&mut true, FRAME).unwrap();
    assert_eq!(session.surface().text(), "Oh.");
    session.tick(&mut true, FRAME).unwrap();
    assert_eq!(session.surface().text(), "Maybe later.");
    assert_eq!(session.advance().unwrap(), AdvanceOutcome::Exiting);
}

#[test]
fn malformed_story_never_activates() {
    let mut session = session();
    let err = session
        .enter_dialogue_mode(r#"{"start": "missing", "knots": {}}"#, CueMap::new())
        .unwrap_err();

    assert!(matches!(err, CoreError::ScriptLoad(_)));
    assert!(err.to_string().contains("missing"));
    assert_eq!(session.state(), SessionState::Inactive);
    assert!(!session.has_interpreter());
}

#[test]
fn entering_twice_keeps_one_story() {
    let mut session = session();
    session.enter_dialogue_mode(GREETING, CueMap::new()).unwrap();
    let first = session.generation();

    session.enter_dialogue_mode(GREETING, CueMap::new()).unwrap();

    assert!(session.generation() > first);
    assert!(session.has_interpreter());
    assert_eq!(session.state(), SessionState::Active);
    run_frames(&mut session, 20);
    assert_eq!(session.surface().focus(), Some(0));
    assert!(session.drain_reports().is_empty());
}

#[test]
fn looping_story_keeps_offering_choices() {
    let source = r#"{
        "start": "menu",
        "knots": {
            "menu": [
                { "line": "What now?" },
                { "choices": [
                    { "text": "Again", "goto": "menu" },
                    { "text": "Stop", "goto": "stop" }
                ] }
            ],
            "stop": [ { "line": "Done." } ]
        }
    }"#;
    let mut session = session();
    session.enter_dialogue_mode(source, CueMap::new()).unwrap();

    for _ in 0..3 {
        session.select_choice(0).unwrap();
        assert_eq!(session.surface().text(), "What now?");
        assert!(session.awaiting_choice());
        run_frames(&mut session, 1);
    }
    session.select_choice(1).unwrap();
    assert_eq!(session.surface().text(), "Done.");
    assert!(!session.awaiting_choice());
}
