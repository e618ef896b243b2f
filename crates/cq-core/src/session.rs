//! Dialogue session lifecycle and the advance/choice protocol.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::choice::ChoiceOption;
use crate::clock::FrameClock;
use crate::config::SessionConfig;
use crate::cue::CueMap;
use crate::deferred::{Deferred, Generation};
use crate::error::{CoreError, CoreResult};
use crate::focus::FocusCoordinator;
use crate::interpreter::{Interpreter, ScriptLoader};
use crate::presenter::ChoicePresenter;
use crate::surface::{FocusTarget, InputSource, Surface};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No dialogue running. Advance signals are ignored.
    #[default]
    Inactive,
    /// Dialogue running.
    Active,
    /// Script exhausted, waiting out the exit cooldown.
    Exiting,
}

/// What a call to [`DialogueSession::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Session not active; nothing happened.
    Ignored,
    /// A choice set is on display; only a selection moves the story on.
    AwaitingChoice,
    /// A new line was shown, along with any choices that follow it.
    Line,
    /// No new line, but a pending choice set was shown.
    Choices,
    /// The script is exhausted and the exit cooldown has started.
    Exiting,
}

/// Drives one presentation surface through dialogue sessions.
///
/// Constructed once by the owning application. Each
/// [`enter_dialogue_mode`](Self::enter_dialogue_mode) loads a fresh
/// interpreter, and [`tick`](Self::tick) is called once per frame to poll
/// input and resume deferred steps.
pub struct DialogueSession<L: ScriptLoader, S> {
    loader: L,
    surface: S,
    config: SessionConfig,
    state: SessionState,
    interpreter: Option<L::Interpreter>,
    cues: CueMap,
    choices: Vec<ChoiceOption>,
    presenter: ChoicePresenter,
    focus: FocusCoordinator,
    exit: Option<Deferred>,
    clock: FrameClock,
    generation: Generation,
    container_visible: bool,
    selected_since_tick: bool,
    reports: Vec<CoreError>,
}

impl<L: ScriptLoader, S> fmt::Debug for DialogueSession<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogueSession")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("frame", &self.clock.frame())
            .field("choices", &self.choices.len())
            .field("exit_pending", &self.exit.is_some())
            .finish()
    }
}

impl<L, S> DialogueSession<L, S>
where
    L: ScriptLoader,
    S: Surface + FocusTarget,
{
    /// Create an inactive session. Allocates one slot per surface widget and
    /// hides the panel.
    pub fn new(loader: L, mut surface: S, config: SessionConfig) -> Self {
        let presenter = ChoicePresenter::new(surface.slot_count());
        surface.set_panel_visible(false);
        Self {
            loader,
            surface,
            config,
            state: SessionState::Inactive,
            interpreter: None,
            cues: CueMap::new(),
            choices: Vec::new(),
            presenter,
            focus: FocusCoordinator::new(),
            exit: None,
            clock: FrameClock::new(),
            generation: Generation::default(),
            container_visible: false,
            selected_since_tick: false,
            reports: Vec::new(),
        }
    }

    /// Start a dialogue from `script` and show its first line immediately.
    ///
    /// If a session is already running (or exiting) it is torn down first,
    /// but only once the new script has loaded. A load failure leaves
    /// everything as it was.
    pub fn enter_dialogue_mode(&mut self, script: &str, cues: CueMap) -> CoreResult<()> {
        let interpreter = self
            .loader
            .load(script)
            .map_err(|e| CoreError::ScriptLoad(Box::new(e)))?;

        if self.state != SessionState::Inactive {
            info!(
                state = ?self.state,
                generation = self.generation.value(),
                "re-entering dialogue, discarding running session"
            );
        }
        self.teardown();

        self.interpreter = Some(interpreter);
        self.cues = cues;
        self.state = SessionState::Active;
        info!(generation = self.generation.value(), "entered dialogue mode");

        self.surface.set_panel_visible(true);
        self.set_container_visible(true);
        self.advance().map(|_| ())
    }

    /// Request the next unit of narrative.
    ///
    /// Shows the next line and the choices that follow it, or the pending
    /// choices if there is no line, or starts the exit cooldown when the
    /// script has nothing left. Does nothing while a choice set is waiting
    /// for a selection.
    pub fn advance(&mut self) -> CoreResult<AdvanceOutcome> {
        if self.state != SessionState::Active {
            return Ok(AdvanceOutcome::Ignored);
        }
        if self.awaiting_choice() {
            return Ok(AdvanceOutcome::AwaitingChoice);
        }

        let step = match self.interpreter.as_mut() {
            None => return Ok(AdvanceOutcome::Ignored),
            Some(interpreter) if interpreter.can_continue() => interpreter
                .continue_story()
                .map(|line| (Some(line), interpreter.current_choices())),
            Some(interpreter) => Ok((None, interpreter.current_choices())),
        };

        match step {
            Err(e) => {
                self.begin_exit();
                Err(CoreError::Interpreter(Box::new(e)))
            }
            Ok((Some(line), choices)) => {
                self.surface.set_text(&line);
                self.present(choices);
                Ok(AdvanceOutcome::Line)
            }
            Ok((None, choices)) if choices.is_empty() => {
                self.begin_exit();
                Ok(AdvanceOutcome::Exiting)
            }
            Ok((None, choices)) => {
                self.present(choices);
                Ok(AdvanceOutcome::Choices)
            }
        }
    }

    /// Commit to the displayed choice at `index` and continue the story.
    ///
    /// Only ordinals of enabled slots are accepted. Anything else is
    /// rejected with [`CoreError::InvalidChoiceIndex`] and changes nothing.
    pub fn select_choice(&mut self, index: usize) -> CoreResult<()> {
        let on_display = self.state == SessionState::Active
            && index < self.choices.len()
            && self.presenter.is_enabled(index);
        let interpreter = match self.interpreter.as_mut() {
            Some(interpreter) if on_display => interpreter,
            _ => {
                let available = if self.state == SessionState::Active {
                    self.presenter.enabled_count().min(self.choices.len())
                } else {
                    0
                };
                warn!(index, available, "rejected selection of a choice not on display");
                debug_assert!(
                    !self.config.strict_choice_index,
                    "choice {index} selected with {available} on display"
                );
                return Err(CoreError::InvalidChoiceIndex { index, available });
            }
        };

        interpreter
            .choose_index(index)
            .map_err(|e| CoreError::Interpreter(Box::new(e)))?;

        let chosen = std::mem::take(&mut self.choices);
        if let Some(cue) = self.cues.resolve(index, &chosen[index]) {
            debug!(index, %cue, "firing choice cue");
            self.surface.trigger_cue(cue);
        }

        self.focus.cancel();
        self.set_container_visible(false);
        self.selected_since_tick = true;
        self.advance().map(|_| ())
    }

    /// Run one frame that took `dt`.
    ///
    /// Resumes the pending focus set and exit cooldown when due, then polls
    /// `input` once. An advance signal is acted on only while active with no
    /// choice waiting, and is swallowed if a selection was made since the
    /// previous tick.
    pub fn tick(&mut self, input: &mut impl InputSource, dt: Duration) -> CoreResult<()> {
        self.clock.advance(dt);

        if let Err(e) = self.focus.resume(
            &mut self.surface,
            &self.presenter,
            self.generation,
            &self.clock,
            self.container_visible,
        ) {
            self.reports.push(e);
        }
        self.resume_exit();

        let requested = input.advance_requested();
        let selected = std::mem::take(&mut self.selected_since_tick);
        if requested
            && !selected
            && self.state == SessionState::Active
            && !self.awaiting_choice()
        {
            self.advance()?;
        }
        Ok(())
    }

    /// End the dialogue immediately, skipping the cooldown.
    pub fn abort(&mut self) {
        if self.state != SessionState::Inactive {
            info!(generation = self.generation.value(), "dialogue aborted");
            self.finish();
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether dialogue owns input, including during the exit cooldown.
    pub fn is_playing(&self) -> bool {
        self.state != SessionState::Inactive
    }

    /// Whether a displayed choice set is waiting for a selection.
    pub fn awaiting_choice(&self) -> bool {
        !self.choices.is_empty()
    }

    /// The choice set currently on display.
    pub fn current_choices(&self) -> &[ChoiceOption] {
        &self.choices
    }

    /// Whether an interpreter is alive.
    pub fn has_interpreter(&self) -> bool {
        self.interpreter.is_some()
    }

    /// Whether the exit cooldown is running.
    pub fn exit_pending(&self) -> bool {
        self.exit.is_some()
    }

    /// Whether a focus set is waiting for the next frame.
    pub fn focus_pending(&self) -> bool {
        self.focus.is_pending()
    }

    /// Generation of the current (or most recent) session run.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The slot projection.
    pub fn presenter(&self) -> &ChoicePresenter {
        &self.presenter
    }

    /// The frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The presentation surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the presentation surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Take the non-fatal problems reported since the last drain.
    pub fn drain_reports(&mut self) -> Vec<CoreError> {
        std::mem::take(&mut self.reports)
    }

    fn present(&mut self, choices: Vec<ChoiceOption>) {
        if !choices.is_empty() {
            self.set_container_visible(true);
        }
        if let Err(e) = self.presenter.display(&mut self.surface, &choices) {
            self.reports.push(e);
        }
        self.focus.assert_first_choice_focus(&mut self.surface, self.generation, &self.clock);
        self.choices = choices;
    }

    fn set_container_visible(&mut self, visible: bool) {
        self.container_visible = visible;
        self.surface.set_choice_container_visible(visible);
    }

    fn begin_exit(&mut self) {
        self.state = SessionState::Exiting;
        self.exit = Some(Deferred::after(
            self.generation,
            &self.clock,
            self.config.exit_delay,
        ));
        info!(
            generation = self.generation.value(),
            delay = ?self.config.exit_delay,
            "script exhausted, leaving dialogue mode"
        );
    }

    fn resume_exit(&mut self) {
        let Some(step) = self.exit else {
            return;
        };
        if !step.is_due(&self.clock) {
            return;
        }
        self.exit = None;

        if !step.is_current(self.generation) {
            debug!(
                scheduled = step.generation().value(),
                current = self.generation.value(),
                "dropping stale exit"
            );
            self.reports.push(CoreError::StaleResumption {
                scheduled: step.generation(),
                current: self.generation,
            });
            return;
        }

        info!(generation = self.generation.value(), "dialogue finished");
        self.finish();
    }

    fn finish(&mut self) {
        self.teardown();
        self.surface.set_panel_visible(false);
        self.surface.set_text("");
        self.set_container_visible(false);
    }

    /// Drop the interpreter and invalidate every deferred step.
    fn teardown(&mut self) {
        self.generation = self.generation.next();
        self.exit = None;
        self.focus.cancel();
        self.interpreter = None;
        self.choices.clear();
        self.presenter.clear(&mut self.surface);
        self.selected_since_tick = false;
        self.state = SessionState::Inactive;
    }
}
