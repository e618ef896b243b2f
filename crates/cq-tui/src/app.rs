//! Play view state: one dialogue session plus key handling.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cq_core::{CoreError, CueMap, DialogueSession, SessionState};
use cq_script::StoryLoader;
use tracing::{info, warn};

use crate::config::TuiConfig;
use crate::surface::TerminalSurface;

/// Application state for `colloquy play`.
pub struct PlayApp {
    /// The running session.
    pub session: DialogueSession<StoryLoader, TerminalSurface>,
    /// Title shown in the panel border.
    pub title: String,
    /// Last error, shown in the status bar until the next key.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    source: String,
    cues: CueMap,
    advance: bool,
}

impl PlayApp {
    /// Build the app and enter the story.
    pub fn new(source: String, title: String, config: &TuiConfig) -> Result<Self, String> {
        config.validate()?;
        let cues = config.cue_map()?;
        let session = DialogueSession::new(
            StoryLoader,
            TerminalSurface::new(config.slots),
            config.session_config().with_strict_choice_index(false),
        );
        let mut app = Self {
            session,
            title,
            status: None,
            should_quit: false,
            source,
            cues,
            advance: false,
        };
        app.start().map_err(|e| e.to_string())?;
        Ok(app)
    }

    /// (Re)enter the story from the top.
    pub fn start(&mut self) -> Result<(), CoreError> {
        self.session
            .enter_dialogue_mode(&self.source, self.cues.clone())
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        self.status = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char(' ') => self.confirm(),
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(1),
            KeyCode::Char(c) => {
                if let Some(n) = c.to_digit(10)
                    && (1..=9).contains(&n)
                {
                    self.choose(n as usize - 1);
                }
            }
            _ => {}
        }
    }

    /// Advance the session by one frame.
    pub fn tick(&mut self, dt: Duration) {
        if let Err(e) = self.session.tick(&mut self.advance, dt) {
            warn!(error = %e, "tick failed");
            self.status = Some(e.to_string());
        }
        for report in self.session.drain_reports() {
            if !matches!(report, CoreError::StaleResumption { .. }) {
                self.status = Some(report.to_string());
            }
        }
        self.session.surface_mut().decay_flash();
    }

    /// Key hints for the status bar.
    pub fn status_hint(&self) -> &'static str {
        match self.session.state() {
            SessionState::Inactive => " Enter: play again | q: quit",
            _ if self.session.awaiting_choice() => {
                " Up/Down: move | Enter: choose | 1-9: pick | q: quit"
            }
            SessionState::Active => " Enter/Space: continue | q: quit",
            SessionState::Exiting => " ... | q: quit",
        }
    }

    fn confirm(&mut self) {
        match self.session.state() {
            SessionState::Inactive => {
                info!("replaying story");
                if let Err(e) = self.start() {
                    self.status = Some(e.to_string());
                }
            }
            SessionState::Active if self.session.awaiting_choice() => {
                if let Some(focused) = self.session.surface().focus() {
                    self.choose(focused);
                }
            }
            SessionState::Active => self.advance = true,
            SessionState::Exiting => {}
        }
    }

    fn move_focus(&mut self, direction: isize) {
        if self.session.awaiting_choice() && !self.session.focus_pending() {
            self.session.surface_mut().move_focus(direction);
        }
    }

    fn choose(&mut self, index: usize) {
        if !self.session.awaiting_choice() {
            return;
        }
        if !self.session.presenter().is_enabled(index) {
            self.status = Some(format!("no choice {}", index + 1));
            return;
        }
        if let Err(e) = self.session.select_choice(index) {
            self.status = Some(e.to_string());
        }
    }
}
