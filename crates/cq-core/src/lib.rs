//! Dialogue session controller for Colloquy.
//!
//! Drives branching narrative text and player choices from an external
//! script interpreter onto a presentation surface. A [`DialogueSession`] owns
//! the lifecycle (inactive, active, exiting), paces advancement against
//! player input, projects choice sets onto a fixed number of slots through a
//! [`ChoicePresenter`], and moves selection focus with a
//! [`FocusCoordinator`]. Deferred steps are tagged with a [`Generation`] so
//! nothing resumes into a session that has since been replaced.

/// Choice options and presentation slots.
pub mod choice;
/// Frame clock driving deferred steps.
pub mod clock;
/// Session configuration.
pub mod config;
/// Presentation cues and the choice-to-cue map.
pub mod cue;
/// Deferred steps and generation tokens.
pub mod deferred;
/// Error types for the dialogue core.
pub mod error;
/// First-choice focus handling.
pub mod focus;
/// In-memory surface for headless playback.
pub mod headless;
/// Script loader and interpreter contracts.
pub mod interpreter;
/// Choice set projection onto slots.
pub mod presenter;
/// Session lifecycle and protocol.
pub mod session;
/// Presentation, focus, and input contracts.
pub mod surface;

pub use choice::{ChoiceOption, ChoiceSlot};
pub use clock::FrameClock;
pub use config::SessionConfig;
pub use cue::{Cue, CueMap};
pub use deferred::Generation;
pub use error::{BoxError, CoreError, CoreResult};
pub use focus::FocusCoordinator;
pub use headless::{HeadlessSurface, SurfaceEvent};
pub use interpreter::{Interpreter, ScriptLoader};
pub use presenter::ChoicePresenter;
pub use session::{AdvanceOutcome, DialogueSession, SessionState};
pub use surface::{FocusTarget, InputSource, Surface};
