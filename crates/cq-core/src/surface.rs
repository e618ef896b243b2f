//! Presentation, focus, and input contracts.

use crate::cue::Cue;

/// The presentation surface a session draws on.
///
/// Slot ordinals run from 0 to `slot_count() - 1`. The surface reports
/// activation by having its owner call
/// [`crate::DialogueSession::select_choice`] with the activated ordinal.
pub trait Surface {
    /// Show or hide the dialogue panel.
    fn set_panel_visible(&mut self, visible: bool);

    /// Replace the displayed dialogue text.
    fn set_text(&mut self, text: &str);

    /// Show or hide the container holding the choice widgets.
    fn set_choice_container_visible(&mut self, visible: bool);

    /// Number of choice widgets. Fixed for the surface's lifetime.
    fn slot_count(&self) -> usize;

    /// Show or hide the choice widget at `ordinal`.
    fn set_slot_visible(&mut self, ordinal: usize, visible: bool);

    /// Set the text of the choice widget at `ordinal`.
    fn set_slot_text(&mut self, ordinal: usize, text: &str);

    /// Play a named presentation cue. Surfaces without cues ignore it.
    fn trigger_cue(&mut self, _cue: &Cue) {}
}

/// The UI selection-focus mechanism.
///
/// Both calls are synchronous. A clear and the following set must be one
/// tick apart; [`crate::FocusCoordinator`] enforces that.
pub trait FocusTarget {
    /// Remove focus from whatever holds it.
    fn clear_focus(&mut self);

    /// Focus the choice widget at `ordinal`.
    fn set_focus(&mut self, ordinal: usize);
}

/// A discrete "advance" signal, polled once per tick.
pub trait InputSource {
    /// Whether an advance was requested since the last poll.
    fn advance_requested(&mut self) -> bool;
}

impl InputSource for bool {
    fn advance_requested(&mut self) -> bool {
        std::mem::take(self)
    }
}
