//! Retained state the play view renders from.

use cq_core::headless::SlotView;
use cq_core::{Cue, FocusTarget, Surface};

/// Number of ticks a fired cue stays in the status bar.
pub const CUE_FLASH_TICKS: u32 = 45;

/// A [`Surface`] backed by plain fields, drawn each frame by the terminal loop.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    panel_visible: bool,
    text: String,
    container_visible: bool,
    slots: Vec<SlotView>,
    focus: Option<usize>,
    flash: Option<(Cue, u32)>,
}

impl TerminalSurface {
    /// Create a hidden surface with `slot_count` choice rows.
    pub fn new(slot_count: usize) -> Self {
        Self {
            panel_visible: false,
            text: String::new(),
            container_visible: false,
            slots: vec![SlotView::default(); slot_count],
            focus: None,
            flash: None,
        }
    }

    /// Whether the dialogue panel is shown.
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Current dialogue text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether choice rows should be drawn.
    pub fn container_visible(&self) -> bool {
        self.container_visible
    }

    /// All choice rows.
    pub fn slots(&self) -> &[SlotView] {
        &self.slots
    }

    /// Focused row, if any.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Cue currently flashing.
    pub fn flashing_cue(&self) -> Option<&Cue> {
        self.flash.as_ref().map(|(cue, _)| cue)
    }

    /// Count down the cue flash by one tick.
    pub fn decay_flash(&mut self) {
        if let Some((_, ticks)) = self.flash.as_mut() {
            *ticks = ticks.saturating_sub(1);
            if *ticks == 0 {
                self.flash = None;
            }
        }
    }

    /// Move focus to the next visible row in `direction` (negative is up).
    ///
    /// Does nothing while no row is focused. Wraps around.
    pub fn move_focus(&mut self, direction: isize) {
        let Some(current) = self.focus else {
            return;
        };
        let visible: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visible)
            .map(|(i, _)| i)
            .collect();
        let Some(pos) = visible.iter().position(|&i| i == current) else {
            return;
        };
        let len = visible.len() as isize;
        let next = (pos as isize + direction).rem_euclid(len) as usize;
        self.focus = Some(visible[next]);
    }
}

impl Surface for TerminalSurface {
    fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_choice_container_visible(&mut self, visible: bool) {
        self.container_visible = visible;
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn set_slot_visible(&mut self, ordinal: usize, visible: bool) {
        if let Some(slot) = self.slots.get_mut(ordinal) {
            slot.visible = visible;
        }
    }

    fn set_slot_text(&mut self, ordinal: usize, text: &str) {
        if let Some(slot) = self.slots.get_mut(ordinal) {
            slot.text = text.to_string();
        }
    }

    fn trigger_cue(&mut self, cue: &Cue) {
        self.flash = Some((cue.clone(), CUE_FLASH_TICKS));
    }
}

impl FocusTarget for TerminalSurface {
    fn clear_focus(&mut self) {
        self.focus = None;
    }

    fn set_focus(&mut self, ordinal: usize) {
        if ordinal < self.slots.len() {
            self.focus = Some(ordinal);
        }
    }
}
