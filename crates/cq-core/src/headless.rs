//! A surface that keeps presentation state in memory.
//!
//! Used for transcript playback and for asserting the order of surface calls.

use crate::cue::Cue;
use crate::surface::{FocusTarget, Surface};

/// A single call made on a [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Panel shown or hidden.
    PanelVisible(bool),
    /// Dialogue text replaced.
    Text(String),
    /// Choice container shown or hidden.
    ContainerVisible(bool),
    /// Slot shown or hidden.
    SlotVisible(usize, bool),
    /// Slot text replaced.
    SlotText(usize, String),
    /// Focus cleared.
    FocusCleared,
    /// Focus moved to a slot.
    Focused(usize),
    /// Cue fired.
    Cue(Cue),
}

/// Visible state of one choice widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotView {
    /// Whether the widget is shown.
    pub visible: bool,
    /// Text on the widget.
    pub text: String,
}

/// In-memory [`Surface`] and [`FocusTarget`].
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    panel_visible: bool,
    text: String,
    container_visible: bool,
    slots: Vec<SlotView>,
    focus: Option<usize>,
    cues: Vec<Cue>,
    events: Vec<SurfaceEvent>,
}

impl HeadlessSurface {
    /// Create a hidden surface with `slot_count` choice widgets.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![SlotView::default(); slot_count],
            ..Self::default()
        }
    }

    /// Whether the panel is shown.
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Current dialogue text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the choice container is shown.
    pub fn container_visible(&self) -> bool {
        self.container_visible
    }

    /// Choice widgets in ordinal order.
    pub fn slots(&self) -> &[SlotView] {
        &self.slots
    }

    /// Texts of the visible choice widgets, in ordinal order.
    pub fn visible_choices(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Ordinal of the focused widget.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Every cue fired so far.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Take the calls recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Surface for HeadlessSurface {
    fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
        self.events.push(SurfaceEvent::PanelVisible(visible));
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.events.push(SurfaceEvent::Text(text.to_string()));
    }

    fn set_choice_container_visible(&mut self, visible: bool) {
        self.container_visible = visible;
        self.events.push(SurfaceEvent::ContainerVisible(visible));
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn set_slot_visible(&mut self, ordinal: usize, visible: bool) {
        if let Some(slot) = self.slots.get_mut(ordinal) {
            slot.visible = visible;
            self.events.push(SurfaceEvent::SlotVisible(ordinal, visible));
        }
    }

    fn set_slot_text(&mut self, ordinal: usize, text: &str) {
        if let Some(slot) = self.slots.get_mut(ordinal) {
            slot.text = text.to_string();
            self.events.push(SurfaceEvent::SlotText(ordinal, text.to_string()));
        }
    }

    fn trigger_cue(&mut self, cue: &Cue) {
        self.cues.push(cue.clone());
        self.events.push(SurfaceEvent::Cue(cue.clone()));
    }
}

impl FocusTarget for HeadlessSurface {
    fn clear_focus(&mut self) {
        self.focus = None;
        self.events.push(SurfaceEvent::FocusCleared);
    }

    fn set_focus(&mut self, ordinal: usize) {
        self.focus = Some(ordinal);
        self.events.push(SurfaceEvent::Focused(ordinal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut surface = HeadlessSurface::new(2);
        surface.set_panel_visible(true);
        surface.set_text("Hello");
        surface.set_slot_visible(1, true);
        surface.set_slot_text(1, "Bye");
        surface.clear_focus();
        surface.set_focus(1);

        assert!(surface.panel_visible());
        assert_eq!(surface.text(), "Hello");
        assert_eq!(surface.visible_choices(), vec!["Bye"]);
        assert_eq!(surface.focus(), Some(1));
        assert_eq!(
            surface.drain_events(),
            vec![
                SurfaceEvent::PanelVisible(true),
                SurfaceEvent::Text("Hello".to_string()),
                SurfaceEvent::SlotVisible(1, true),
                SurfaceEvent::SlotText(1, "Bye".to_string()),
                SurfaceEvent::FocusCleared,
                SurfaceEvent::Focused(1),
            ]
        );
        assert!(surface.drain_events().is_empty());
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut surface = HeadlessSurface::new(1);
        surface.set_slot_visible(5, true);
        surface.set_slot_text(5, "nope");
        assert!(surface.drain_events().is_empty());
        assert_eq!(surface.slot_count(), 1);
    }
}
