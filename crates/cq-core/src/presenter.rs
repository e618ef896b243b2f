//! Projection of choice sets onto fixed presentation slots.

use tracing::error;

use crate::choice::{ChoiceOption, ChoiceSlot};
use crate::error::{CoreError, CoreResult};
use crate::surface::Surface;

/// Maps an unbounded choice list onto a fixed number of slots.
///
/// Slots are allocated once and reused for every choice set; only their
/// enabled flag and text change.
#[derive(Debug, Clone)]
pub struct ChoicePresenter {
    slots: Vec<ChoiceSlot>,
}

impl ChoicePresenter {
    /// Allocate `capacity` disabled slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(ChoiceSlot::new).collect(),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// All slots in ordinal order.
    pub fn slots(&self) -> &[ChoiceSlot] {
        &self.slots
    }

    /// Number of slots currently enabled.
    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.enabled).count()
    }

    /// Ordinal of the first enabled slot.
    pub fn first_enabled(&self) -> Option<usize> {
        self.slots.iter().find(|s| s.enabled).map(|s| s.ordinal)
    }

    /// Whether the slot at `ordinal` is enabled.
    pub fn is_enabled(&self, ordinal: usize) -> bool {
        self.slots.get(ordinal).is_some_and(|s| s.enabled)
    }

    /// Show `choices` on the surface.
    ///
    /// Fills the leading slots first, then hides the rest. When there are more
    /// choices than slots, the ones that fit are still shown and
    /// [`CoreError::CapacityExceeded`] is returned afterwards.
    pub fn display(
        &mut self,
        surface: &mut impl Surface,
        choices: &[ChoiceOption],
    ) -> CoreResult<()> {
        let capacity = self.capacity();
        let shown = choices.len().min(capacity);

        for (slot, choice) in self.slots.iter_mut().zip(choices) {
            slot.enabled = true;
            slot.display_text.clone_from(&choice.text);
            surface.set_slot_visible(slot.ordinal, true);
            surface.set_slot_text(slot.ordinal, &slot.display_text);
        }

        for slot in &mut self.slots[shown..] {
            slot.enabled = false;
            surface.set_slot_visible(slot.ordinal, false);
        }

        if choices.len() > capacity {
            error!(
                given = choices.len(),
                capacity,
                overflow = choices.len() - capacity,
                "more choices were given than the surface can show"
            );
            return Err(CoreError::CapacityExceeded {
                given: choices.len(),
                capacity,
            });
        }
        Ok(())
    }

    /// Hide every slot.
    pub fn clear(&mut self, surface: &mut impl Surface) {
        for slot in &mut self.slots {
            slot.enabled = false;
            surface.set_slot_visible(slot.ordinal, false);
        }
    }
}
