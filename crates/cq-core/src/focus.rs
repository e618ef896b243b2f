//! First-choice focus with a one-frame gap between clear and set.

use tracing::debug;

use crate::clock::FrameClock;
use crate::deferred::{Deferred, Generation};
use crate::error::{CoreError, CoreResult};
use crate::presenter::ChoicePresenter;
use crate::surface::FocusTarget;

/// Puts focus on the first choice slot after each choice presentation.
///
/// The focus mechanism needs a clear and the following set to land in
/// different frames. At most one set is pending; a newer request replaces it.
#[derive(Debug, Clone, Default)]
pub struct FocusCoordinator {
    pending: Option<Deferred>,
}

impl FocusCoordinator {
    /// Create a coordinator with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a focus set is waiting for the next frame.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Clear focus now and schedule focusing slot 0 for the next frame.
    pub fn assert_first_choice_focus(
        &mut self,
        focus: &mut impl FocusTarget,
        generation: Generation,
        clock: &FrameClock,
    ) {
        focus.clear_focus();
        self.pending = Some(Deferred::next_frame(generation, clock));
    }

    /// Run the pending focus set if it is due.
    ///
    /// Focus only lands when the step still belongs to `generation`, the
    /// choice container is visible, and slot 0 is enabled. A step from an
    /// older generation is dropped with [`CoreError::StaleResumption`].
    pub fn resume(
        &mut self,
        focus: &mut impl FocusTarget,
        presenter: &ChoicePresenter,
        generation: Generation,
        clock: &FrameClock,
        container_visible: bool,
    ) -> CoreResult<()> {
        let Some(step) = self.pending else {
            return Ok(());
        };
        if !step.is_due(clock) {
            return Ok(());
        }
        self.pending = None;

        if !step.is_current(generation) {
            debug!(
                scheduled = step.generation().value(),
                current = generation.value(),
                "dropping stale focus request"
            );
            return Err(CoreError::StaleResumption {
                scheduled: step.generation(),
                current: generation,
            });
        }

        if container_visible && presenter.is_enabled(0) {
            focus.set_focus(0);
        }
        Ok(())
    }

    /// Drop any pending focus set.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
