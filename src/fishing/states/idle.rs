//! Waiting for the player to cast.

use crate::fishing::context::FishingContext;
use crate::fishing::state::{FishingPhaseBehaviour, Transition};
use crate::shared::FishingState;

#[derive(Debug, Default)]
pub struct IdleState {
    cast_requested: bool,
}

impl IdleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cast_requested(&self) -> bool {
        self.cast_requested
    }
}

impl FishingPhaseBehaviour for IdleState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.cast_requested = false;
    }

    fn update(&mut self, ctx: &mut dyn FishingContext, _dt: f32) {
        // Latched: a later frame without input must not undo the decision.
        if ctx.cast_input_pressed() {
            self.cast_requested = true;
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.cast_requested = false;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.cast_requested {
            Transition::To(FishingState::Casting)
        } else {
            Transition::Pending
        }
    }
}
