//! A short twitch of the lure before settling back into stillness.

use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::FishingState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroTwitchConfig {
    pub twitch_duration: f32,
}

impl Default for MicroTwitchConfig {
    fn default() -> Self {
        Self {
            twitch_duration: 0.2,
        }
    }
}

/// Timing gate only. Twitches do not yet feed into the bite roll.
#[derive(Debug)]
pub struct MicroTwitchState {
    duration: f32,
    elapsed: f32,
    complete: bool,
}

impl MicroTwitchState {
    pub fn new(config: &MicroTwitchConfig) -> Self {
        Self {
            duration: sane_duration(config.twitch_duration),
            elapsed: 0.0,
            complete: false,
        }
    }

    pub fn twitch_progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl Default for MicroTwitchState {
    fn default() -> Self {
        Self::new(&MicroTwitchConfig::default())
    }
}

impl FishingPhaseBehaviour for MicroTwitchState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.elapsed = 0.0;
        self.complete = false;
    }

    fn update(&mut self, _ctx: &mut dyn FishingContext, dt: f32) {
        if self.complete {
            return;
        }
        self.elapsed += dt;
        if reached(self.elapsed, self.duration) {
            self.complete = true;
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.complete = false;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.complete {
            Transition::To(FishingState::Stillness)
        } else {
            Transition::Pending
        }
    }
}
