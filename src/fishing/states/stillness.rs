//! Holding the lure still. Staying patient long enough earns a bite check.

use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::FishingState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StillnessConfig {
    /// Seconds of stillness before a bite check runs.
    pub stillness_threshold: f32,
}

impl Default for StillnessConfig {
    fn default() -> Self {
        Self {
            stillness_threshold: 3.0,
        }
    }
}

#[derive(Debug)]
pub struct StillnessState {
    threshold: f32,
    elapsed: f32,
    threshold_reached: bool,
    micro_twitch_requested: bool,
}

impl StillnessState {
    pub fn new(config: &StillnessConfig) -> Self {
        Self {
            threshold: sane_duration(config.stillness_threshold),
            elapsed: 0.0,
            threshold_reached: false,
            micro_twitch_requested: false,
        }
    }

    pub fn stillness_progress(&self) -> f32 {
        progress(self.elapsed, self.threshold)
    }

    pub fn threshold_reached(&self) -> bool {
        self.threshold_reached
    }

    pub fn micro_twitch_requested(&self) -> bool {
        self.micro_twitch_requested
    }

    fn resolved(&self) -> bool {
        self.threshold_reached || self.micro_twitch_requested
    }
}

impl Default for StillnessState {
    fn default() -> Self {
        Self::new(&StillnessConfig::default())
    }
}

impl FishingPhaseBehaviour for StillnessState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.elapsed = 0.0;
        self.threshold_reached = false;
        self.micro_twitch_requested = false;
    }

    fn update(&mut self, ctx: &mut dyn FishingContext, dt: f32) {
        if self.resolved() {
            return;
        }
        self.elapsed += dt;
        // The cast edge doubles as the twitch action until analog input exists.
        if ctx.cast_input_pressed() {
            self.micro_twitch_requested = true;
        }
        if reached(self.elapsed, self.threshold) {
            self.threshold_reached = true;
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.threshold_reached = false;
        self.micro_twitch_requested = false;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.micro_twitch_requested {
            Transition::To(FishingState::MicroTwitch)
        } else if self.threshold_reached {
            Transition::To(FishingState::BiteCheck)
        } else {
            Transition::Pending
        }
    }
}
