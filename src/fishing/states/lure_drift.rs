//! Default lure-drift phase: the lure settles on the water, then stillness.
//!
//! The drift phase belongs to the surrounding game and can be swapped for any
//! [`FishingPhaseBehaviour`] through [`crate::fishing::FishingMachine::with_lure_drift`].

use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::FishingState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LureDriftConfig {
    pub settle_duration: f32,
}

impl Default for LureDriftConfig {
    fn default() -> Self {
        Self {
            settle_duration: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct SettleDrift {
    duration: f32,
    elapsed: f32,
    settled: bool,
}

impl SettleDrift {
    pub fn new(config: &LureDriftConfig) -> Self {
        Self {
            duration: sane_duration(config.settle_duration),
            elapsed: 0.0,
            settled: false,
        }
    }

    pub fn settle_progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }
}

impl Default for SettleDrift {
    fn default() -> Self {
        Self::new(&LureDriftConfig::default())
    }
}

impl FishingPhaseBehaviour for SettleDrift {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.elapsed = 0.0;
        self.settled = false;
    }

    fn update(&mut self, _ctx: &mut dyn FishingContext, dt: f32) {
        if self.settled {
            return;
        }
        self.elapsed += dt;
        if reached(self.elapsed, self.duration) {
            self.settled = true;
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.settled = false;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.settled {
            Transition::To(FishingState::Stillness)
        } else {
            Transition::Pending
        }
    }
}
