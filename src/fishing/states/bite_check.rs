//! One roll to decide whether a fish takes the lure.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    clamp01, progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::FishingState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiteCheckConfig {
    /// Chance of a bite before the context modifier is applied.
    pub base_bite_probability: f32,
    /// Seconds after entry at which the roll happens.
    pub check_duration: f32,
    /// Seconds after entry at which the check gives up.
    pub timeout: f32,
    /// After a miss, chance the fish stays curious and we wait again.
    pub stillness_return_chance: f32,
}

impl Default for BiteCheckConfig {
    fn default() -> Self {
        Self {
            base_bite_probability: 0.35,
            check_duration: 0.5,
            timeout: 5.0,
            stillness_return_chance: 0.6,
        }
    }
}

#[derive(Debug)]
pub struct BiteCheckState {
    base_bite_probability: f32,
    check_duration: f32,
    timeout: f32,
    stillness_return_chance: f32,
    elapsed: f32,
    check_performed: bool,
    bite_occurred: bool,
    return_to_stillness: bool,
    timed_out: bool,
    final_bite_probability: f32,
}

impl BiteCheckState {
    pub fn new(config: &BiteCheckConfig) -> Self {
        let check_duration = sane_duration(config.check_duration);
        Self {
            base_bite_probability: clamp01(config.base_bite_probability),
            check_duration,
            timeout: sane_duration(config.timeout).max(check_duration),
            stillness_return_chance: clamp01(config.stillness_return_chance),
            elapsed: 0.0,
            check_performed: false,
            bite_occurred: false,
            return_to_stillness: false,
            timed_out: false,
            final_bite_probability: 0.0,
        }
    }

    pub fn check_progress(&self) -> f32 {
        progress(self.elapsed, self.check_duration)
    }

    pub fn check_performed(&self) -> bool {
        self.check_performed
    }

    pub fn bite_occurred(&self) -> bool {
        self.bite_occurred
    }

    pub fn has_timed_out(&self) -> bool {
        self.timed_out
    }

    /// Chance used by the last roll, after the context modifier.
    pub fn final_bite_probability(&self) -> f32 {
        self.final_bite_probability
    }

    fn roll(&mut self, ctx: &mut dyn FishingContext) {
        self.check_performed = true;
        self.final_bite_probability =
            clamp01(self.base_bite_probability * (1.0 + ctx.bite_probability_modifier()));

        self.bite_occurred = ctx.random_value() < self.final_bite_probability;
        if self.bite_occurred {
            info!(
                "[Fishing] Bite! (chance {:.0}%)",
                self.final_bite_probability * 100.0
            );
            return;
        }

        // Second, independent draw: was the fish curious enough to come back?
        self.return_to_stillness = ctx.random_value() < self.stillness_return_chance;
        debug!(
            "[Fishing] No bite (chance {:.0}%), {}",
            self.final_bite_probability * 100.0,
            if self.return_to_stillness {
                "fish still circling"
            } else {
                "fish lost interest"
            }
        );
    }
}

impl Default for BiteCheckState {
    fn default() -> Self {
        Self::new(&BiteCheckConfig::default())
    }
}

impl FishingPhaseBehaviour for BiteCheckState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.elapsed = 0.0;
        self.check_performed = false;
        self.bite_occurred = false;
        self.return_to_stillness = false;
        self.timed_out = false;
        self.final_bite_probability = 0.0;
    }

    fn update(&mut self, ctx: &mut dyn FishingContext, dt: f32) {
        if self.timed_out {
            return;
        }
        self.elapsed += dt;

        // Timeout overrides any result, even one already rolled.
        if reached(self.elapsed, self.timeout) {
            self.timed_out = true;
            return;
        }

        if !self.check_performed && reached(self.elapsed, self.check_duration) {
            self.roll(ctx);
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.check_performed = false;
        self.timed_out = false;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.timed_out {
            return Transition::To(FishingState::Idle);
        }
        if !self.check_performed {
            return Transition::Pending;
        }
        if self.bite_occurred {
            Transition::To(FishingState::HookOpportunity)
        } else if self.return_to_stillness {
            Transition::To(FishingState::Stillness)
        } else {
            Transition::To(FishingState::Idle)
        }
    }
}
