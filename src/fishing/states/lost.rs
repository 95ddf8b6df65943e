//! Result display after the fish got away.

use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::{FishingState, LostReason};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LostConfig {
    pub display_duration: f32,
}

impl Default for LostConfig {
    fn default() -> Self {
        Self {
            display_duration: 1.5,
        }
    }
}

#[derive(Debug)]
pub struct LostState {
    display_duration: f32,
    elapsed: f32,
    complete: bool,
    event_ready: bool,
    reason: LostReason,
}

impl LostState {
    pub fn new(config: &LostConfig) -> Self {
        Self {
            display_duration: sane_duration(config.display_duration),
            elapsed: 0.0,
            complete: false,
            event_ready: false,
            reason: LostReason::Unknown,
        }
    }

    /// Must be called before `enter`; `enter` keeps the reason.
    pub fn set_reason(&mut self, reason: LostReason) {
        self.reason = reason;
    }

    pub fn reason(&self) -> LostReason {
        self.reason
    }

    /// One-shot: the game should publish a fish-lost event now.
    pub fn event_ready(&self) -> bool {
        self.event_ready
    }

    pub fn clear_event_ready(&mut self) {
        self.event_ready = false;
    }

    pub fn display_progress(&self) -> f32 {
        progress(self.elapsed, self.display_duration)
    }
}

impl Default for LostState {
    fn default() -> Self {
        Self::new(&LostConfig::default())
    }
}

impl FishingPhaseBehaviour for LostState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.elapsed = 0.0;
        self.complete = false;
        self.event_ready = true;
    }

    fn update(&mut self, _ctx: &mut dyn FishingContext, dt: f32) {
        if self.complete {
            return;
        }
        self.elapsed += dt;
        if reached(self.elapsed, self.display_duration) {
            self.complete = true;
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.complete = false;
        self.event_ready = false;
        self.reason = LostReason::Unknown;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.complete {
            Transition::To(FishingState::Idle)
        } else {
            Transition::Pending
        }
    }
}
