//! The hook window: strike too early or too late and the fish is gone.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::{FishingState, LostReason};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookOpportunityConfig {
    /// Seconds the player has to strike.
    pub window_duration: f32,
    /// Leading part of the window where a strike counts but is penalised.
    pub early_window: f32,
}

impl Default for HookOpportunityConfig {
    fn default() -> Self {
        Self {
            window_duration: 0.8,
            early_window: 0.1,
        }
    }
}

#[derive(Debug)]
pub struct HookOpportunityState {
    window_duration: f32,
    early_window: f32,
    elapsed: f32,
    input_received: bool,
    early_input_penalty: bool,
    window_expired: bool,
}

impl HookOpportunityState {
    pub fn new(config: &HookOpportunityConfig) -> Self {
        let window_duration = sane_duration(config.window_duration);
        let early_window = if config.early_window.is_finite() {
            config.early_window.clamp(0.0, window_duration * 0.5)
        } else {
            0.0
        };
        Self {
            window_duration,
            early_window,
            elapsed: 0.0,
            input_received: false,
            early_input_penalty: false,
            window_expired: false,
        }
    }

    pub fn window_progress(&self) -> f32 {
        progress(self.elapsed, self.window_duration)
    }

    /// Seconds since the window opened.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn input_received(&self) -> bool {
        self.input_received
    }

    pub fn early_input_penalty(&self) -> bool {
        self.early_input_penalty
    }

    pub fn window_expired(&self) -> bool {
        self.window_expired
    }

    /// True while a strike would land outside the early zone.
    pub fn in_sweet_spot(&self) -> bool {
        !self.window_expired && reached(self.elapsed, self.early_window)
    }
}

impl Default for HookOpportunityState {
    fn default() -> Self {
        Self::new(&HookOpportunityConfig::default())
    }
}

impl FishingPhaseBehaviour for HookOpportunityState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.elapsed = 0.0;
        self.input_received = false;
        self.early_input_penalty = false;
        self.window_expired = false;
    }

    fn update(&mut self, ctx: &mut dyn FishingContext, dt: f32) {
        if self.input_received || self.window_expired {
            return;
        }
        self.elapsed += dt;

        // The cast edge doubles as the hook action.
        if ctx.cast_input_pressed() {
            self.input_received = true;
            self.early_input_penalty = !reached(self.elapsed, self.early_window);
            if self.early_input_penalty {
                debug!("[Fishing] Struck {:.2}s into the window: too early", self.elapsed);
            } else {
                info!("[Fishing] Hook set after {:.2}s", self.elapsed);
            }
        } else if reached(self.elapsed, self.window_duration) {
            self.window_expired = true;
            debug!("[Fishing] Hook window closed without a strike");
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.input_received = false;
        self.early_input_penalty = false;
        self.window_expired = false;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.window_expired || (self.input_received && self.early_input_penalty) {
            Transition::To(FishingState::Lost)
        } else if self.input_received {
            Transition::To(FishingState::Hooked)
        } else {
            Transition::Pending
        }
    }

    fn loss_reason(&self) -> Option<LostReason> {
        if self.window_expired {
            Some(LostReason::MissedHook)
        } else if self.input_received && self.early_input_penalty {
            Some(LostReason::EarlyHook)
        } else {
            None
        }
    }
}
