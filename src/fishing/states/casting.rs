//! The lure flies out; the landing spot is rolled once on entry.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::FishingState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastingConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Seconds the cast animation takes.
    pub cast_duration: f32,
}

impl Default for CastingConfig {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 8.0,
            cast_duration: 0.5,
        }
    }
}

#[derive(Debug)]
pub struct CastingState {
    min_distance: f32,
    max_distance: f32,
    cast_duration: f32,
    elapsed: f32,
    complete: bool,
    cast_distance: f32,
    cast_angle_degrees: f32,
    landing_position: Vec2,
}

impl CastingState {
    pub fn new(config: &CastingConfig) -> Self {
        let min_distance = if config.min_distance.is_finite() {
            config.min_distance.max(0.0)
        } else {
            0.0
        };
        let max_distance = if config.max_distance.is_finite() {
            config.max_distance.max(min_distance)
        } else {
            min_distance
        };
        Self {
            min_distance,
            max_distance,
            cast_duration: sane_duration(config.cast_duration),
            elapsed: 0.0,
            complete: false,
            cast_distance: 0.0,
            cast_angle_degrees: 0.0,
            landing_position: Vec2::ZERO,
        }
    }

    pub fn cast_progress(&self) -> f32 {
        progress(self.elapsed, self.cast_duration)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn cast_distance(&self) -> f32 {
        self.cast_distance
    }

    pub fn cast_angle_degrees(&self) -> f32 {
        self.cast_angle_degrees
    }

    /// Where the lure comes down. Stays valid after `exit` for the drift phase.
    pub fn landing_position(&self) -> Vec2 {
        self.landing_position
    }
}

impl Default for CastingState {
    fn default() -> Self {
        Self::new(&CastingConfig::default())
    }
}

impl FishingPhaseBehaviour for CastingState {
    fn enter(&mut self, ctx: &mut dyn FishingContext) {
        self.elapsed = 0.0;
        self.complete = false;

        self.cast_distance = ctx.random_range(self.min_distance, self.max_distance);
        self.cast_angle_degrees = ctx.random_range(0.0, 360.0);
        let theta = self.cast_angle_degrees.to_radians();
        self.landing_position =
            ctx.lure_position() + self.cast_distance * Vec2::new(theta.cos(), theta.sin());

        debug!(
            "[Fishing] Cast {:.2} units at {:.0}° → landing {:?}",
            self.cast_distance, self.cast_angle_degrees, self.landing_position
        );
    }

    fn update(&mut self, _ctx: &mut dyn FishingContext, dt: f32) {
        if self.complete {
            return;
        }
        self.elapsed += dt;
        if reached(self.elapsed, self.cast_duration) {
            self.complete = true;
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.complete = false;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.complete {
            Transition::To(FishingState::LureDrift)
        } else {
            Transition::Pending
        }
    }
}
