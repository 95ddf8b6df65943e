//! The read-only view every fishing state polls while it runs.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shared::{FishingInput, FishingModifiers};

/// Signals and modifiers owned by the surrounding game.
///
/// States never write gameplay data back through this trait. The only `&mut`
/// methods are the random draws, which advance the game's generator.
pub trait FishingContext {
    /// Uniform value in `[0, 1)`.
    fn random_value(&mut self) -> f32;
    /// Uniform value in `[min, max)`. Returns `min` when the range is empty.
    fn random_range(&mut self, min: f32, max: f32) -> f32;
    /// True only on the frame the cast/hook action was pressed.
    fn cast_input_pressed(&self) -> bool;
    /// True for as long as the reel action is held.
    fn reel_input_held(&self) -> bool;
    fn bite_probability_modifier(&self) -> f32;
    fn fish_struggle_intensity(&self) -> f32;
    fn lure_position(&self) -> Vec2;
}

/// Seedable generator shared by every draw the encounter makes.
#[derive(Resource)]
pub struct FishingRng(pub StdRng);

impl FishingRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for FishingRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// A [`FishingContext`] assembled from the game's resources for one frame.
pub struct FrameContext<'a> {
    pub input: &'a FishingInput,
    pub modifiers: &'a FishingModifiers,
    pub rng: &'a mut StdRng,
}

impl FishingContext for FrameContext<'_> {
    fn random_value(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    fn cast_input_pressed(&self) -> bool {
        self.input.cast_pressed
    }

    fn reel_input_held(&self) -> bool {
        self.input.reel_held
    }

    fn bite_probability_modifier(&self) -> f32 {
        self.modifiers.bite_probability_modifier
    }

    fn fish_struggle_intensity(&self) -> f32 {
        self.modifiers.fish_struggle_intensity
    }

    fn lure_position(&self) -> Vec2 {
        self.modifiers.lure_position
    }
}
