//! A scripted player that fishes on its own.
//!
//! Reads the machine's telemetry each frame and writes `FishingInput` the way a
//! steady human would: cast when idle, strike a moment into the hook window,
//! pump the reel between two tension marks, and let go whenever slack appears.
//! Drives the headless binary and the integration tests.

use bevy::prelude::*;

use crate::fishing::FishingMachine;
use crate::shared::*;

pub struct AutoAnglerPlugin;

impl Plugin for AutoAnglerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutoAngler>()
            .init_resource::<FishingInput>()
            .add_systems(PreUpdate, drive_auto_angler);
    }
}

#[derive(Resource, Debug, Clone)]
pub struct AutoAngler {
    /// Casts left to make; the angler stays idle at zero.
    pub casts_remaining: u32,
    /// Seconds into the hook window before striking.
    pub strike_delay: f32,
    /// Start reeling when tension falls to this fraction of max.
    pub tension_low: f32,
    /// Stop reeling when tension climbs to this fraction of max.
    pub tension_high: f32,
    /// Never strike; every bite ends in a missed hook.
    pub ignore_bites: bool,
    reeling: bool,
}

impl Default for AutoAngler {
    fn default() -> Self {
        Self {
            casts_remaining: u32::MAX,
            strike_delay: 0.3,
            tension_low: 0.4,
            tension_high: 0.7,
            ignore_bites: false,
            reeling: true,
        }
    }
}

impl AutoAngler {
    pub fn with_casts(casts: u32) -> Self {
        Self {
            casts_remaining: casts,
            ..Default::default()
        }
    }
}

pub fn drive_auto_angler(
    machine: Res<FishingMachine>,
    mut angler: ResMut<AutoAngler>,
    mut input: ResMut<FishingInput>,
) {
    *input = FishingInput::default();

    match machine.current() {
        FishingState::Idle => {
            if angler.casts_remaining > 0 {
                angler.casts_remaining -= 1;
                angler.reeling = true;
                input.cast_pressed = true;
            }
        }
        FishingState::HookOpportunity => {
            let window = machine.hook_opportunity();
            input.cast_pressed = !angler.ignore_bites && window.elapsed() >= angler.strike_delay;
        }
        FishingState::Reeling => {
            let reeling = machine.reeling();
            if reeling.in_slack() {
                angler.reeling = false;
            } else if reeling.tension_fraction() >= angler.tension_high {
                angler.reeling = false;
            } else if reeling.tension_fraction() <= angler.tension_low {
                angler.reeling = true;
            }
            input.reel_held = angler.reeling;
        }
        _ => {}
    }
}
