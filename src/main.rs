use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use reelstate::autoangler::{AutoAngler, AutoAnglerPlugin};
use reelstate::fishing::{
    FishingMachine, FishingPlugin, FishingStats, FishingTuning, DEFAULT_TUNING_PATH,
};
use reelstate::shared::*;

const DEFAULT_CASTS: u32 = 10;
const FRAME_SECONDS: f64 = 1.0 / 60.0;

/// Runs a batch of encounters with the scripted angler and prints the tallies.
///
/// Usage: `reelstate [casts] [seed]`
fn main() {
    let mut args = std::env::args().skip(1);
    let casts = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_CASTS);
    let seed = args.next().and_then(|arg| arg.parse::<u64>().ok());

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            FRAME_SECONDS,
        )))
        .add_plugins(FishingPlugin {
            tuning: FishingTuning::load_or_default(DEFAULT_TUNING_PATH),
            seed,
        })
        .add_plugins(AutoAnglerPlugin)
        .insert_resource(AutoAngler::with_casts(casts))
        .add_systems(PreUpdate, animate_fish_struggle)
        .add_systems(Last, exit_when_out_of_casts)
        .run();
}

/// Stand-in fish: pulls in slow waves while hooked, rests otherwise.
fn animate_fish_struggle(
    time: Res<Time>,
    machine: Res<FishingMachine>,
    mut modifiers: ResMut<FishingModifiers>,
) {
    modifiers.fish_struggle_intensity = if machine.current().is_fighting() {
        0.5 + 0.5 * (time.elapsed_secs() * 1.7).sin()
    } else {
        0.0
    };
}

fn exit_when_out_of_casts(
    angler: Res<AutoAngler>,
    machine: Res<FishingMachine>,
    stats: Res<FishingStats>,
    mut exit: EventWriter<AppExit>,
) {
    if angler.casts_remaining > 0 || machine.current() != FishingState::Idle {
        return;
    }

    info!(
        "[Fishing] Session over: {} caught, {} lost, catch rate {:.0}%",
        stats.catches,
        stats.total_losses(),
        stats.catch_rate() * 100.0
    );
    match ron::ser::to_string_pretty(&*stats, ron::ser::PrettyConfig::default()) {
        Ok(text) => println!("{}", text),
        Err(e) => warn!("[Fishing] Failed to serialize stats: {}", e),
    }
    exit.send(AppExit::Success);
}
