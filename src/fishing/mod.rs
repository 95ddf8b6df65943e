use bevy::prelude::*;

use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
mod context;
mod machine;
mod state;
pub mod states;
mod stats;
mod tuning;

pub use context::*;
pub use machine::*;
pub use state::*;
pub use stats::*;
pub use tuning::*;

// ─── Plugin ─────────────────────────────────────────────────────────────────

/// Runs the encounter state machine once per frame and publishes its results.
///
/// Reads `FishingInput` and `FishingModifiers`, which the input layer and the
/// rest of the game keep up to date.
#[derive(Default)]
pub struct FishingPlugin {
    pub tuning: FishingTuning,
    /// Fixed seed for the encounter's random draws; entropy when `None`.
    pub seed: Option<u64>,
}

impl Plugin for FishingPlugin {
    fn build(&self, app: &mut App) {
        // A machine inserted beforehand (e.g. with a custom drift phase) wins.
        if !app.world().contains_resource::<FishingMachine>() {
            app.insert_resource(FishingMachine::new(&self.tuning));
        }
        let rng = match self.seed {
            Some(seed) => FishingRng::seeded(seed),
            None => FishingRng::default(),
        };

        app
            // Resources
            .insert_resource(self.tuning.clone())
            .insert_resource(rng)
            .init_resource::<FishingInput>()
            .init_resource::<FishingModifiers>()
            .init_resource::<FishingStats>()
            // Events
            .add_event::<FishingPhaseChangedEvent>()
            .add_event::<FishingSlackStartedEvent>()
            .add_event::<FishCaughtEvent>()
            .add_event::<FishLostEvent>()
            .add_event::<CancelFishingEvent>()
            .add_systems(
                Update,
                (
                    handle_cancel_fishing,
                    step_fishing_machine,
                    publish_fishing_outcomes,
                    record_fishing_stats,
                )
                    .chain(),
            );
    }
}

// ─── Systems ────────────────────────────────────────────────────────────────

/// Cancel input or a `CancelFishingEvent` tears the encounter down to Idle.
pub fn handle_cancel_fishing(
    mut cancel_events: EventReader<CancelFishingEvent>,
    input: Res<FishingInput>,
    modifiers: Res<FishingModifiers>,
    mut rng: ResMut<FishingRng>,
    mut machine: ResMut<FishingMachine>,
    mut phase_events: EventWriter<FishingPhaseChangedEvent>,
) {
    let cancel_requested = cancel_events.read().count() > 0 || input.cancel_pressed;
    if !cancel_requested || machine.current() == FishingState::Idle {
        return;
    }

    let from = machine.current();
    let mut ctx = FrameContext {
        input: &*input,
        modifiers: &*modifiers,
        rng: &mut rng.0,
    };
    machine.reset(&mut ctx);
    info!("[Fishing] Encounter cancelled during {:?}", from);
    phase_events.send(FishingPhaseChangedEvent {
        from,
        to: FishingState::Idle,
    });
}

/// Advance the active state by this frame's delta time.
pub fn step_fishing_machine(
    time: Res<Time>,
    input: Res<FishingInput>,
    modifiers: Res<FishingModifiers>,
    mut rng: ResMut<FishingRng>,
    mut machine: ResMut<FishingMachine>,
    mut phase_events: EventWriter<FishingPhaseChangedEvent>,
    mut slack_events: EventWriter<FishingSlackStartedEvent>,
) {
    let slack_before = in_reeling_slack(&machine);

    let mut ctx = FrameContext {
        input: &*input,
        modifiers: &*modifiers,
        rng: &mut rng.0,
    };
    let change = machine.step(&mut ctx, time.delta_secs());

    if let Some(change) = change {
        phase_events.send(FishingPhaseChangedEvent {
            from: change.from,
            to: change.to,
        });
        if change.to == FishingState::SlackEvent {
            slack_events.send(FishingSlackStartedEvent);
        }
    } else if !slack_before && in_reeling_slack(&machine) {
        slack_events.send(FishingSlackStartedEvent);
    }
}

fn in_reeling_slack(machine: &FishingMachine) -> bool {
    machine.current() == FishingState::Reeling && machine.reeling().in_slack()
}

/// Poll the Lost/Caught one-shot flag and turn it into a domain event.
pub fn publish_fishing_outcomes(
    mut machine: ResMut<FishingMachine>,
    mut caught_events: EventWriter<FishCaughtEvent>,
    mut lost_events: EventWriter<FishLostEvent>,
) {
    let Some(outcome) = machine.take_outcome() else {
        return;
    };
    match outcome {
        EncounterOutcome::Caught { landing_position } => {
            caught_events.send(FishCaughtEvent { landing_position });
        }
        EncounterOutcome::Lost { reason } => {
            info!("[Fishing] {}", reason.message());
            lost_events.send(FishLostEvent { reason });
        }
    }
}
