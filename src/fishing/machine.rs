//! The driver: owns every state object and runs exactly one of them per frame.
//!
//! Per frame: `update` the active state, ask it for its decision, and on a
//! transition `exit` it and `enter` the next one. The new state gets its first
//! `update` on the following frame.

use bevy::prelude::*;

use super::context::FishingContext;
use super::state::{FishingPhaseBehaviour, Transition};
use super::states::*;
use super::tuning::FishingTuning;
use crate::shared::{FishingState, LostReason};

/// Every state object, keyed by label through an exhaustive match.
pub struct StateTable {
    pub idle: IdleState,
    pub casting: CastingState,
    /// Owned by the surrounding game; [`SettleDrift`] unless replaced.
    pub lure_drift: Box<dyn FishingPhaseBehaviour>,
    pub stillness: StillnessState,
    pub micro_twitch: MicroTwitchState,
    pub bite_check: BiteCheckState,
    pub hook_opportunity: HookOpportunityState,
    pub hooked: HookedState,
    pub reeling: ReelingState,
    pub slack_event: SlackEventState,
    pub lost: LostState,
    pub caught: CaughtState,
}

impl StateTable {
    pub fn from_tuning(tuning: &FishingTuning) -> Self {
        Self {
            idle: IdleState::new(),
            casting: CastingState::new(&tuning.casting),
            lure_drift: Box::new(SettleDrift::new(&tuning.lure_drift)),
            stillness: StillnessState::new(&tuning.stillness),
            micro_twitch: MicroTwitchState::new(&tuning.micro_twitch),
            bite_check: BiteCheckState::new(&tuning.bite_check),
            hook_opportunity: HookOpportunityState::new(&tuning.hook_opportunity),
            hooked: HookedState::new(&tuning.hooked),
            reeling: ReelingState::new(&tuning.reeling, &tuning.slack),
            slack_event: SlackEventState::new(&tuning.slack),
            lost: LostState::new(&tuning.lost),
            caught: CaughtState::new(&tuning.caught),
        }
    }

    pub fn get(&self, state: FishingState) -> &dyn FishingPhaseBehaviour {
        match state {
            FishingState::Idle => &self.idle,
            FishingState::Casting => &self.casting,
            FishingState::LureDrift => self.lure_drift.as_ref(),
            FishingState::Stillness => &self.stillness,
            FishingState::MicroTwitch => &self.micro_twitch,
            FishingState::BiteCheck => &self.bite_check,
            FishingState::HookOpportunity => &self.hook_opportunity,
            FishingState::Hooked => &self.hooked,
            FishingState::Reeling => &self.reeling,
            FishingState::SlackEvent => &self.slack_event,
            FishingState::Lost => &self.lost,
            FishingState::Caught => &self.caught,
        }
    }

    pub fn get_mut(&mut self, state: FishingState) -> &mut dyn FishingPhaseBehaviour {
        match state {
            FishingState::Idle => &mut self.idle,
            FishingState::Casting => &mut self.casting,
            FishingState::LureDrift => self.lure_drift.as_mut(),
            FishingState::Stillness => &mut self.stillness,
            FishingState::MicroTwitch => &mut self.micro_twitch,
            FishingState::BiteCheck => &mut self.bite_check,
            FishingState::HookOpportunity => &mut self.hook_opportunity,
            FishingState::Hooked => &mut self.hooked,
            FishingState::Reeling => &mut self.reeling,
            FishingState::SlackEvent => &mut self.slack_event,
            FishingState::Lost => &mut self.lost,
            FishingState::Caught => &mut self.caught,
        }
    }
}

impl Default for StateTable {
    fn default() -> Self {
        Self::from_tuning(&FishingTuning::default())
    }
}

/// A transition performed by [`FishingMachine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: FishingState,
    pub to: FishingState,
    /// Set when `to` is [`FishingState::Lost`].
    pub reason: Option<LostReason>,
}

/// Result the game should publish once per Lost/Caught activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncounterOutcome {
    Caught { landing_position: Vec2 },
    Lost { reason: LostReason },
}

#[derive(Resource)]
pub struct FishingMachine {
    table: StateTable,
    current: FishingState,
    entered: bool,
    time_in_state: f32,
}

impl FishingMachine {
    pub fn new(tuning: &FishingTuning) -> Self {
        Self {
            table: StateTable::from_tuning(tuning),
            current: FishingState::Idle,
            entered: false,
            time_in_state: 0.0,
        }
    }

    /// Replace the lure-drift phase with the game's own implementation.
    pub fn with_lure_drift(mut self, drift: Box<dyn FishingPhaseBehaviour>) -> Self {
        self.table.lure_drift = drift;
        self
    }

    pub fn current(&self) -> FishingState {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.entered
    }

    /// Seconds the active state has been running.
    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    pub fn states(&self) -> &StateTable {
        &self.table
    }

    pub fn casting(&self) -> &CastingState {
        &self.table.casting
    }

    pub fn stillness(&self) -> &StillnessState {
        &self.table.stillness
    }

    pub fn bite_check(&self) -> &BiteCheckState {
        &self.table.bite_check
    }

    pub fn hook_opportunity(&self) -> &HookOpportunityState {
        &self.table.hook_opportunity
    }

    pub fn reeling(&self) -> &ReelingState {
        &self.table.reeling
    }

    pub fn slack_event(&self) -> &SlackEventState {
        &self.table.slack_event
    }

    pub fn lost(&self) -> &LostState {
        &self.table.lost
    }

    pub fn lost_mut(&mut self) -> &mut LostState {
        &mut self.table.lost
    }

    pub fn caught(&self) -> &CaughtState {
        &self.table.caught
    }

    pub fn caught_mut(&mut self) -> &mut CaughtState {
        &mut self.table.caught
    }

    /// Enter the initial state if nothing has been entered yet.
    pub fn start(&mut self, ctx: &mut dyn FishingContext) {
        if self.entered {
            return;
        }
        self.table.get_mut(self.current).enter(ctx);
        self.entered = true;
        self.time_in_state = 0.0;
    }

    /// Run one frame of the active state.
    pub fn step(&mut self, ctx: &mut dyn FishingContext, dt: f32) -> Option<PhaseChange> {
        self.start(ctx);
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.table.get_mut(self.current).update(ctx, dt);
        self.time_in_state += dt;

        let next = match self.table.get(self.current).next_state(&*ctx) {
            Transition::Pending => return None,
            Transition::To(next) => next,
        };
        Some(self.swap(ctx, next))
    }

    /// Leave the active state for `to` without waiting for it to resolve.
    ///
    /// Used by the game layer to start a standalone slack event or to script
    /// an encounter; ordinary play only moves through [`Self::step`].
    pub fn force_transition(
        &mut self,
        ctx: &mut dyn FishingContext,
        to: FishingState,
    ) -> PhaseChange {
        self.start(ctx);
        self.swap(ctx, to)
    }

    /// Tear the encounter down and start again from Idle.
    pub fn reset(&mut self, ctx: &mut dyn FishingContext) {
        if self.entered {
            self.table.get_mut(self.current).exit(&*ctx);
            debug!("[Fishing] Encounter reset from {:?}", self.current);
        }
        self.current = FishingState::Idle;
        self.entered = false;
        self.start(ctx);
    }

    /// Read and clear the one-shot result flag of a Lost/Caught state.
    pub fn take_outcome(&mut self) -> Option<EncounterOutcome> {
        match self.current {
            FishingState::Caught if self.table.caught.event_ready() => {
                self.table.caught.clear_event_ready();
                Some(EncounterOutcome::Caught {
                    landing_position: self.table.casting.landing_position(),
                })
            }
            FishingState::Lost if self.table.lost.event_ready() => {
                self.table.lost.clear_event_ready();
                Some(EncounterOutcome::Lost {
                    reason: self.table.lost.reason(),
                })
            }
            _ => None,
        }
    }

    fn swap(&mut self, ctx: &mut dyn FishingContext, to: FishingState) -> PhaseChange {
        let from = self.current;
        let outgoing = self.table.get_mut(from);
        let reason = outgoing.loss_reason();
        outgoing.exit(&*ctx);

        let reason = (to == FishingState::Lost).then(|| reason.unwrap_or_default());
        if let Some(reason) = reason {
            self.table.lost.set_reason(reason);
        }

        self.current = to;
        self.time_in_state = 0.0;
        self.table.get_mut(to).enter(ctx);

        info!("[Fishing] {:?} → {:?}", from, to);
        PhaseChange { from, to, reason }
    }
}

impl Default for FishingMachine {
    fn default() -> Self {
        Self::new(&FishingTuning::default())
    }
}
