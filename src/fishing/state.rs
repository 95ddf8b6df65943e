//! The contract every encounter state implements.

use super::context::FishingContext;
use crate::shared::{FishingState, LostReason};

/// Shortest duration any timer can be configured to.
pub const MIN_DURATION: f32 = 0.1;

/// Slack allowed when comparing an accumulated `f32` against its target.
///
/// Frame deltas that add up to a duration in real terms can land a few ulps
/// short of it in `f32`; this is well under one frame at any sane rate.
pub const TIME_EPSILON: f32 = 1e-4;

/// Decision a state reports to the driver after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Still working; stay in this state.
    Pending,
    /// Resolved; the driver should exit this state and enter the given one.
    To(FishingState),
}

impl Transition {
    pub fn target(self) -> Option<FishingState> {
        match self {
            Transition::Pending => None,
            Transition::To(state) => Some(state),
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Transition::Pending)
    }
}

/// One state of the encounter.
///
/// Objects are long-lived and reused: `enter` must reset every field, and the
/// public accessors only mean something between `enter` and `exit`.
pub trait FishingPhaseBehaviour: Send + Sync {
    /// Reset for a fresh activation.
    fn enter(&mut self, ctx: &mut dyn FishingContext);

    /// Advance timers and rolls by `dt` seconds.
    fn update(&mut self, ctx: &mut dyn FishingContext, dt: f32);

    /// Clear any one-shot flags so nothing stale is read after deactivation.
    fn exit(&mut self, ctx: &dyn FishingContext);

    /// `Pending` until resolved, then the same target on every call until `exit`.
    fn next_state(&self, ctx: &dyn FishingContext) -> Transition;

    /// Set by states whose resolution ends the encounter in `Lost`.
    fn loss_reason(&self) -> Option<LostReason> {
        None
    }
}

/// Floor a configured value; non-finite input falls back to the floor.
pub(crate) fn at_least(value: f32, floor: f32) -> f32 {
    if value.is_finite() {
        value.max(floor)
    } else {
        floor
    }
}

/// Floor a configured duration so a timer can never be zero or negative.
pub(crate) fn sane_duration(seconds: f32) -> f32 {
    at_least(seconds, MIN_DURATION)
}

/// Clamp a configured probability into `[0, 1]`.
pub(crate) fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// True once an accumulated `value` has reached `target`, within [`TIME_EPSILON`].
pub(crate) fn reached(value: f32, target: f32) -> bool {
    value + TIME_EPSILON >= target
}

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
///
/// Exactly 1.0 whenever [`reached`] says the timer is done.
pub(crate) fn progress(elapsed: f32, duration: f32) -> f32 {
    if reached(elapsed, duration) {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}
