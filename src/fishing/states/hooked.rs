//! Brief pause after the hook is set, before the fight starts.

use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::FishingState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookedConfig {
    /// Minimum time the hook-set feedback stays on screen.
    pub hooked_duration: f32,
}

impl Default for HookedConfig {
    fn default() -> Self {
        Self {
            hooked_duration: 0.3,
        }
    }
}

#[derive(Debug)]
pub struct HookedState {
    duration: f32,
    elapsed: f32,
    complete: bool,
}

impl HookedState {
    pub fn new(config: &HookedConfig) -> Self {
        Self {
            duration: sane_duration(config.hooked_duration),
            elapsed: 0.0,
            complete: false,
        }
    }

    pub fn hooked_progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl Default for HookedState {
    fn default() -> Self {
        Self::new(&HookedConfig::default())
    }
}

impl FishingPhaseBehaviour for HookedState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.elapsed = 0.0;
        self.complete = false;
    }

    fn update(&mut self, _ctx: &mut dyn FishingContext, dt: f32) {
        if self.complete {
            return;
        }
        self.elapsed += dt;
        if reached(self.elapsed, self.duration) {
            self.complete = true;
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.complete = false;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.complete {
            Transition::To(FishingState::Reeling)
        } else {
            Transition::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::context::test_support::{run_frames, ScriptedContext, FRAME_60};

    #[test]
    fn test_hooked_gates_reeling() {
        let mut ctx = ScriptedContext::default();
        let mut hooked = HookedState::new(&HookedConfig {
            hooked_duration: 0.25,
        });
        hooked.enter(&mut ctx);
        hooked.update(&mut ctx, 0.125);
        assert_eq!(hooked.next_state(&ctx), Transition::Pending);
        hooked.update(&mut ctx, 0.125);
        assert_eq!(hooked.hooked_progress(), 1.0);
        assert!(hooked.is_complete());
        assert_eq!(hooked.next_state(&ctx), Transition::To(FishingState::Reeling));
    }

    #[test]
    fn test_reenter_restarts_timer() {
        let mut ctx = ScriptedContext::default();
        let mut hooked = HookedState::default();
        hooked.enter(&mut ctx);
        hooked.update(&mut ctx, 1.0);
        hooked.exit(&ctx);
        hooked.enter(&mut ctx);
        assert_eq!(hooked.hooked_progress(), 0.0);
        assert_eq!(hooked.next_state(&ctx), Transition::Pending);
    }

    #[test]
    fn test_completes_after_sixty_fps_frames() {
        let mut ctx = ScriptedContext::default();
        let mut hooked = HookedState::default();
        hooked.enter(&mut ctx);

        run_frames(&mut hooked, &mut ctx, 17, FRAME_60);
        assert_eq!(hooked.next_state(&ctx), Transition::Pending);
        hooked.update(&mut ctx, FRAME_60);
        assert_eq!(hooked.hooked_progress(), 1.0);
        assert_eq!(hooked.next_state(&ctx), Transition::To(FishingState::Reeling));
    }
}
