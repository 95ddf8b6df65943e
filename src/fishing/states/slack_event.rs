//! Slack on the line: let go of the reel long enough or the line snaps.
//!
//! [`SlackWindow`] is the release-timing challenge itself. Reeling embeds one for
//! slack that appears mid-fight; [`SlackEventState`] runs one as a state of its own.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    progress, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::{FishingState, LostReason};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Continuous release needed to clear the slack.
    pub required_release: f32,
    /// Still holding the reel after this long snaps the line.
    pub max_duration: f32,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            required_release: 0.3,
            max_duration: 1.5,
        }
    }
}

/// What one frame of slack handling produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlackStep {
    Holding,
    Releasing,
    Cleared,
    Failed,
}

#[derive(Debug, Clone)]
pub struct SlackWindow {
    required_release: f32,
    max_duration: f32,
    elapsed: f32,
    release_time: f32,
    cleared: bool,
    failed: bool,
}

impl SlackWindow {
    pub fn new(config: &SlackConfig) -> Self {
        let required_release = sane_duration(config.required_release);
        Self {
            required_release,
            max_duration: sane_duration(config.max_duration).max(required_release),
            elapsed: 0.0,
            release_time: 0.0,
            cleared: false,
            failed: false,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.release_time = 0.0;
        self.cleared = false;
        self.failed = false;
    }

    pub fn advance(&mut self, reel_held: bool, dt: f32) -> SlackStep {
        if self.cleared {
            return SlackStep::Cleared;
        }
        if self.failed {
            return SlackStep::Failed;
        }
        self.elapsed += dt;

        if reel_held {
            // Any pull on the reel restarts the release count.
            self.release_time = 0.0;
            if reached(self.elapsed, self.max_duration) {
                self.failed = true;
                return SlackStep::Failed;
            }
            SlackStep::Holding
        } else {
            self.release_time += dt;
            if reached(self.release_time, self.required_release) {
                self.cleared = true;
                return SlackStep::Cleared;
            }
            SlackStep::Releasing
        }
    }

    pub fn release_time(&self) -> f32 {
        self.release_time
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn release_progress(&self) -> f32 {
        progress(self.release_time, self.required_release)
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

impl Default for SlackWindow {
    fn default() -> Self {
        Self::new(&SlackConfig::default())
    }
}

#[derive(Debug, Default)]
pub struct SlackEventState {
    window: SlackWindow,
}

impl SlackEventState {
    pub fn new(config: &SlackConfig) -> Self {
        Self {
            window: SlackWindow::new(config),
        }
    }

    pub fn slack_cleared(&self) -> bool {
        self.window.is_cleared()
    }

    pub fn line_snapped(&self) -> bool {
        self.window.is_failed()
    }

    pub fn release_time(&self) -> f32 {
        self.window.release_time()
    }

    pub fn release_progress(&self) -> f32 {
        self.window.release_progress()
    }
}

impl FishingPhaseBehaviour for SlackEventState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.window.reset();
    }

    fn update(&mut self, ctx: &mut dyn FishingContext, dt: f32) {
        if self.window.is_cleared() || self.window.is_failed() {
            return;
        }
        match self.window.advance(ctx.reel_input_held(), dt) {
            SlackStep::Cleared => {
                debug!("[Fishing] Slack cleared after {:.2}s", self.window.elapsed());
            }
            SlackStep::Failed => {
                debug!("[Fishing] Held through the slack, line snapped");
            }
            SlackStep::Holding | SlackStep::Releasing => {}
        }
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.window.reset();
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.window.is_failed() {
            Transition::To(FishingState::Lost)
        } else if self.window.is_cleared() {
            Transition::To(FishingState::Reeling)
        } else {
            Transition::Pending
        }
    }

    fn loss_reason(&self) -> Option<LostReason> {
        self.window
            .is_failed()
            .then_some(LostReason::SlackEventFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::context::test_support::{run_frames, ScriptedContext, FRAME_60};

    #[test]
    fn test_release_for_required_time_clears() {
        let mut ctx = ScriptedContext::default();
        let mut slack = SlackEventState::default();
        slack.enter(&mut ctx);

        slack.update(&mut ctx, 0.15);
        assert_eq!(slack.next_state(&ctx), Transition::Pending);
        slack.update(&mut ctx, 0.15);

        assert!(slack.slack_cleared());
        assert_eq!(slack.release_progress(), 1.0);
        assert_eq!(slack.next_state(&ctx), Transition::To(FishingState::Reeling));
        assert_eq!(slack.loss_reason(), None);
    }

    #[test]
    fn test_regrip_resets_release_counter() {
        let mut ctx = ScriptedContext::default();
        let mut slack = SlackEventState::default();
        slack.enter(&mut ctx);

        slack.update(&mut ctx, 0.29);
        assert!((slack.release_time() - 0.29).abs() < 1e-6);
        assert!(!slack.slack_cleared());

        ctx.reel_held = true;
        slack.update(&mut ctx, 0.016);
        assert_eq!(slack.release_time(), 0.0);
        assert_eq!(slack.next_state(&ctx), Transition::Pending);
    }

    #[test]
    fn test_holding_past_max_duration_snaps() {
        let mut ctx = ScriptedContext::default();
        ctx.reel_held = true;
        let mut slack = SlackEventState::default();
        slack.enter(&mut ctx);

        for _ in 0..5 {
            slack.update(&mut ctx, 0.25);
            assert_eq!(slack.next_state(&ctx), Transition::Pending);
        }
        slack.update(&mut ctx, 0.25);
        assert!(slack.line_snapped());
        assert_eq!(slack.next_state(&ctx), Transition::To(FishingState::Lost));
        assert_eq!(slack.loss_reason(), Some(LostReason::SlackEventFailure));
    }

    #[test]
    fn test_releasing_at_deadline_does_not_snap() {
        let mut ctx = ScriptedContext::default();
        ctx.reel_held = true;
        let mut slack = SlackEventState::default();
        slack.enter(&mut ctx);
        slack.update(&mut ctx, 1.4);

        ctx.reel_held = false;
        slack.update(&mut ctx, 0.15);
        assert!(!slack.line_snapped());
        slack.update(&mut ctx, 0.15);
        assert!(slack.slack_cleared());
    }

    #[test]
    fn test_exit_resets_window() {
        let mut ctx = ScriptedContext::default();
        let mut slack = SlackEventState::default();
        slack.enter(&mut ctx);
        slack.update(&mut ctx, 0.5);
        slack.exit(&ctx);
        assert!(!slack.slack_cleared());
        assert_eq!(slack.next_state(&ctx), Transition::Pending);
    }

    #[test]
    fn test_clears_after_sixty_fps_frames() {
        let mut ctx = ScriptedContext::default();
        let mut slack = SlackEventState::default();
        slack.enter(&mut ctx);

        run_frames(&mut slack, &mut ctx, 17, FRAME_60);
        assert_eq!(slack.next_state(&ctx), Transition::Pending);
        slack.update(&mut ctx, FRAME_60);
        assert_eq!(slack.release_progress(), 1.0);
        assert_eq!(slack.next_state(&ctx), Transition::To(FishingState::Reeling));
    }

    #[test]
    fn test_snaps_at_deadline_after_sixty_fps_frames() {
        let mut ctx = ScriptedContext::default();
        ctx.reel_held = true;
        let mut slack = SlackEventState::default();
        slack.enter(&mut ctx);

        run_frames(&mut slack, &mut ctx, 89, FRAME_60);
        assert!(!slack.line_snapped());
        slack.update(&mut ctx, FRAME_60);
        assert!(slack.line_snapped());
        assert_eq!(slack.next_state(&ctx), Transition::To(FishingState::Lost));
        assert_eq!(slack.loss_reason(), Some(LostReason::SlackEventFailure));
    }
}
