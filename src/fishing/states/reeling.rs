//! The fight: keep line tension between snapping and slack until the fish is in.
//!
//! ```text
//!  0 ──────── escape ─┬───────────── reel zone ─────────┬── no gain ──┬ max
//!                     threshold                         90% of max    snap
//! ```
//!
//! Holding the reel raises tension (faster against a struggling fish) and earns
//! progress while tension stays under 90% of max. Releasing lets tension fall;
//! resting at or under the escape threshold gives the fish a chance every frame
//! to slip the hook, scaled by how slack the line is and how long it stays there.
//! Every check interval a slack event may start, scaled by current tension.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::slack_event::{SlackConfig, SlackStep, SlackWindow};
use crate::fishing::context::FishingContext;
use crate::fishing::state::{
    at_least, clamp01, reached, sane_duration, FishingPhaseBehaviour, Transition,
};
use crate::shared::{FishingState, LostReason};

/// Smallest rate any tension or progress speed can be configured to.
const MIN_RATE: f32 = 0.01;
const MIN_MAX_TENSION: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelingConfig {
    pub max_tension: f32,
    /// Tension on entry as a fraction of `max_tension`.
    pub starting_tension: f32,
    /// Tension gained per second while reeling.
    pub tension_increase_rate: f32,
    /// Tension lost per second while the reel is released.
    pub tension_decrease_rate: f32,
    /// At or below this tension a released line can let the fish escape.
    pub escape_threshold: f32,
    pub progress_per_second: f32,
    /// Fraction of `max_tension` above which reeling earns no progress.
    pub progress_tension_ceiling: f32,
    pub slack_check_interval: f32,
    /// Base chance per check of a slack event; scaled by tension.
    pub slack_chance: f32,
    /// Fraction of `max_tension` removed when slack is cleared.
    pub slack_tension_relief: f32,
}

impl Default for ReelingConfig {
    fn default() -> Self {
        Self {
            max_tension: 1.0,
            starting_tension: 0.3,
            tension_increase_rate: 0.5,
            tension_decrease_rate: 0.3,
            escape_threshold: 0.1,
            progress_per_second: 0.5,
            progress_tension_ceiling: 0.9,
            slack_check_interval: 2.0,
            slack_chance: 0.15,
            slack_tension_relief: 0.1,
        }
    }
}

#[derive(Debug)]
pub struct ReelingState {
    max_tension: f32,
    starting_tension: f32,
    tension_increase_rate: f32,
    tension_decrease_rate: f32,
    escape_threshold: f32,
    progress_per_second: f32,
    progress_tension_ceiling: f32,
    slack_check_interval: f32,
    slack_chance: f32,
    slack_tension_relief: f32,

    tension: f32,
    reel_progress: f32,
    slack_timer: f32,
    in_slack: bool,
    slack: SlackWindow,
    line_snapped: bool,
    fish_escaped: bool,
    fish_caught: bool,
    loss_reason: Option<LostReason>,
}

impl ReelingState {
    pub fn new(config: &ReelingConfig, slack: &SlackConfig) -> Self {
        let max_tension = at_least(config.max_tension, MIN_MAX_TENSION);
        let escape_threshold = if config.escape_threshold.is_finite() {
            config.escape_threshold.clamp(MIN_RATE, max_tension * 0.5)
        } else {
            MIN_RATE
        };
        Self {
            max_tension,
            starting_tension: clamp01(config.starting_tension),
            tension_increase_rate: at_least(config.tension_increase_rate, MIN_RATE),
            tension_decrease_rate: at_least(config.tension_decrease_rate, MIN_RATE),
            escape_threshold,
            progress_per_second: at_least(config.progress_per_second, MIN_RATE),
            progress_tension_ceiling: clamp01(config.progress_tension_ceiling).max(0.1),
            slack_check_interval: sane_duration(config.slack_check_interval),
            slack_chance: clamp01(config.slack_chance),
            slack_tension_relief: clamp01(config.slack_tension_relief),

            tension: 0.0,
            reel_progress: 0.0,
            slack_timer: 0.0,
            in_slack: false,
            slack: SlackWindow::new(slack),
            line_snapped: false,
            fish_escaped: false,
            fish_caught: false,
            loss_reason: None,
        }
    }

    pub fn current_tension(&self) -> f32 {
        self.tension
    }

    pub fn max_tension(&self) -> f32 {
        self.max_tension
    }

    pub fn tension_fraction(&self) -> f32 {
        self.tension / self.max_tension
    }

    pub fn reel_progress(&self) -> f32 {
        self.reel_progress
    }

    pub fn in_slack(&self) -> bool {
        self.in_slack
    }

    pub fn slack_release_progress(&self) -> f32 {
        if self.in_slack {
            self.slack.release_progress()
        } else {
            0.0
        }
    }

    pub fn line_snapped(&self) -> bool {
        self.line_snapped
    }

    pub fn fish_escaped(&self) -> bool {
        self.fish_escaped
    }

    pub fn fish_caught(&self) -> bool {
        self.fish_caught
    }

    fn resolved(&self) -> bool {
        self.line_snapped || self.fish_escaped || self.fish_caught
    }

    fn snap(&mut self, reason: LostReason) {
        self.line_snapped = true;
        self.loss_reason = Some(reason);
        info!(
            "[Fishing] Line snapped at tension {:.2}/{:.2} ({:?})",
            self.tension, self.max_tension, reason
        );
    }

    fn add_tension(&mut self, amount: f32) {
        self.tension = (self.tension + amount).clamp(0.0, self.max_tension);
    }

    fn update_slack(&mut self, held: bool, dt: f32) {
        match self.slack.advance(held, dt) {
            SlackStep::Releasing => {}
            SlackStep::Holding => {
                self.add_tension(2.0 * self.tension_increase_rate * dt);
                if reached(self.tension, self.max_tension) {
                    self.snap(LostReason::LineSnapped);
                }
            }
            SlackStep::Cleared => {
                self.in_slack = false;
                self.add_tension(-self.slack_tension_relief * self.max_tension);
                debug!("[Fishing] Slack cleared, tension {:.2}", self.tension);
            }
            SlackStep::Failed => self.snap(LostReason::SlackEventFailure),
        }
    }

    fn try_start_slack(&mut self, ctx: &mut dyn FishingContext, dt: f32) {
        self.slack_timer += dt;
        if !reached(self.slack_timer, self.slack_check_interval) {
            return;
        }
        self.slack_timer = 0.0;

        let chance = clamp01(self.slack_chance * (0.5 + self.tension_fraction()));
        if ctx.random_value() < chance {
            self.in_slack = true;
            self.slack.reset();
            debug!("[Fishing] Slack event (chance {:.0}%)", chance * 100.0);
        }
    }
}

impl Default for ReelingState {
    fn default() -> Self {
        Self::new(&ReelingConfig::default(), &SlackConfig::default())
    }
}

impl FishingPhaseBehaviour for ReelingState {
    fn enter(&mut self, _ctx: &mut dyn FishingContext) {
        self.tension = self.starting_tension * self.max_tension;
        self.reel_progress = 0.0;
        self.slack_timer = 0.0;
        self.in_slack = false;
        self.slack.reset();
        self.line_snapped = false;
        self.fish_escaped = false;
        self.fish_caught = false;
        self.loss_reason = None;
    }

    fn update(&mut self, ctx: &mut dyn FishingContext, dt: f32) {
        if self.resolved() {
            return;
        }
        let held = ctx.reel_input_held();

        if self.in_slack {
            self.update_slack(held, dt);
            return;
        }

        if held {
            let gain = self.tension_increase_rate * dt;
            let struggle = ctx.fish_struggle_intensity().max(0.0);
            self.add_tension(gain + 0.5 * gain * struggle);
        } else {
            self.add_tension(-self.tension_decrease_rate * dt);
        }

        if reached(self.tension, self.max_tension) {
            self.snap(LostReason::LineSnapped);
            return;
        }

        if !held && self.tension <= self.escape_threshold {
            let escape_chance = (1.0 - self.tension / self.escape_threshold) * dt;
            if ctx.random_value() < escape_chance {
                self.fish_escaped = true;
                self.loss_reason = Some(LostReason::FishEscaped);
                info!("[Fishing] Fish escaped at tension {:.2}", self.tension);
                return;
            }
        }

        if held && self.tension < self.progress_tension_ceiling * self.max_tension {
            let gained = self.progress_per_second * dt;
            self.reel_progress = (self.reel_progress + gained).clamp(0.0, 1.0);
            if reached(self.reel_progress, 1.0) {
                self.reel_progress = 1.0;
                self.fish_caught = true;
                info!("[Fishing] Fish landed!");
                return;
            }
        }

        self.try_start_slack(ctx, dt);
    }

    fn exit(&mut self, _ctx: &dyn FishingContext) {
        self.in_slack = false;
        self.line_snapped = false;
        self.fish_escaped = false;
        self.fish_caught = false;
        self.loss_reason = None;
    }

    fn next_state(&self, _ctx: &dyn FishingContext) -> Transition {
        if self.fish_caught {
            Transition::To(FishingState::Caught)
        } else if self.line_snapped || self.fish_escaped {
            Transition::To(FishingState::Lost)
        } else {
            Transition::Pending
        }
    }

    fn loss_reason(&self) -> Option<LostReason> {
        self.loss_reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::context::test_support::{run_frames, ScriptedContext, FRAME_60};

    fn entered() -> (ReelingState, ScriptedContext) {
        let mut ctx = ScriptedContext::default();
        let mut reeling = ReelingState::default();
        reeling.enter(&mut ctx);
        (reeling, ctx)
    }

    #[test]
    fn test_starts_at_thirty_percent() {
        let (reeling, ctx) = entered();
        assert!((reeling.current_tension() - 0.3).abs() < 1e-6);
        assert_eq!(reeling.reel_progress(), 0.0);
        assert_eq!(reeling.next_state(&ctx), Transition::Pending);
    }

    #[test]
    fn test_holding_snaps_before_catch() {
        let (mut reeling, mut ctx) = entered();
        ctx.reel_held = true;
        for _ in 0..14 {
            assert!(!reeling.fish_caught());
            reeling.update(&mut ctx, 0.1);
        }
        assert!(reeling.line_snapped());
        assert!(!reeling.fish_caught());
        assert!(reeling.reel_progress() < 1.0);
        assert_eq!(reeling.current_tension(), 1.0);
        assert_eq!(reeling.next_state(&ctx), Transition::To(FishingState::Lost));
        assert_eq!(reeling.loss_reason(), Some(LostReason::LineSnapped));
    }

    #[test]
    fn test_struggle_adds_tension() {
        let (mut calm, mut ctx) = entered();
        ctx.reel_held = true;
        calm.update(&mut ctx, 0.1);

        let (mut fighting, mut ctx2) = entered();
        ctx2.reel_held = true;
        ctx2.struggle = 1.0;
        fighting.update(&mut ctx2, 0.1);

        // 0.3 + 0.05 vs 0.3 + 0.05 + 0.025
        assert!((calm.current_tension() - 0.35).abs() < 1e-5);
        assert!((fighting.current_tension() - 0.375).abs() < 1e-5);
    }

    #[test]
    fn test_releasing_lowers_tension() {
        let (mut reeling, mut ctx) = entered();
        reeling.update(&mut ctx, 0.5);
        assert!((reeling.current_tension() - 0.15).abs() < 1e-5);
        assert_eq!(reeling.reel_progress(), 0.0);
        reeling.update(&mut ctx, 5.0);
        assert_eq!(reeling.current_tension(), 0.0);
    }

    #[test]
    fn test_no_escape_roll_above_threshold() {
        let (mut reeling, mut ctx) = entered();
        ctx.draws.push_back(0.0);
        reeling.update(&mut ctx, 0.1);
        assert_eq!(ctx.draws_taken, 0);
        assert!(!reeling.fish_escaped());
    }

    #[test]
    fn test_slack_line_lets_fish_escape() {
        let (mut reeling, mut ctx) = entered();
        // 0.3 → 0.03: chance (1 - 0.3) · 0.9 = 0.63, fallback draw misses
        reeling.update(&mut ctx, 0.9);
        assert!(!reeling.fish_escaped());

        // Drained to zero: chance (1 - 0) · 0.5 = 0.5
        ctx.push_draws(&[0.6]);
        reeling.update(&mut ctx, 0.5);
        assert!(!reeling.fish_escaped(), "0.6 is above a 0.5 chance");

        ctx.push_draws(&[0.4]);
        reeling.update(&mut ctx, 0.5);
        assert!(reeling.fish_escaped());
        assert_eq!(reeling.next_state(&ctx), Transition::To(FishingState::Lost));
        assert_eq!(reeling.loss_reason(), Some(LostReason::FishEscaped));
    }

    #[test]
    fn test_holding_never_rolls_escape() {
        let mut ctx = ScriptedContext::default();
        let mut reeling = ReelingState::new(
            &ReelingConfig {
                starting_tension: 0.0,
                ..Default::default()
            },
            &SlackConfig::default(),
        );
        reeling.enter(&mut ctx);
        ctx.reel_held = true;
        ctx.push_draws(&[0.0]);
        reeling.update(&mut ctx, 0.01);
        assert!(!reeling.fish_escaped());
        assert_eq!(ctx.draws_taken, 0);
    }

    #[test]
    fn test_progress_stops_near_max_tension() {
        let mut ctx = ScriptedContext::default();
        let mut reeling = ReelingState::new(
            &ReelingConfig {
                starting_tension: 0.95,
                ..Default::default()
            },
            &SlackConfig::default(),
        );
        reeling.enter(&mut ctx);
        ctx.reel_held = true;
        reeling.update(&mut ctx, 0.05);
        assert_eq!(reeling.reel_progress(), 0.0);
        assert!(!reeling.line_snapped());
    }

    #[test]
    fn test_pulsed_reeling_lands_fish() {
        let (mut reeling, mut ctx) = entered();
        // Hold 3 frames, release 5: tension stays in the reel zone.
        let mut frames = 0;
        while !reeling.fish_caught() && frames < 200 {
            ctx.reel_held = frames % 8 < 3;
            reeling.update(&mut ctx, 0.125);
            frames += 1;
            assert!(!reeling.line_snapped());
            assert!(!reeling.fish_escaped());
        }
        assert!(reeling.fish_caught());
        assert_eq!(reeling.reel_progress(), 1.0);
        assert_eq!(frames, 41);
        assert_eq!(reeling.next_state(&ctx), Transition::To(FishingState::Caught));
        assert_eq!(reeling.loss_reason(), None);
    }

    #[test]
    fn test_slack_starts_on_check_interval() {
        let (mut reeling, mut ctx) = entered();
        for held in [true, false, true] {
            ctx.reel_held = held;
            reeling.update(&mut ctx, 0.5);
        }
        assert_eq!(ctx.draws_taken, 0);
        assert!(!reeling.in_slack());

        ctx.reel_held = false;
        ctx.push_draws(&[0.0]);
        reeling.update(&mut ctx, 0.5);
        assert_eq!(ctx.draws_taken, 1);
        assert!(reeling.in_slack());
    }

    #[test]
    fn test_slack_chance_scales_with_tension() {
        let config = ReelingConfig {
            slack_check_interval: 0.5,
            ..Default::default()
        };
        // Tension 0.55 after the frame: chance = 0.15 · (0.5 + 0.55) = 0.1575
        for (draw, expect_slack) in [(0.155, true), (0.16, false)] {
            let mut ctx = ScriptedContext::with_draws(&[draw]);
            let mut reeling = ReelingState::new(&config, &SlackConfig::default());
            reeling.enter(&mut ctx);
            ctx.reel_held = true;
            reeling.update(&mut ctx, 0.5);
            assert_eq!(reeling.in_slack(), expect_slack, "draw {}", draw);
        }
    }

    fn in_slack() -> (ReelingState, ScriptedContext) {
        let mut ctx = ScriptedContext::default();
        let mut reeling = ReelingState::new(
            &ReelingConfig {
                slack_check_interval: 0.5,
                slack_chance: 1.0,
                ..Default::default()
            },
            &SlackConfig::default(),
        );
        reeling.enter(&mut ctx);
        ctx.reel_held = true;
        ctx.push_draws(&[0.0]);
        reeling.update(&mut ctx, 0.5);
        assert!(reeling.in_slack());
        (reeling, ctx)
    }

    #[test]
    fn test_releasing_clears_slack_with_relief() {
        let (mut reeling, mut ctx) = in_slack();
        let before = reeling.current_tension();
        ctx.reel_held = false;
        reeling.update(&mut ctx, 0.15);
        assert!(reeling.in_slack());
        assert_eq!(reeling.current_tension(), before);
        reeling.update(&mut ctx, 0.15);
        assert!(!reeling.in_slack());
        assert!((reeling.current_tension() - (before - 0.1)).abs() < 1e-5);
        assert_eq!(reeling.next_state(&ctx), Transition::Pending);
    }

    #[test]
    fn test_holding_through_slack_ramps_double() {
        let (mut reeling, mut ctx) = in_slack();
        let before = reeling.current_tension();
        reeling.update(&mut ctx, 0.1);
        assert!((reeling.current_tension() - (before + 0.1)).abs() < 1e-5);
        assert_eq!(reeling.reel_progress(), 0.25);
    }

    #[test]
    fn test_holding_through_slack_snaps() {
        let (mut reeling, mut ctx) = in_slack();
        // Tension 0.55 rises 1.0/s while held in slack.
        for _ in 0..10 {
            reeling.update(&mut ctx, 0.1);
            if reeling.line_snapped() {
                break;
            }
        }
        assert!(reeling.line_snapped());
        assert_eq!(reeling.loss_reason(), Some(LostReason::LineSnapped));
        assert_eq!(reeling.next_state(&ctx), Transition::To(FishingState::Lost));
    }

    #[test]
    fn test_slack_deadline_fails_encounter() {
        let mut ctx = ScriptedContext::default();
        let mut reeling = ReelingState::new(
            &ReelingConfig {
                slack_check_interval: 0.5,
                slack_chance: 1.0,
                tension_increase_rate: 0.1,
                ..Default::default()
            },
            &SlackConfig {
                required_release: 0.3,
                max_duration: 0.5,
            },
        );
        reeling.enter(&mut ctx);
        ctx.reel_held = true;
        ctx.push_draws(&[0.0]);
        reeling.update(&mut ctx, 0.5);
        assert!(reeling.in_slack());

        reeling.update(&mut ctx, 0.25);
        reeling.update(&mut ctx, 0.25);
        assert!(reeling.line_snapped());
        assert_eq!(reeling.loss_reason(), Some(LostReason::SlackEventFailure));
    }

    #[test]
    fn test_config_clamping() {
        let reeling = ReelingState::new(
            &ReelingConfig {
                max_tension: -1.0,
                escape_threshold: 5.0,
                tension_increase_rate: 0.0,
                tension_decrease_rate: -2.0,
                ..Default::default()
            },
            &SlackConfig::default(),
        );
        assert_eq!(reeling.max_tension, 0.1);
        assert!((reeling.escape_threshold - 0.05).abs() < 1e-6);
        assert_eq!(reeling.tension_increase_rate, MIN_RATE);
        assert_eq!(reeling.tension_decrease_rate, MIN_RATE);
    }

    #[test]
    fn test_holding_snaps_after_sixty_fps_frames() {
        let (mut reeling, mut ctx) = entered();
        ctx.reel_held = true;

        run_frames(&mut reeling, &mut ctx, 83, FRAME_60);
        assert!(!reeling.line_snapped());
        assert_eq!(reeling.next_state(&ctx), Transition::Pending);
        reeling.update(&mut ctx, FRAME_60);
        assert!(reeling.line_snapped());
        assert!(!reeling.fish_caught());
        assert_eq!(reeling.next_state(&ctx), Transition::To(FishingState::Lost));
        assert_eq!(reeling.loss_reason(), Some(LostReason::LineSnapped));
    }
}
