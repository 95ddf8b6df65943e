//! Shared resources, events, and labels for the fishing encounter.
//!
//! This is the type contract. The state machine core, the input layer, and any
//! presentation layer built on top all import from here.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// FISHING LABELS: transition vocabulary of the encounter
// ═══════════════════════════════════════════════════════════════════════

/// Every state an encounter can be in.
///
/// Only ever used as a label returned to the driver; the behaviour lives in the
/// state objects held by [`crate::fishing::FishingMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FishingState {
    #[default]
    Idle,
    Casting,
    LureDrift,
    Stillness,
    MicroTwitch,
    BiteCheck,
    HookOpportunity,
    Hooked,
    Reeling,
    SlackEvent,
    Lost,
    Caught,
}

impl FishingState {
    pub const ALL: [FishingState; 12] = [
        FishingState::Idle,
        FishingState::Casting,
        FishingState::LureDrift,
        FishingState::Stillness,
        FishingState::MicroTwitch,
        FishingState::BiteCheck,
        FishingState::HookOpportunity,
        FishingState::Hooked,
        FishingState::Reeling,
        FishingState::SlackEvent,
        FishingState::Lost,
        FishingState::Caught,
    ];

    /// True while a fish is on the line.
    pub fn is_fighting(self) -> bool {
        matches!(
            self,
            FishingState::Hooked | FishingState::Reeling | FishingState::SlackEvent
        )
    }

    /// True for the two result-display states.
    pub fn is_terminal(self) -> bool {
        matches!(self, FishingState::Lost | FishingState::Caught)
    }
}

/// Why an encounter ended in [`FishingState::Lost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LostReason {
    #[default]
    Unknown,
    MissedHook,
    EarlyHook,
    LineSnapped,
    FishEscaped,
    SlackEventFailure,
}

impl LostReason {
    pub const ALL: [LostReason; 6] = [
        LostReason::Unknown,
        LostReason::MissedHook,
        LostReason::EarlyHook,
        LostReason::LineSnapped,
        LostReason::FishEscaped,
        LostReason::SlackEventFailure,
    ];

    pub fn message(self) -> &'static str {
        match self {
            LostReason::Unknown => "The fish got away.",
            LostReason::MissedHook => "Too slow! The fish spat the hook.",
            LostReason::EarlyHook => "Too early! You pulled the lure away.",
            LostReason::LineSnapped => "Snap! The line broke.",
            LostReason::FishEscaped => "The line went slack and the fish escaped.",
            LostReason::SlackEventFailure => "You fought the slack and lost the fish.",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT: per-frame signals written by the input layer
// ═══════════════════════════════════════════════════════════════════════

/// Player actions for the current frame.
///
/// Edge flags (`cast_pressed`, `cancel_pressed`) are true for exactly one frame;
/// the input layer resets the whole struct before reading hardware again.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FishingInput {
    /// Cast / hook / twitch action, edge-triggered.
    pub cast_pressed: bool,
    /// Reel button, level-triggered.
    pub reel_held: bool,
    /// Abandon the current encounter, edge-triggered.
    pub cancel_pressed: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub cast: KeyCode,
    pub reel: KeyCode,
    pub cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            cast: KeyCode::Space,
            reel: KeyCode::Space,
            cancel: KeyCode::Escape,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MODIFIERS: gameplay values owned by the surrounding game
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FishingModifiers {
    /// Additive multiplier on the base bite chance (0.0 = unchanged, 0.5 = +50%).
    pub bite_probability_modifier: f32,
    /// How hard the hooked fish is pulling; scales tension gain while reeling.
    pub fish_struggle_intensity: f32,
    /// World position of the lure (or the rod tip before a cast).
    pub lure_position: Vec2,
}

impl Default for FishingModifiers {
    fn default() -> Self {
        Self {
            bite_probability_modifier: 0.0,
            fish_struggle_intensity: 0.0,
            lure_position: Vec2::ZERO,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: what the encounter tells the rest of the game
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct FishingPhaseChangedEvent {
    pub from: FishingState,
    pub to: FishingState,
}

/// Slack appeared on the line, either mid-reel or as its own state.
#[derive(Event, Debug, Clone)]
pub struct FishingSlackStartedEvent;

#[derive(Event, Debug, Clone)]
pub struct FishCaughtEvent {
    /// Where the lure landed for this encounter.
    pub landing_position: Vec2,
}

#[derive(Event, Debug, Clone)]
pub struct FishLostEvent {
    pub reason: LostReason,
}

/// Tear the encounter down and return to Idle.
#[derive(Event, Debug, Clone)]
pub struct CancelFishingEvent;
