use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// FISHING STATS: per-session encounter tallies
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FishingStats {
    pub casts: u32,
    pub bites: u32,
    pub hooks_set: u32,
    pub slack_events: u32,
    pub catches: u32,
    pub losses: HashMap<LostReason, u32>,
}

impl FishingStats {
    pub fn total_losses(&self) -> u32 {
        self.losses.values().sum()
    }

    pub fn losses_for(&self, reason: LostReason) -> u32 {
        self.losses.get(&reason).copied().unwrap_or(0)
    }

    /// Fraction of finished encounters that ended with a fish, 0.0 before any.
    pub fn catch_rate(&self) -> f32 {
        let finished = self.catches + self.total_losses();
        if finished == 0 {
            0.0
        } else {
            self.catches as f32 / finished as f32
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Reads phase changes and results and updates `FishingStats`.
pub fn record_fishing_stats(
    mut phase_events: EventReader<FishingPhaseChangedEvent>,
    mut slack_events: EventReader<FishingSlackStartedEvent>,
    mut caught_events: EventReader<FishCaughtEvent>,
    mut lost_events: EventReader<FishLostEvent>,
    mut stats: ResMut<FishingStats>,
) {
    for ev in phase_events.read() {
        match ev.to {
            FishingState::Casting => stats.casts = stats.casts.saturating_add(1),
            FishingState::HookOpportunity => stats.bites = stats.bites.saturating_add(1),
            FishingState::Hooked => stats.hooks_set = stats.hooks_set.saturating_add(1),
            _ => {}
        }
    }

    for _ in slack_events.read() {
        stats.slack_events = stats.slack_events.saturating_add(1);
    }

    for _ in caught_events.read() {
        stats.catches = stats.catches.saturating_add(1);
        info!(
            "[Fishing/Stats] Catch #{} ({} casts so far)",
            stats.catches, stats.casts
        );
    }

    for ev in lost_events.read() {
        let count = stats.losses.entry(ev.reason).or_insert(0);
        *count = count.saturating_add(1);
        info!(
            "[Fishing/Stats] Lost a fish ({:?}), {} losses total",
            ev.reason,
            stats.total_losses()
        );
    }
}
