//! Every tunable number in the encounter, loadable from a RON file.
//!
//! Missing fields fall back to their defaults, so a tuning file only needs to
//! list what it changes:
//!
//! ```ron
//! (
//!     bite_check: (base_bite_probability: 0.5),
//!     reeling: (slack_chance: 0.0),
//! )
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::states::{
    BiteCheckConfig, CastingConfig, CaughtConfig, HookOpportunityConfig, HookedConfig,
    LostConfig, LureDriftConfig, MicroTwitchConfig, ReelingConfig, SlackConfig,
    StillnessConfig,
};

/// Default location the binary reads tuning from.
pub const DEFAULT_TUNING_PATH: &str = "assets/fishing/tuning.ron";

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingTuning {
    pub casting: CastingConfig,
    pub lure_drift: LureDriftConfig,
    pub stillness: StillnessConfig,
    pub micro_twitch: MicroTwitchConfig,
    pub bite_check: BiteCheckConfig,
    pub hook_opportunity: HookOpportunityConfig,
    pub hooked: HookedConfig,
    pub reeling: ReelingConfig,
    /// Shared by the standalone slack state and slack during reeling.
    pub slack: SlackConfig,
    pub lost: LostConfig,
    pub caught: CaughtConfig,
}

impl FishingTuning {
    pub fn from_ron_str(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|e| format!("Tuning parse failed: {}", e))
    }

    pub fn to_ron_string(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("Tuning serialization failed: {}", e))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_ron_str(&text)
    }

    /// Load tuning, falling back to defaults (with a warning) on any failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                info!("[Fishing] Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                warn!("[Fishing] {}, using default tuning", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tuning_is_default() {
        let tuning = FishingTuning::from_ron_str("()").unwrap();
        assert_eq!(tuning, FishingTuning::default());
    }

    #[test]
    fn test_partial_tuning_keeps_other_defaults() {
        let tuning = FishingTuning::from_ron_str(
            "(bite_check: (base_bite_probability: 0.9), hook_opportunity: (window_duration: 1.2))",
        )
        .unwrap();
        assert_eq!(tuning.bite_check.base_bite_probability, 0.9);
        assert_eq!(tuning.bite_check.check_duration, 0.5);
        assert_eq!(tuning.hook_opportunity.window_duration, 1.2);
        assert_eq!(tuning.hook_opportunity.early_window, 0.1);
        assert_eq!(tuning.reeling, ReelingConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut tuning = FishingTuning::default();
        tuning.reeling.slack_chance = 0.0;
        tuning.caught.display_duration = 4.0;
        let text = tuning.to_ron_string().unwrap();
        assert_eq!(FishingTuning::from_ron_str(&text).unwrap(), tuning);
    }

    #[test]
    fn test_malformed_tuning_reports_error() {
        let err = FishingTuning::from_ron_str("(reeling: (max_tension: \"high\"))").unwrap_err();
        assert!(err.starts_with("Tuning parse failed"), "{}", err);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        assert!(FishingTuning::load("does/not/exist.ron").is_err());
        assert_eq!(
            FishingTuning::load_or_default("does/not/exist.ron"),
            FishingTuning::default()
        );
    }

    #[test]
    fn test_shipped_tuning_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_TUNING_PATH);
        let tuning = FishingTuning::load(&path).unwrap();
        assert_eq!(tuning.stillness.stillness_threshold, 3.0);
    }
}
