//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Let Gemini reorder and annotate the deterministic routine
    #[serde(default = "default_true")]
    pub enable_ai_augmentation: bool,

    /// Serve the last known snapshot when Open-Meteo is unreachable
    #[serde(default = "default_true")]
    pub enable_offline_cache: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_ai_augmentation: true,
            enable_offline_cache: true,
        }
    }
}

fn default_true() -> bool {
    true
}
