//! Per-day context supplied in detailed analysis mode.

use serde::{Deserialize, Serialize};

use super::{StressLevel, UserProfile};

/// Free-form instructions for today plus an optional stress override.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyContext {
    pub instructions: String,
    #[serde(default)]
    pub stress_override: Option<StressLevel>,
}

impl DailyContext {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into().trim().to_string(),
            stress_override: None,
        }
    }

    pub fn with_stress(mut self, level: StressLevel) -> Self {
        self.stress_override = Some(level);
        self
    }

    /// Today's stress: the override if given, else the profile's level.
    pub fn effective_stress(&self, profile: &UserProfile) -> StressLevel {
        self.stress_override.unwrap_or(profile.stress_level)
    }
}
