//! User skin profile

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Skin type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    #[default]
    Normal,
    Sensitive,
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oily => write!(f, "oily"),
            Self::Dry => write!(f, "dry"),
            Self::Combination => write!(f, "combination"),
            Self::Normal => write!(f, "normal"),
            Self::Sensitive => write!(f, "sensitive"),
        }
    }
}

/// Age band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "<18")]
    Under18,
    #[serde(rename = "18-25")]
    From18To25,
    #[default]
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-55")]
    From46To55,
    #[serde(rename = "55+")]
    Over55,
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Under18 => write!(f, "<18"),
            Self::From18To25 => write!(f, "18-25"),
            Self::From26To35 => write!(f, "26-35"),
            Self::From36To45 => write!(f, "36-45"),
            Self::From46To55 => write!(f, "46-55"),
            Self::Over55 => write!(f, "55+"),
        }
    }
}

/// Stress level on a 1-10 scale (clamped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct StressLevel(u8);

impl StressLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Stress high enough to favor a soothing routine.
    pub fn is_high(&self) -> bool {
        self.0 >= 7
    }
}

impl Default for StressLevel {
    fn default() -> Self {
        Self(5)
    }
}

impl From<i64> for StressLevel {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<StressLevel> for u8 {
    fn from(level: StressLevel) -> Self {
        level.0
    }
}

/// Skin care goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinGoal {
    Hydration,
    AntiAcne,
    Radiance,
    AntiSpots,
    AntiAging,
    Soothing,
    Protection,
}

impl std::fmt::Display for SkinGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hydration => write!(f, "hydration"),
            Self::AntiAcne => write!(f, "anti-acne"),
            Self::Radiance => write!(f, "radiance"),
            Self::AntiSpots => write!(f, "anti-spots"),
            Self::AntiAging => write!(f, "anti-aging"),
            Self::Soothing => write!(f, "soothing"),
            Self::Protection => write!(f, "protection"),
        }
    }
}

/// Dermatological profile of the user.
///
/// Only edited explicitly by the user; the decision engine reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub skin_type: SkinType,
    #[serde(default)]
    pub age_band: AgeBand,
    #[serde(default)]
    pub stress_level: StressLevel,
    #[serde(default)]
    pub conditions: BTreeSet<String>,
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    #[serde(default)]
    pub goals: BTreeSet<SkinGoal>,
}

impl UserProfile {
    /// Adds a skin condition (trimmed, lowercased, blanks ignored).
    pub fn with_condition(mut self, condition: &str) -> Self {
        if let Some(c) = normalize(condition) {
            self.conditions.insert(c);
        }
        self
    }

    /// Adds an allergy (trimmed, lowercased, blanks ignored).
    pub fn with_allergy(mut self, allergy: &str) -> Self {
        if let Some(a) = normalize(allergy) {
            self.allergies.insert(a);
        }
        self
    }

    pub fn with_goal(mut self, goal: SkinGoal) -> Self {
        self.goals.insert(goal);
        self
    }
}

fn normalize(value: &str) -> Option<String> {
    let v = value.trim().to_lowercase();
    (!v.is_empty()).then_some(v)
}
