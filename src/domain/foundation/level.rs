//! Level value object for 1-5 product scales (occlusivity, cleansing power).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A product intensity on a 1 (lightest) to 5 (strongest) scale.
///
/// Out-of-range inputs are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a Level, clamping the value into [1, 5].
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(3)
    }
}

impl From<i64> for Level {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_keeps_in_range_values() {
        for v in 1..=5 {
            assert_eq!(Level::clamped(v).value(), v as u8);
        }
    }

    #[test]
    fn level_clamps_out_of_range_values() {
        assert_eq!(Level::clamped(0).value(), 1);
        assert_eq!(Level::clamped(-7).value(), 1);
        assert_eq!(Level::clamped(9).value(), 5);
    }

    #[test]
    fn level_defaults_to_three() {
        assert_eq!(Level::default().value(), 3);
    }

    #[test]
    fn level_deserializes_with_clamping() {
        let level: Level = serde_json::from_str("12").unwrap();
        assert_eq!(level.value(), 5);
        assert_eq!(serde_json::to_string(&level).unwrap(), "5");
    }
}
