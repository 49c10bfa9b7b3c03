//! Retention policy for the recent partition.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Default age after which a recent record is archived.
pub const DEFAULT_RETENTION_DAYS: i64 = 14;

/// Where a record lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Recent,
    Archive,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Recent => "recent",
            Partition::Archive => "archive",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides when a recent record becomes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_age: Duration,
}

impl RetentionPolicy {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn days(days: i64) -> Self {
        Self::new(Duration::try_days(days).unwrap_or(Duration::MAX))
    }

    /// Strictly older than `max_age`; a record exactly `max_age` old stays recent.
    pub fn is_stale(&self, created_at: Timestamp, now: Timestamp) -> bool {
        now.duration_since(&created_at) > self.max_age
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::days(DEFAULT_RETENTION_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_strict() {
        let policy = RetentionPolicy::default();
        let now = Timestamp::now();

        assert!(!policy.is_stale(now.minus_days(14), now));
        assert!(policy.is_stale(now.minus_days(14).minus_secs(1), now));
        assert!(!policy.is_stale(now.minus_days(13), now));
        assert!(policy.is_stale(now.minus_days(20), now));
    }

    #[test]
    fn future_records_are_never_stale() {
        let now = Timestamp::now();
        assert!(!RetentionPolicy::default().is_stale(now.plus_days(3), now));
    }

    #[test]
    fn huge_retention_saturates_instead_of_panicking() {
        let policy = RetentionPolicy::days(i64::MAX);
        let now = Timestamp::now();

        assert_eq!(policy.max_age, Duration::MAX);
        assert!(!policy.is_stale(now.minus_days(3650), now));
    }

    #[test]
    fn partition_names() {
        assert_eq!(Partition::Recent.to_string(), "recent");
        assert_eq!(Partition::Archive.to_string(), "archive");
    }
}
