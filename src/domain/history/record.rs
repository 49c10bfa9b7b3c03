//! Analysis record - one persisted decision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::environment::EnvironmentalSnapshot;
use crate::domain::foundation::{AnalysisId, Timestamp, ValidationError};
use crate::domain::routine::Routine;

/// How the analysis was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Profile and environment only.
    #[default]
    Quick,
    /// Profile, environment and a daily context.
    Detailed,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Quick => "quick",
            AnalysisMode::Detailed => "detailed",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" | "rapide" => Ok(AnalysisMode::Quick),
            "detailed" | "detaillee" | "détaillée" => Ok(AnalysisMode::Detailed),
            other => Err(ValidationError::unknown_variant(
                "mode",
                other,
                "quick, detailed",
            )),
        }
    }
}

/// A routine together with the conditions it was decided under.
///
/// # Invariants
///
/// - `id` is unique across both history partitions
/// - Immutable once created; only moved between partitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    id: AnalysisId,
    created_at: Timestamp,
    routine: Routine,
    environment: EnvironmentalSnapshot,
    mode: AnalysisMode,
}

impl AnalysisRecord {
    /// Creates a record with a fresh time-ordered id.
    pub fn new(
        routine: Routine,
        environment: EnvironmentalSnapshot,
        mode: AnalysisMode,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: AnalysisId::new(),
            created_at,
            routine,
            environment,
            mode,
        }
    }

    pub fn id(&self) -> AnalysisId {
        self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn environment(&self) -> &EnvironmentalSnapshot {
        &self.environment
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::RoutineSlot;
    use crate::domain::foundation::LocationId;
    use crate::domain::routine::MomentSelection;

    fn routine() -> Routine {
        Routine::new(
            MomentSelection::empty(RoutineSlot::Morning),
            MomentSelection::empty(RoutineSlot::Midday),
            MomentSelection::empty(RoutineSlot::Evening),
        )
    }

    fn snapshot() -> EnvironmentalSnapshot {
        EnvironmentalSnapshot::new(
            LocationId::new("paris-france").unwrap(),
            Timestamp::now(),
            4.5,
            62.0,
            None,
            18.0,
        )
        .unwrap()
    }

    #[test]
    fn new_records_get_distinct_ids() {
        let now = Timestamp::now();
        let a = AnalysisRecord::new(routine(), snapshot(), AnalysisMode::Quick, now);
        let b = AnalysisRecord::new(routine(), snapshot(), AnalysisMode::Quick, now);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn json_persistence_preserves_every_field() {
        let record = AnalysisRecord::new(routine(), snapshot(), AnalysisMode::Detailed, Timestamp::now());

        let json = serde_json::to_string(&record).unwrap();
        let back: AnalysisRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back, record);
        assert!(json.contains("\"mode\":\"detailed\""));
    }

    #[test]
    fn mode_parses_french_and_english() {
        assert_eq!("Rapide".parse::<AnalysisMode>().unwrap(), AnalysisMode::Quick);
        assert_eq!("detailed".parse::<AnalysisMode>().unwrap(), AnalysisMode::Detailed);
        assert!("full".parse::<AnalysisMode>().is_err());
    }
}
