//! Routine - the decision engine's output.

use serde::{Deserialize, Serialize};

use super::Alert;
use crate::domain::catalog::{ProductName, RoutineSlot};

/// Products and alerts chosen for one slot of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentSelection {
    pub slot: RoutineSlot,
    /// Products in application order.
    pub products: Vec<ProductName>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl MomentSelection {
    pub fn empty(slot: RoutineSlot) -> Self {
        Self {
            slot,
            products: Vec::new(),
            alerts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.products.iter().any(|p| p.matches(name))
    }
}

/// A full day: morning, midday and evening selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub morning: MomentSelection,
    pub midday: MomentSelection,
    pub evening: MomentSelection,
    /// Optional explanation, set by routine augmentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Routine {
    pub fn new(morning: MomentSelection, midday: MomentSelection, evening: MomentSelection) -> Self {
        Self {
            morning,
            midday,
            evening,
            summary: None,
        }
    }

    pub fn selection(&self, slot: RoutineSlot) -> &MomentSelection {
        match slot {
            RoutineSlot::Morning => &self.morning,
            RoutineSlot::Midday => &self.midday,
            RoutineSlot::Evening => &self.evening,
        }
    }

    pub fn selection_mut(&mut self, slot: RoutineSlot) -> &mut MomentSelection {
        match slot {
            RoutineSlot::Morning => &mut self.morning,
            RoutineSlot::Midday => &mut self.midday,
            RoutineSlot::Evening => &mut self.evening,
        }
    }

    /// Selections in slot order.
    pub fn selections(&self) -> [&MomentSelection; 3] {
        [&self.morning, &self.midday, &self.evening]
    }

    /// Every alert across the day, in slot order.
    pub fn all_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.selections().into_iter().flat_map(|s| s.alerts.iter())
    }
}
