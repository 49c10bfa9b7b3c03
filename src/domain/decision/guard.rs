//! Augmentation guard - keeps external suggestions inside the deterministic result.
//!
//! An augmented routine may reorder products within a slot and add
//! explanations. It may never add, drop or move a product across slots.

use thiserror::Error;

use crate::domain::catalog::{ProductName, RoutineSlot};
use crate::domain::routine::{MomentSelection, Routine};

/// Why an augmented routine was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardViolation {
    #[error("{slot}: '{product}' was not selected by the decision engine")]
    UnknownProduct { slot: RoutineSlot, product: String },

    #[error("{slot}: '{product}' is missing from the augmented routine")]
    MissingProduct { slot: RoutineSlot, product: String },

    #[error("{slot}: '{product}' appears more than once")]
    DuplicateProduct { slot: RoutineSlot, product: String },
}

/// Validates augmented routines against the deterministic one.
pub struct AugmentationGuard;

impl AugmentationGuard {
    /// Accepts `augmented` if every slot is a permutation of the matching
    /// deterministic slot.
    ///
    /// The returned routine uses the augmented order and summary, the
    /// deterministic product names (canonical casing) and the deterministic
    /// alerts followed by any new augmented alerts.
    pub fn accept(deterministic: &Routine, augmented: &Routine) -> Result<Routine, GuardViolation> {
        let mut accepted = Routine::new(
            Self::merge_slot(&deterministic.morning, &augmented.morning)?,
            Self::merge_slot(&deterministic.midday, &augmented.midday)?,
            Self::merge_slot(&deterministic.evening, &augmented.evening)?,
        );
        accepted.summary = augmented
            .summary
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| deterministic.summary.clone());
        Ok(accepted)
    }

    fn merge_slot(
        deterministic: &MomentSelection,
        augmented: &MomentSelection,
    ) -> Result<MomentSelection, GuardViolation> {
        let slot = deterministic.slot;
        let mut products: Vec<ProductName> = Vec::with_capacity(deterministic.products.len());

        for name in &augmented.products {
            let canonical = deterministic
                .products
                .iter()
                .find(|p| p.matches(name.as_str()))
                .ok_or_else(|| GuardViolation::UnknownProduct {
                    slot,
                    product: name.to_string(),
                })?;
            if products.contains(canonical) {
                return Err(GuardViolation::DuplicateProduct {
                    slot,
                    product: canonical.to_string(),
                });
            }
            products.push(canonical.clone());
        }

        if let Some(missing) = deterministic.products.iter().find(|p| !products.contains(p)) {
            return Err(GuardViolation::MissingProduct {
                slot,
                product: missing.to_string(),
            });
        }

        let mut alerts = deterministic.alerts.clone();
        for alert in &augmented.alerts {
            if !alerts.contains(alert) {
                alerts.push(alert.clone());
            }
        }

        Ok(MomentSelection {
            slot,
            products,
            alerts,
        })
    }
}
