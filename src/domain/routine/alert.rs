//! Advisory alerts attached to routine slots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an alert was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Photosensitizing products were dropped because of high UV.
    UvPhotosensitiveExcluded,
    /// Polluted air: double-cleanse in the evening.
    DoubleCleansing,
    /// Polluted air but no evening cleanser survived filtering.
    NoCleanserAvailable,
    /// Nothing in the catalog fits this slot.
    EmptySelection,
    /// Free-form advice added by routine augmentation.
    Advisory,
}

/// A user-facing advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn uv_photosensitive_excluded() -> Self {
        Self::new(
            AlertKind::UvPhotosensitiveExcluded,
            "UV élevé — actifs photosensibilisants exclus du jour",
        )
    }

    pub fn double_cleansing(cleanser: &str) -> Self {
        Self::new(
            AlertKind::DoubleCleansing,
            format!("Pollution élevée — double nettoyage recommandé ce soir avec {}", cleanser),
        )
    }

    pub fn no_cleanser_available() -> Self {
        Self::new(
            AlertKind::NoCleanserAvailable,
            "Pollution élevée — aucun nettoyant disponible pour le soir",
        )
    }

    pub fn empty_selection() -> Self {
        Self::new(
            AlertKind::EmptySelection,
            "Aucun produit adapté pour ce moment de la journée",
        )
    }

    pub fn advisory(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Advisory, message)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
