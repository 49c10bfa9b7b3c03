//! Routine Augmenter Port - Optional enrichment of a deterministic routine.
//!
//! Augmenters are a soft dependency: callers must treat every
//! `AugmentError` as "keep the deterministic routine", and must pass any
//! returned routine through
//! [`AugmentationGuard`](crate::domain::decision::AugmentationGuard).

use async_trait::async_trait;

use crate::domain::catalog::ProductDraft;
use crate::domain::environment::EnvironmentalSnapshot;
use crate::domain::history::AnalysisRecord;
use crate::domain::profile::{DailyContext, UserProfile};
use crate::domain::routine::Routine;

/// Errors from augmentation providers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AugmentError {
    /// Provider could not be reached or refused the request.
    #[error("augmenter unavailable: {0}")]
    Unavailable(String),

    /// No credentials or endpoint configured.
    #[error("augmenter not configured")]
    NotConfigured,

    /// Provider answered with something that is not a routine.
    #[error("invalid augmenter response: {0}")]
    InvalidResponse(String),
}

/// Everything an augmenter may look at.
#[derive(Debug, Clone)]
pub struct AugmentationRequest {
    /// Deterministic routine to reorder or annotate.
    pub routine: Routine,
    pub profile: UserProfile,
    pub environment: EnvironmentalSnapshot,
    /// Present only in detailed mode.
    pub context: Option<DailyContext>,
    /// Latest analyses, newest first.
    pub recent_history: Vec<AnalysisRecord>,
}

/// Port for routine augmentation.
#[async_trait]
pub trait RoutineAugmenter: Send + Sync {
    /// Return a reordered/annotated version of `request.routine`.
    async fn augment(&self, request: AugmentationRequest) -> Result<Routine, AugmentError>;
}

/// Port for AI-proposed product attributes.
#[async_trait]
pub trait ProductAttributeExtractor: Send + Sync {
    /// Propose attributes for a product known only by name.
    ///
    /// The draft is unvalidated; callers convert it with `Product::try_from`.
    async fn propose(&self, product_name: &str) -> Result<ProductDraft, AugmentError>;
}
