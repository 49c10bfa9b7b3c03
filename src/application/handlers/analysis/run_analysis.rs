//! RunAnalysisHandler - Command handler for one end-to-end analysis.
//!
//! Flow: load profile and catalog, fetch the environment, run the decision
//! engine, optionally augment (guarded), record in history.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::history_manager::{HistoryError, HistoryManager};
use crate::domain::decision::{AppliedFilter, AugmentationGuard, DecisionEngine, DecisionError};
use crate::domain::environment::{EnvironmentalSnapshot, Location};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::history::{AnalysisMode, AnalysisRecord};
use crate::domain::profile::{DailyContext, UserProfile};
use crate::domain::routine::Routine;
use crate::ports::{
    AugmentError, AugmentationRequest, CatalogRepository, EnvironmentError, EnvironmentSource,
    ProfileRepository, RoutineAugmenter, StorageError,
};

/// Number of past analyses handed to the augmenter.
pub const RECENT_CONTEXT_SIZE: usize = 3;

/// Command to run an analysis.
#[derive(Debug, Clone)]
pub struct RunAnalysisCommand {
    /// Where to sample the environment.
    pub location: Location,
    /// Today's context; present means detailed mode.
    pub context: Option<DailyContext>,
}

impl RunAnalysisCommand {
    pub fn quick(location: Location) -> Self {
        Self {
            location,
            context: None,
        }
    }

    pub fn detailed(location: Location, context: DailyContext) -> Self {
        Self {
            location,
            context: Some(context),
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        if self.context.is_some() {
            AnalysisMode::Detailed
        } else {
            AnalysisMode::Quick
        }
    }
}

/// How the augmentation step went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AugmentationOutcome {
    /// No augmenter wired in.
    Skipped,
    /// Augmented routine accepted by the guard.
    Applied,
    /// Augmenter failed or was refused; deterministic routine kept.
    FellBack(String),
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct RunAnalysisResult {
    /// The persisted record.
    pub record: AnalysisRecord,
    /// Filters that fired for this environment.
    pub applied_filters: Vec<AppliedFilter>,
    pub augmentation: AugmentationOutcome,
}

/// Error type for running an analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RunAnalysisError {
    #[error("Failed to load user data: {0}")]
    Storage(#[from] StorageError),

    #[error("Environment unavailable: {0}")]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Decision(#[from] DecisionError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl From<RunAnalysisError> for DomainError {
    fn from(err: RunAnalysisError) -> Self {
        match err {
            RunAnalysisError::Storage(e) => DomainError::new(ErrorCode::StorageError, e.to_string()),
            RunAnalysisError::Environment(EnvironmentError::Validation(v)) => v.into(),
            RunAnalysisError::Environment(e) => DomainError::new(ErrorCode::NetworkError, e.to_string()),
            RunAnalysisError::Decision(e) => DomainError::new(ErrorCode::EmptyCatalog, e.to_string()),
            RunAnalysisError::History(e) => e.into(),
        }
    }
}

/// Handler for running analyses.
pub struct RunAnalysisHandler {
    profile_repository: Arc<dyn ProfileRepository>,
    catalog_repository: Arc<dyn CatalogRepository>,
    environment_source: Arc<dyn EnvironmentSource>,
    history: Arc<HistoryManager>,
    augmenter: Option<Arc<dyn RoutineAugmenter>>,
}

impl RunAnalysisHandler {
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        catalog_repository: Arc<dyn CatalogRepository>,
        environment_source: Arc<dyn EnvironmentSource>,
        history: Arc<HistoryManager>,
    ) -> Self {
        Self {
            profile_repository,
            catalog_repository,
            environment_source,
            history,
            augmenter: None,
        }
    }

    /// Enables routine augmentation.
    pub fn with_augmenter(mut self, augmenter: Arc<dyn RoutineAugmenter>) -> Self {
        self.augmenter = Some(augmenter);
        self
    }

    pub async fn handle(&self, cmd: RunAnalysisCommand) -> Result<RunAnalysisResult, RunAnalysisError> {
        let mode = cmd.mode();

        // 1. Load user data
        let profile = self.profile_repository.load().await?;
        let catalog = self.catalog_repository.load().await?;

        // 2. Sample the environment
        let environment = self.environment_source.fetch_snapshot(&cmd.location).await?;

        // 3. Deterministic decision
        let routine = DecisionEngine::decide(&profile, &catalog, &environment, cmd.context.as_ref())?;
        let applied_filters = DecisionEngine::applied_filters(&environment);

        // 4. Optional augmentation, never allowed to fail the analysis
        let (routine, augmentation) = self
            .augment(routine, &profile, &environment, cmd.context)
            .await?;

        // 5. Persist
        let record = self.history.record(routine, environment, mode).await?;

        info!(
            analysis_id = %record.id(),
            mode = %mode,
            location = %cmd.location,
            augmentation = ?augmentation,
            "Analysis completed"
        );

        Ok(RunAnalysisResult {
            record,
            applied_filters,
            augmentation,
        })
    }

    async fn augment(
        &self,
        deterministic: Routine,
        profile: &UserProfile,
        environment: &EnvironmentalSnapshot,
        context: Option<DailyContext>,
    ) -> Result<(Routine, AugmentationOutcome), HistoryError> {
        let Some(augmenter) = &self.augmenter else {
            return Ok((deterministic, AugmentationOutcome::Skipped));
        };

        let request = AugmentationRequest {
            routine: deterministic.clone(),
            profile: profile.clone(),
            environment: environment.clone(),
            context,
            recent_history: self.history.list_recent_n(RECENT_CONTEXT_SIZE).await?,
        };

        let outcome = match augmenter.augment(request).await {
            Ok(augmented) => match AugmentationGuard::accept(&deterministic, &augmented) {
                Ok(accepted) => return Ok((accepted, AugmentationOutcome::Applied)),
                Err(violation) => {
                    warn!(%violation, "Augmented routine rejected, keeping deterministic routine");
                    violation.to_string()
                }
            },
            Err(AugmentError::NotConfigured) => {
                debug!("Augmenter not configured, keeping deterministic routine");
                AugmentError::NotConfigured.to_string()
            }
            Err(error) => {
                warn!(%error, "Augmentation failed, keeping deterministic routine");
                error.to_string()
            }
        };

        Ok((deterministic, AugmentationOutcome::FellBack(outcome)))
    }
}
