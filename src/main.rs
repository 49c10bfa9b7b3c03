//! `dermalogic` - runs one analysis for the configured location and prints
//! the recorded analysis as JSON on stdout.
//!
//! Without arguments the analysis is quick. Any arguments are joined into
//! today's instructions and switch to detailed mode:
//!
//! ```text
//! dermalogic
//! dermalogic "journée à la plage, peau tiraillée"
//! ```

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dermalogic::adapters::{
    CachedEnvironmentSource, FileCatalogRepository, FileHistoryStore, FileProfileRepository,
    GeminiClient, OpenMeteoSource,
};
use dermalogic::application::{HistoryManager, RunAnalysisCommand, RunAnalysisHandler};
use dermalogic::config::{AppConfig, LoggingConfig};
use dermalogic::domain::profile::DailyContext;
use dermalogic::ports::EnvironmentSource;

fn init_tracing(logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(logging.env_filter());
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn environment_source(config: &AppConfig) -> Result<Arc<dyn EnvironmentSource>, Box<dyn Error>> {
    let live: Arc<dyn EnvironmentSource> = Arc::new(OpenMeteoSource::new(config.weather.open_meteo())?);
    if !config.features.enable_offline_cache {
        return Ok(live);
    }

    let mut cached = CachedEnvironmentSource::new(live)
        .with_cache_file(config.storage.data_file(&config.weather.cache_file));
    if let Some(max_age) = config.weather.cache_max_age() {
        cached = cached.with_max_age(max_age);
    }
    Ok(Arc::new(cached))
}

fn command_from_args(config: &AppConfig) -> Result<RunAnalysisCommand, Box<dyn Error>> {
    let location = config.location.to_location()?;
    let instructions = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if instructions.trim().is_empty() {
        Ok(RunAnalysisCommand::quick(location))
    } else {
        Ok(RunAnalysisCommand::detailed(location, DailyContext::new(instructions)))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    let storage = &config.storage;
    let history_store = Arc::new(FileHistoryStore::new(
        storage.recent_path(),
        storage.archive_path(),
    ));
    let history = Arc::new(HistoryManager::open(history_store, storage.retention_policy()).await?);

    let mut handler = RunAnalysisHandler::new(
        Arc::new(FileProfileRepository::new(storage.profile_path())),
        Arc::new(FileCatalogRepository::new(storage.catalog_path())),
        environment_source(&config)?,
        history,
    );

    match config.ai.gemini() {
        Some(gemini) if config.augmentation_enabled() => {
            info!(model = %gemini.model, "AI augmentation enabled");
            handler = handler.with_augmenter(Arc::new(GeminiClient::new(gemini)?));
        }
        _ if config.features.enable_ai_augmentation => {
            warn!("No Gemini API key configured, running without AI augmentation");
        }
        _ => {}
    }

    let command = command_from_args(&config)?;
    info!(location = %command.location, mode = %command.mode(), "Running analysis");

    let result = handler.handle(command).await?;
    info!(
        analysis_id = %result.record.id(),
        filters = ?result.applied_filters,
        augmentation = ?result.augmentation,
        "Analysis recorded"
    );

    println!("{}", serde_json::to_string_pretty(&result.record)?);
    Ok(())
}
