//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - JSON files and in-memory stores for history, catalog and profile
//! - `environment` - Open-Meteo readings and the offline cache
//! - `ai` - Gemini client and test doubles

pub mod ai;
pub mod environment;
pub mod storage;

pub use ai::{GeminiClient, GeminiConfig, MockAugmenter, MockReply};
pub use environment::{CachedEnvironmentSource, OpenMeteoConfig, OpenMeteoSource};
pub use storage::{
    FileCatalogRepository, FileHistoryStore, FileProfileRepository, InMemoryHistoryStore,
};
