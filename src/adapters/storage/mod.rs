//! Storage Adapters
//!
//! JSON-file and in-memory implementations of the persistence ports.
//!
//! ## Available Adapters
//!
//! - **FileHistoryStore** - One JSON file per history partition
//! - **InMemoryHistoryStore** - History partitions in memory (testing/development)
//! - **FileCatalogRepository** - Product catalog as a JSON array of drafts
//! - **FileProfileRepository** - User profile as a JSON object
//!
//! Every file write goes through a temporary file and a rename, so a crash
//! never leaves a half-written file behind.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileHistoryStore, InMemoryHistoryStore};
//!
//! // Production: file-based storage
//! let store = FileHistoryStore::in_dir("./user_data");
//!
//! // Testing: in-memory storage
//! let store = InMemoryHistoryStore::new();
//! ```

mod file_catalog_repository;
mod file_history_store;
mod file_profile_repository;
mod in_memory_history_store;
pub(crate) mod json_file;

pub use file_catalog_repository::{FileCatalogRepository, DEFAULT_CATALOG_FILE};
pub use file_history_store::{FileHistoryStore, DEFAULT_ARCHIVE_FILE, DEFAULT_RECENT_FILE};
pub use file_profile_repository::{FileProfileRepository, DEFAULT_PROFILE_FILE};
pub use in_memory_history_store::InMemoryHistoryStore;
