//! AI Adapters.
//!
//! Implementations of the `RoutineAugmenter` and `ProductAttributeExtractor` ports.
//!
//! ## Available Adapters
//!
//! - `GeminiClient` - Google Gemini models
//! - `MockAugmenter` - Configurable mock for testing

mod gemini_client;
mod mock_augmenter;

pub use gemini_client::{GeminiClient, GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use mock_augmenter::{MockAugmenter, MockReply};
