//! Advisory item suggestions: a local catalog picker and an optional Gemini
//! backed generator.

pub mod common;
pub mod config;
pub mod gemini;
pub mod prompts;
pub mod suggest;

pub use config::SuggestConfig;
pub use gemini::GeminiClient;
pub use suggest::{local_suggestions, Suggester, SUGGESTION_LIMIT};
