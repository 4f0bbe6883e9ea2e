//! OpenAI Engine Library
//!
//! Typed async client for the OpenAI REST API: completions, edits, images,
//! audio, moderation and the model catalog

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use models::Model;
pub use services::{Engine, FilePart, RequestContext};
pub use utils::error::{ApiError, EngineError, EngineResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}

/// User agent sent with every request
pub fn user_agent() -> String {
    format!("{}/{}", NAME, VERSION)
}
