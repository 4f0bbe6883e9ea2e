//! Configuration management module
//!
//! Loads engine configuration from environment variables, `.env` files and JSON files

pub mod settings;

pub use settings::{LoggingConfig, OpenAIConfig, Settings};
