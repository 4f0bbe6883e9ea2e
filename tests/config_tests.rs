//! Configuration module unit tests

use openai_engine::config::settings::{LoggingConfig, OpenAIConfig, Settings, DEFAULT_BASE_URL};
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const ENV_VARS: [&str; 6] = [
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OPENAI_ORGANIZATION",
    "OPENAI_TIMEOUT",
    "RUST_LOG",
    "LOG_FORMAT",
];

/// Setup test environment variables
fn setup_test_env() {
    env::set_var("OPENAI_API_KEY", "sk-test-key-12345678901234567890");
    env::set_var("OPENAI_BASE_URL", "http://localhost:9999/v1");
    env::set_var("OPENAI_ORGANIZATION", "org-test");
    env::set_var("OPENAI_TIMEOUT", "45");
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
}

/// Clean up test environment variables
fn cleanup_test_env() {
    for var in &ENV_VARS {
        env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// Environment variables are process-wide, so every case touching them lives
// in this one test.
#[test]
fn test_settings_from_environment() {
    setup_test_env();

    let settings = Settings::new().unwrap();
    assert_eq!(settings.openai.api_key, "sk-test-key-12345678901234567890");
    assert_eq!(settings.openai.base_url, "http://localhost:9999/v1");
    assert_eq!(settings.openai.organization_id.as_deref(), Some("org-test"));
    assert_eq!(settings.openai.timeout, 45);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.format, "json");

    // Invalid timeout
    env::set_var("OPENAI_TIMEOUT", "soon");
    assert!(Settings::new().is_err());
    env::set_var("OPENAI_TIMEOUT", "0");
    assert!(Settings::new().is_err());
    env::set_var("OPENAI_TIMEOUT", "30");

    // Invalid log level
    env::set_var("RUST_LOG", "loud");
    assert!(Settings::new().is_err());
    env::set_var("RUST_LOG", "info");

    // Key falls back to the environment when the file has none
    let file = write_config(r#"{"openai": {"base_url": "http://localhost:1234"}}"#);
    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(settings.openai.api_key, "sk-test-key-12345678901234567890");
    assert_eq!(settings.openai.base_url, "http://localhost:1234");

    // Missing key everywhere
    cleanup_test_env();
    assert!(Settings::new().is_err());
    assert!(Settings::load(file.path()).is_err());
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"{
            "openai": {
                "api_key": "sk-from-file",
                "base_url": "https://gateway.example.com/v1",
                "organization_id": "org-42",
                "timeout": 10
            },
            "logging": {"level": "warn", "format": "json"}
        }"#,
    );

    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(
        settings.openai,
        OpenAIConfig {
            api_key: "sk-from-file".to_string(),
            base_url: "https://gateway.example.com/v1".to_string(),
            organization_id: Some("org-42".to_string()),
            timeout: 10,
        }
    );
    assert_eq!(
        settings.logging,
        LoggingConfig { level: "warn".to_string(), format: "json".to_string() }
    );
}

#[test]
fn test_load_rejects_invalid_files() {
    let file = write_config("{ not json");
    assert!(Settings::load(file.path()).is_err());

    let file = write_config(r#"{"openai": {"api_key": "sk-x", "base_url": "localhost"}}"#);
    assert!(Settings::load(file.path()).is_err());

    let file = write_config(r#"{"openai": {"api_key": "sk-x"}, "logging": {"format": "yaml"}}"#);
    assert!(Settings::load(file.path()).is_err());

    assert!(Settings::load(std::path::Path::new("/nonexistent/openai-engine.json")).is_err());
}

#[test]
fn test_default_settings() {
    let settings = Settings::with_api_key("sk-default");
    assert_eq!(settings.openai.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.logging, LoggingConfig::default());
    assert!(settings.validate().is_ok());

    let settings = Settings::with_api_key("");
    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_serialization_roundtrip() {
    let mut settings = Settings::with_api_key("sk-roundtrip");
    settings.openai.organization_id = Some("org-1".to_string());

    let json = serde_json::to_string(&settings).unwrap();
    let parsed: Settings = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.openai, settings.openai);
    assert_eq!(parsed.logging, settings.logging);
}
