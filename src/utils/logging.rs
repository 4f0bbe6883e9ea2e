//! Logging utilities
//!
//! Subscriber setup and payload summaries for request logs

use crate::config::settings::LoggingConfig;
use crate::services::encoder::{FormValue, Payload};
use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Set to true to log full request payloads instead of truncated summaries
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Longest string kept verbatim in a payload summary
const MAX_LOGGED_CHARS: usize = 200;

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .finish())
    } else {
        // Human readable format (development environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish())
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    Ok(())
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    let total = s.chars().count();
    if total > max_chars {
        let kept: String = s.chars().take(max_chars).collect();
        format!("{}... ({} chars truncated)", kept, total - max_chars)
    } else {
        s.to_string()
    }
}

fn truncate_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(truncate_content(s, MAX_LOGGED_CHARS)),
        Value::Array(items) => Value::Array(items.iter().map(truncate_value).collect()),
        Value::Object(fields) => Value::Object(
            fields.iter().map(|(k, v)| (k.clone(), truncate_value(v))).collect(),
        ),
        other => other.clone(),
    }
}

/// Create a log-safe summary of a request payload
///
/// Long strings are truncated and file parts are reduced to their name.
pub fn payload_summary(payload: &Payload) -> Value {
    match payload {
        Payload::Empty => Value::Null,
        Payload::Json(value) if VERBOSE_REQUEST_LOGGING => value.clone(),
        Payload::Json(value) => truncate_value(value),
        Payload::Fields(fields) => {
            let mut summary = Map::new();
            for field in fields {
                let logged = match &field.value {
                    FormValue::Text(text) => Value::String(truncate_content(text, MAX_LOGGED_CHARS)),
                    FormValue::File(file) => Value::String(format!("[file {}]", file.file_name())),
                };
                summary.insert(field.name.to_string(), logged);
            }
            Value::Object(summary)
        }
    }
}
