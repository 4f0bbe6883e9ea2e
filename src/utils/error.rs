//! Error handling module
//!
//! Defines the error taxonomy surfaced by every engine operation

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// Options rejected before any request was built
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A request field could not be encoded
    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// Network, timeout or cancellation failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx response from the API
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid settings or HTTP client construction failure
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl EngineError {
    /// HTTP status of an API error, if this is one
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            EngineError::Api(error) => StatusCode::from_u16(error.status_code).ok(),
            _ => None,
        }
    }

    /// Short category name, used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation",
            EngineError::Encoding(_) => "encoding",
            EngineError::Transport(_) => "transport",
            EngineError::Api(_) => "api",
            EngineError::Decode(_) => "decode",
            EngineError::Config(_) => "config",
        }
    }

    /// Whether the failure happened before anything was sent
    pub fn is_pre_flight(&self) -> bool {
        matches!(self, EngineError::Validation(_) | EngineError::Config(_))
    }
}

/// The constraint a field violated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Field is missing or empty
    Required,
    /// Numeric value outside the allowed bounds
    Range { min: Option<f64>, max: Option<f64> },
    /// String or list length outside the allowed bounds
    Length { min: Option<u64>, max: Option<u64> },
    /// Value is not one of the allowed options
    Enumeration { allowed: Vec<String> },
    /// Any other rule, identified by its code
    Invalid(String),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Required => write!(f, "is required"),
            Constraint::Range { min, max } => match (min, max) {
                (Some(min), Some(max)) => write!(f, "must be between {} and {}", min, max),
                (Some(min), None) => write!(f, "must be at least {}", min),
                (None, Some(max)) => write!(f, "must be at most {}", max),
                (None, None) => write!(f, "is out of range"),
            },
            Constraint::Length { min, max } => match (min, max) {
                (Some(min), Some(max)) => write!(f, "length must be between {} and {}", min, max),
                (Some(min), None) => write!(f, "length must be at least {}", min),
                (None, Some(max)) => write!(f, "length must be at most {}", max),
                (None, None) => write!(f, "has an invalid length"),
            },
            Constraint::Enumeration { allowed } => {
                write!(f, "must be one of [{}]", allowed.join(", "))
            }
            Constraint::Invalid(code) => write!(f, "failed check `{}`", code),
        }
    }
}

/// Structural violation found by the validation layer
#[derive(Error, Debug, Clone, PartialEq)]
#[error("field `{field}` {constraint}")]
pub struct ValidationError {
    /// Field name, dotted for nested options
    pub field: String,
    /// The violated constraint
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, constraint: Constraint) -> Self {
        Self { field: field.into(), constraint }
    }
}

/// Failure while encoding one request field
#[derive(Error, Debug)]
#[error("field `{field}`: {source}")]
pub struct EncodingError {
    /// Name of the field being written
    pub field: String,
    /// Underlying I/O or serialization cause
    #[source]
    pub source: io::Error,
}

impl EncodingError {
    pub fn new(field: impl Into<String>, source: io::Error) -> Self {
        Self { field: field.into(), source }
    }

    /// Payload shape does not fit the endpoint's encoding
    pub fn mismatch(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, io::Error::new(io::ErrorKind::InvalidInput, message.into()))
    }

    /// Owned copy, for errors only reachable by reference through a source chain
    pub(crate) fn detached(&self) -> Self {
        Self::new(
            self.field.clone(),
            io::Error::new(self.source.kind(), self.source.to_string()),
        )
    }
}

/// Failures of the HTTP exchange itself
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, protocol or client timeout error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The caller's cancellation token fired
    #[error("Request cancelled")]
    Cancelled,

    /// The caller's deadline passed
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

/// Normalized API error
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{status_code} {error_type}: {message}")]
pub struct ApiError {
    /// HTTP status, backfilled from the response when the body omits it
    pub status_code: u16,
    /// Error message
    pub message: String,
    /// Error type tag
    #[serde(rename = "type")]
    pub error_type: String,
    /// Offending parameter (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Machine-readable code (optional, string or number upstream)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}

/// Result type alias
pub type EngineResult<T> = Result<T, EngineError>;

/// Error construction helper functions
pub mod helpers {
    use super::*;

    /// Create a required-field validation error
    pub fn required(field: impl Into<String>) -> EngineError {
        EngineError::Validation(ValidationError::new(field, Constraint::Required))
    }

    /// Create a validation error for an arbitrary constraint
    pub fn invalid(field: impl Into<String>, constraint: Constraint) -> EngineError {
        EngineError::Validation(ValidationError::new(field, constraint))
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> EngineError {
        EngineError::Config(anyhow::anyhow!(message.into()))
    }

    /// Create an encoding error for a field
    pub fn encoding_error(field: impl Into<String>, message: impl Into<String>) -> EngineError {
        EngineError::Encoding(EncodingError::new(
            field,
            io::Error::new(io::ErrorKind::Other, message.into()),
        ))
    }
}

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Attach a field name, turning the failure into an encoding error
    fn encoding_context(self, field: &str) -> Result<T, EncodingError>;

    /// Attach a message, turning the failure into a configuration error
    fn config_context(self, message: &str) -> EngineResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn encoding_context(self, field: &str) -> Result<T, EncodingError> {
        self.map_err(|e| EncodingError::new(field, io::Error::new(io::ErrorKind::Other, e)))
    }

    fn config_context(self, message: &str) -> EngineResult<T> {
        self.map_err(|e| EngineError::Config(anyhow::Error::new(e).context(message.to_string())))
    }
}
