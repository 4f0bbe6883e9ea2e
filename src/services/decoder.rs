//! Response decoder
//!
//! Decodes success bodies into typed results and error bodies into the
//! normalized [`ApiError`].

use crate::utils::error::{ApiError, EngineResult, TransportError};
use crate::utils::logging::truncate_content;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Error type given to non-2xx bodies that carry no error envelope
pub const UNSTRUCTURED_ERROR_TYPE: &str = "http_error";

/// Longest slice of an unstructured error body kept as the message
const MAX_UNSTRUCTURED_CHARS: usize = 200;

/// Error envelope as sent by the API; every field may be missing or null
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: WireError,
}

#[derive(Debug, Default, Deserialize)]
struct WireError {
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    param: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Read a response to completion and decode it as one JSON document
///
/// Takes the response by value, so the body is released exactly once
/// whether decoding succeeds or not.
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> EngineResult<T> {
    let body = response.bytes().await.map_err(TransportError::Http)?;
    debug!("Decoding {} byte response body", body.len());
    decode_body(&body)
}

/// Decode a buffered body
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> EngineResult<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Normalize an error body, backfilling the status from the HTTP response
///
/// A body that is not the JSON error envelope (a proxy's HTML page, an empty
/// body) still yields an [`ApiError`] carrying the HTTP status, with the
/// body text as its message.
pub fn decode_api_error(status: StatusCode, body: &[u8]) -> ApiError {
    let wire = match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error,
        Err(e) => {
            debug!("Error body for status {} is not an error envelope: {}", status, e);
            return unstructured_error(status, body);
        }
    };

    ApiError {
        status_code: wire
            .status_code
            .filter(|code| *code != 0)
            .unwrap_or_else(|| status.as_u16()),
        message: wire.message.unwrap_or_default(),
        error_type: wire.error_type.unwrap_or_default(),
        param: wire.param,
        code: wire.code.filter(|code| !code.is_null()),
    }
}

fn unstructured_error(status: StatusCode, body: &[u8]) -> ApiError {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    let message = if text.is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        truncate_content(text, MAX_UNSTRUCTURED_CHARS)
    };

    ApiError {
        status_code: status.as_u16(),
        message,
        error_type: UNSTRUCTURED_ERROR_TYPE.to_string(),
        param: None,
        code: None,
    }
}
