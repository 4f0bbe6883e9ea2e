//! HTTP transport
//!
//! Owns the HTTP client and credentials, attaches auth headers, dispatches
//! requests and classifies the response status.

use crate::config::settings::OpenAIConfig;
use crate::services::decoder::decode_api_error;
use crate::services::encoder::{encoding_failure, EncodedBody};
use crate::utils::error::{helpers, EngineError, EngineResult, ErrorContext, TransportError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// Organization header name
pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// Shared HTTP transport with credentials
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    api_key: String,
    organization_id: Option<String>,
    requests: Arc<AtomicU64>,
}

impl Transport {
    /// Create a transport from API configuration
    pub fn new(config: &OpenAIConfig) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(crate::user_agent())
            .build()
            .config_context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            organization_id: config.organization_id.clone().filter(|id| !id.is_empty()),
            requests: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    pub(crate) fn set_api_key(&mut self, api_key: String) {
        self.api_key = api_key;
    }

    pub(crate) fn set_organization_id(&mut self, organization_id: Option<String>) {
        self.organization_id = organization_id.filter(|id| !id.is_empty());
    }

    /// Number of requests dispatched through this transport and its clones
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL for one resource under an endpoint path
    ///
    /// The segment is percent-encoded, so it always stays a single segment.
    pub fn resource_url(&self, path: &str, segment: &str) -> EngineResult<String> {
        let mut url = Url::parse(&self.url(path)).config_context("Invalid base URL")?;
        url.path_segments_mut()
            .map_err(|_| helpers::config_error("Base URL cannot carry a path"))?
            .push(segment);
        Ok(url.into())
    }

    /// Send a request and classify the outcome
    ///
    /// 2xx responses are returned untouched. Any other status is decoded into
    /// an [`ApiError`](crate::utils::error::ApiError).
    pub async fn send(&self, method: Method, url: &str, body: EncodedBody) -> EngineResult<Response> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let mut request = self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key));

        if let Some(organization_id) = &self.organization_id {
            request = request.header(ORGANIZATION_HEADER, organization_id);
        }

        request = match body {
            EncodedBody::Empty => request,
            EncodedBody::Bytes { content_type, bytes } => request
                .header(CONTENT_TYPE, content_type)
                .body(bytes),
            EncodedBody::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.map_err(classify_send_error)?;
        let status = response.status();

        if status.is_success() {
            debug!("Request succeeded with status {}", status);
            return Ok(response);
        }

        let body = response.bytes().await.map_err(TransportError::Http)?;
        let api_error = decode_api_error(status, &body);

        if status.is_server_error() {
            error!("OpenAI API error: {} - {}", api_error.status_code, api_error.message);
        } else {
            warn!("OpenAI API error: {} - {}", api_error.status_code, api_error.message);
        }

        Err(EngineError::Api(api_error))
    }
}

/// A failed send is an encoding error when the streamed body caused it
fn classify_send_error(error: reqwest::Error) -> EngineError {
    match encoding_failure(&error) {
        Some(failure) => {
            warn!("Request body failed while streaming field `{}`", failure.field);
            EngineError::Encoding(failure)
        }
        None => EngineError::Transport(TransportError::Http(error)),
    }
}
