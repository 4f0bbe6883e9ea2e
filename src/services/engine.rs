//! Engine handle
//!
//! The caller-facing client. Holds the transport and runs every operation
//! through the same validate, encode, send, decode pipeline.

use crate::config::settings::{OpenAIConfig, Settings};
use crate::services::context::RequestContext;
use crate::services::decoder::decode_json;
use crate::services::encoder::{encode, Encoding, Payload};
use crate::services::transport::Transport;
use crate::utils::error::{helpers, EngineResult};
use crate::utils::logging::payload_summary;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

/// Fixed shape of one API endpoint
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub encoding: Encoding,
}

/// OpenAI API engine
///
/// Cheap to clone; clones share the HTTP client and request counter.
#[derive(Debug, Clone)]
pub struct Engine {
    transport: Transport,
}

impl Engine {
    /// Create an engine with default settings around an API key
    pub fn new(api_key: impl Into<String>) -> EngineResult<Self> {
        Self::from_config(&OpenAIConfig::with_api_key(api_key))
    }

    /// Create an engine from validated settings
    pub fn from_settings(settings: &Settings) -> EngineResult<Self> {
        settings.validate()?;
        Self::from_config(&settings.openai)
    }

    pub fn from_config(config: &OpenAIConfig) -> EngineResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(helpers::config_error("API key is required"));
        }
        Ok(Self { transport: Transport::new(config)? })
    }

    /// Same engine, different API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.transport.set_api_key(api_key.into());
        self
    }

    /// Same engine, sending `OpenAI-Organization` on every request
    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.transport.set_organization_id(Some(organization_id.into()));
        self
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.transport.set_api_key(api_key.into());
    }

    /// Set or clear the organization id
    pub fn set_organization_id(&mut self, organization_id: Option<String>) {
        self.transport.set_organization_id(organization_id);
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.transport.organization_id()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Requests dispatched by this engine and its clones; advisory only
    pub fn request_count(&self) -> u64 {
        self.transport.request_count()
    }

    /// Encode, send and decode one call to `endpoint`
    ///
    /// `segment` is appended to the endpoint path as one percent-encoded
    /// segment, for calls addressing one resource.
    pub(crate) async fn execute<R: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        endpoint: &Endpoint,
        segment: Option<&str>,
        payload: Payload,
    ) -> EngineResult<R> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "openai_request",
            request_id = %request_id,
            method = %endpoint.method,
            path = endpoint.path,
            resource = segment.unwrap_or_default(),
        );

        async move {
            debug!(encoding = %endpoint.encoding, payload = %payload_summary(&payload), "Encoding request");

            let body = encode(endpoint.encoding, payload)?;
            let url = match segment {
                Some(segment) => self.transport.resource_url(endpoint.path, segment)?,
                None => self.transport.url(endpoint.path),
            };

            let result = ctx
                .run(async {
                    let response = self.transport.send(endpoint.method.clone(), &url, body).await?;
                    decode_json::<R>(response).await
                })
                .await;

            match &result {
                Ok(_) => info!("Request completed"),
                Err(e) => debug!(kind = e.kind(), "Request failed: {}", e),
            }
            result
        }
        .instrument(span)
        .await
    }
}
