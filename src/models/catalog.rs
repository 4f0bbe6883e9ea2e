//! Model catalog
//!
//! Docs: https://platform.openai.com/docs/api-reference/models

use super::{validate_model, Model};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Basic information about one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: Model,
    pub object: String,
    pub owned_by: String,
    /// Creation timestamp, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
}

/// Result of listing models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListModelsResponse {
    #[serde(default)]
    pub object: String,
    pub data: Vec<ModelInfo>,
}

impl ListModelsResponse {
    pub fn find(&self, id: &str) -> Option<&ModelInfo> {
        self.data.iter().find(|model| model.id.as_str() == id)
    }
}

pub type RetrieveModelResponse = ModelInfo;

/// Model retrieval options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RetrieveModelOptions {
    /// Model id; becomes a path segment
    #[validate(custom(function = "validate_model"))]
    pub id: Model,
}

impl RetrieveModelOptions {
    pub fn new(id: impl Into<Model>) -> Self {
        Self { id: id.into() }
    }
}
