//! Moderation models
//!
//! Docs: https://platform.openai.com/docs/api-reference/moderations

use super::{validate_model, Model};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Moderation request options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ModerationOptions {
    /// Text to classify
    #[validate(length(min = 1, code = "required"))]
    pub input: String,
    /// `text-moderation-latest` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_model"))]
    pub model: Option<Model>,
}

impl ModerationOptions {
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into(), model: None }
    }
}

/// Content policy categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    pub hate: bool,
    #[serde(rename = "hate/threatening")]
    pub hate_threatening: bool,
    #[serde(rename = "self-harm")]
    pub self_harm: bool,
    pub sexual: bool,
    #[serde(rename = "sexual/minors")]
    pub sexual_minors: bool,
    pub violence: bool,
    #[serde(rename = "violence/graphic")]
    pub violence_graphic: bool,
}

/// Per-category confidence scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub hate: f64,
    #[serde(rename = "hate/threatening")]
    pub hate_threatening: f64,
    #[serde(rename = "self-harm")]
    pub self_harm: f64,
    pub sexual: f64,
    #[serde(rename = "sexual/minors")]
    pub sexual_minors: f64,
    pub violence: f64,
    #[serde(rename = "violence/graphic")]
    pub violence_graphic: f64,
}

/// Classification of one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub categories: Categories,
    pub category_scores: CategoryScores,
    /// True if any category was violated
    pub flagged: bool,
}

/// Moderation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResponse {
    pub id: String,
    pub model: Model,
    pub results: Vec<ModerationResult>,
}

impl ModerationResponse {
    pub fn flagged(&self) -> bool {
        self.results.iter().any(|result| result.flagged)
    }
}
