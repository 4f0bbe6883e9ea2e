//! Completion models
//!
//! Docs: https://platform.openai.com/docs/api-reference/completions

use super::{validate_model, Model, TextChoice, Usage};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Token ceiling applied when `max_tokens` is unset
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Completion request options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CompletionOptions {
    /// ID of the model to use
    #[validate(custom(function = "validate_model"))]
    pub model: Model,
    /// Prompts to complete
    #[validate(length(min = 1, code = "required"))]
    pub prompt: Vec<String>,
    /// Text appended after the completion (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Maximum tokens to generate; prompt plus completion must fit the model's context
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 4096))]
    pub max_tokens: Option<u32>,
    /// Sampling temperature; 0 is argmax sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    /// Nucleus sampling mass (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: Option<f32>,
    /// Completions to generate per prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 128))]
    pub n: Option<u32>,
    /// Up to 4 stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 4))]
    pub stop: Option<Vec<String>>,
    /// Presence penalty (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -2.0, max = 2.0))]
    pub presence_penalty: Option<f32>,
    /// Frequency penalty (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -2.0, max = 2.0))]
    pub frequency_penalty: Option<f32>,
    /// End-user identifier (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl CompletionOptions {
    pub fn new(model: impl Into<Model>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: vec![prompt.into()],
            ..Default::default()
        }
    }

    /// Fill in unset fields the API needs
    pub fn with_defaults(mut self) -> Self {
        self.max_tokens.get_or_insert(DEFAULT_MAX_TOKENS);
        self
    }
}

/// Completion response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Response ID
    pub id: String,
    /// Object type
    pub object: String,
    /// Creation timestamp
    pub created: u64,
    /// Model used
    pub model: Model,
    /// Choice list
    pub choices: Vec<TextChoice>,
    /// Usage statistics
    pub usage: Usage,
}

impl CompletionResponse {
    /// Text of the first choice
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.text.as_str())
    }
}
