//! Edit models
//!
//! Docs: https://platform.openai.com/docs/api-reference/edits

use super::{validate_model, Model, TextChoice, Usage};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Edit request options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EditOptions {
    /// ID of the model to use
    #[validate(custom(function = "validate_model"))]
    pub model: Model,
    /// Text to use as the starting point for the edit
    #[validate(length(min = 1, code = "required"))]
    pub input: String,
    /// Instruction telling the model how to edit the input
    #[validate(length(min = 1, code = "required"))]
    pub instruction: String,
    /// Edits to generate, API default 1
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 20))]
    pub n: Option<u32>,
    /// Sampling temperature (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    /// Nucleus sampling mass (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: Option<f32>,
}

impl EditOptions {
    pub fn new(input: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            model: Model::TEXT_DAVINCI_EDIT_001,
            input: input.into(),
            instruction: instruction.into(),
            n: None,
            temperature: None,
            top_p: None,
        }
    }
}

/// Edit response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditResponse {
    /// Response ID (not always sent)
    #[serde(default)]
    pub id: String,
    /// Object type
    pub object: String,
    /// Creation timestamp
    pub created: u64,
    /// Choice list
    pub choices: Vec<TextChoice>,
    /// Usage statistics
    pub usage: Usage,
}
