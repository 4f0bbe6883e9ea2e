//! Data models module
//!
//! Options and result types for every API operation, plus the shared
//! sub-shapes they are built from

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub mod audio;
pub mod catalog;
pub mod completion;
pub mod edit;
pub mod image;
pub mod moderation;

pub use audio::*;
pub use catalog::*;
pub use completion::*;
pub use edit::*;
pub use image::*;
pub use moderation::*;

/// Model identifier
///
/// Docs: https://platform.openai.com/docs/models
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(Cow<'static, str>);

impl Model {
    pub const TEXT_ADA_001: Model = Model::from_static("text-ada-001");
    pub const TEXT_BABBAGE_001: Model = Model::from_static("text-babbage-001");
    pub const TEXT_CURIE_001: Model = Model::from_static("text-curie-001");
    pub const TEXT_DAVINCI_001: Model = Model::from_static("text-davinci-001");
    pub const TEXT_DAVINCI_002: Model = Model::from_static("text-davinci-002");
    pub const TEXT_DAVINCI_003: Model = Model::from_static("text-davinci-003");
    pub const TEXT_DAVINCI_EDIT_001: Model = Model::from_static("text-davinci-edit-001");
    pub const CODE_DAVINCI_EDIT_001: Model = Model::from_static("code-davinci-edit-001");
    pub const WHISPER_1: Model = Model::from_static("whisper-1");
    pub const TEXT_MODERATION_LATEST: Model = Model::from_static("text-moderation-latest");
    pub const TEXT_MODERATION_STABLE: Model = Model::from_static("text-moderation-stable");

    /// Default completion model
    pub const DEFAULT: Model = Self::TEXT_DAVINCI_003;

    #[deprecated(note = "base engine name, use `Model::TEXT_ADA_001`")]
    pub const ADA: Model = Model::from_static("ada");
    #[deprecated(note = "base engine name, use `Model::TEXT_BABBAGE_001`")]
    pub const BABBAGE: Model = Model::from_static("babbage");
    #[deprecated(note = "base engine name, use `Model::TEXT_CURIE_001`")]
    pub const CURIE: Model = Model::from_static("curie");
    #[deprecated(note = "base engine name, use `Model::TEXT_DAVINCI_003`")]
    pub const DAVINCI: Model = Model::from_static("davinci");

    pub const fn from_static(id: &'static str) -> Self {
        Model(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Model(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::DEFAULT
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Model {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Model {
    fn from(id: &str) -> Self {
        Model::new(id)
    }
}

impl From<String> for Model {
    fn from(id: String) -> Self {
        Model::new(id)
    }
}

/// Rejects blank model ids and ids that would escape their URL path segment
pub(crate) fn validate_model(model: &Model) -> Result<(), validator::ValidationError> {
    if model.is_empty() {
        return Err(validator::ValidationError::new(crate::services::validation::CODE_REQUIRED));
    }
    let id = model.as_str();
    if id == "." || id == ".." || id.contains(|c: char| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace()) {
        return Err(validator::ValidationError::new("model_id"));
    }
    Ok(())
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt token count
    pub prompt_tokens: u32,
    /// Completion token count
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total token count
    pub total_tokens: u32,
}

/// One generated text alternative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChoice {
    /// Generated text
    pub text: String,
    /// Choice index
    pub index: u32,
    /// Log probabilities (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<serde_json::Value>,
    /// Why generation stopped; null while incomplete
    #[serde(default)]
    pub finish_reason: Option<String>,
}
