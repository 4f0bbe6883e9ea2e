//! Audio models
//!
//! Docs: https://platform.openai.com/docs/api-reference/audio

use super::{validate_model, Model};
use crate::services::encoder::{FilePart, FormField};
use crate::services::validation::{enumeration_violation, CODE_REQUIRED};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Container formats the audio endpoints accept
pub const AUDIO_FORMATS: &[&str] = &["mp3", "mp4", "mpeg", "mpga", "m4a", "wav", "webm"];

/// Only `json` is requested; other formats do not decode as `{text}`
pub const AUDIO_RESPONSE_FORMAT: &str = "json";

/// Options shared by transcription and translation
#[derive(Debug, Validate)]
pub struct AudioOptions {
    /// Audio content, streamed into the upload
    pub file: FilePart,
    /// Container format of `file`, one of [`AUDIO_FORMATS`]
    #[validate(custom(function = "validate_audio_format"))]
    pub audio_format: String,
    /// Defaults to whisper-1
    #[validate(custom(function = "validate_model"))]
    pub model: Option<Model>,
    /// Text to guide style or continue a previous segment
    pub prompt: Option<String>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub temperature: Option<f32>,
}

impl AudioOptions {
    pub fn new(file: FilePart, audio_format: impl Into<String>) -> Self {
        Self {
            file,
            audio_format: audio_format.into(),
            model: None,
            prompt: None,
            temperature: None,
        }
    }

    pub fn with_defaults(mut self) -> Self {
        self.model.get_or_insert(Model::WHISPER_1);
        self
    }

    /// Multipart fields in wire order; an empty prompt and a zero temperature are left off
    pub fn into_fields(self) -> Vec<FormField> {
        let model = self.model.unwrap_or(Model::WHISPER_1);
        let file_name = format!("file.{}", self.audio_format);

        let mut fields = vec![
            FormField::text("model", model.as_str()),
            FormField::text("response_format", AUDIO_RESPONSE_FORMAT),
            FormField::file("file", self.file.with_file_name(file_name)),
        ];
        if let Some(prompt) = self.prompt.filter(|prompt| !prompt.is_empty()) {
            fields.push(FormField::text("prompt", prompt));
        }
        if let Some(temperature) = self.temperature.filter(|temperature| *temperature != 0.0) {
            fields.push(FormField::text("temperature", format!("{:.6}", temperature)));
        }
        fields
    }
}

fn validate_audio_format(format: &str) -> Result<(), validator::ValidationError> {
    if format.is_empty() {
        return Err(validator::ValidationError::new(CODE_REQUIRED));
    }
    if AUDIO_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(enumeration_violation(AUDIO_FORMATS))
    }
}

/// Transcription options
#[derive(Debug, Validate)]
pub struct TranscribeOptions {
    #[validate(nested)]
    pub audio: AudioOptions,
    /// ISO-639-1 language of the input audio
    #[validate(length(min = 2, max = 2))]
    pub language: Option<String>,
}

impl TranscribeOptions {
    pub fn new(audio: AudioOptions) -> Self {
        Self { audio, language: None }
    }

    pub fn into_fields(self) -> Vec<FormField> {
        let mut fields = self.audio.into_fields();
        if let Some(language) = self.language.filter(|language| !language.is_empty()) {
            fields.push(FormField::text("language", language));
        }
        fields
    }
}

/// Translation (into English) options
#[derive(Debug, Validate)]
pub struct TranslateOptions {
    #[validate(nested)]
    pub audio: AudioOptions,
}

impl TranslateOptions {
    pub fn new(audio: AudioOptions) -> Self {
        Self { audio }
    }

    pub fn into_fields(self) -> Vec<FormField> {
        self.audio.into_fields()
    }
}

/// Text produced by transcription or translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTextResponse {
    pub text: String,
}

pub type TranscribeResponse = AudioTextResponse;
pub type TranslateResponse = AudioTextResponse;
