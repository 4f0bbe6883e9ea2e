//! Image models
//!
//! Docs: https://platform.openai.com/docs/api-reference/images

use crate::services::encoder::FormField;
use crate::services::validation::CODE_REQUIRED;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Longest accepted image prompt, in characters
pub const MAX_IMAGE_PROMPT_CHARS: u64 = 1000;

/// Square size of generated images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "256x256")]
    Size256,
    #[serde(rename = "512x512")]
    Size512,
    #[serde(rename = "1024x1024")]
    Size1024,
}

impl ImageSize {
    pub const SMALL: ImageSize = ImageSize::Size256;
    pub const MEDIUM: ImageSize = ImageSize::Size512;
    pub const BIG: ImageSize = ImageSize::Size1024;

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Size256 => "256x256",
            ImageSize::Size512 => "512x512",
            ImageSize::Size1024 => "1024x1024",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How generated images are returned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    /// Hosted URL
    #[default]
    Url,
    /// Base64-encoded JSON field
    B64Json,
}

impl ImageResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageResponseFormat::Url => "url",
            ImageResponseFormat::B64Json => "b64_json",
        }
    }
}

impl fmt::Display for ImageResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image generation options, sent as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ImageCreateOptions {
    /// Description of the desired image(s)
    #[validate(custom(function = "validate_prompt"))]
    pub prompt: String,
    /// Number of images, 1 to 10
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10))]
    pub n: Option<u32>,
    /// Image size, default 256x256
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    /// Response format, default url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ImageResponseFormat>,
    /// End-user identifier (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ImageCreateOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), ..Default::default() }
    }

    pub fn with_defaults(mut self) -> Self {
        self.size.get_or_insert(ImageSize::default());
        self.response_format.get_or_insert(ImageResponseFormat::default());
        self
    }
}

/// Image edit options, sent as a URL-encoded form
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ImageEditOptions {
    /// Image to edit: a remote URL or a local reference
    #[validate(length(min = 1, code = "required"))]
    pub image: String,
    /// Mask whose transparent areas mark where to edit (optional)
    pub mask: Option<String>,
    /// Description of the desired image(s)
    #[validate(custom(function = "validate_prompt"))]
    pub prompt: String,
    /// Number of images, 1 to 10
    #[validate(range(min = 1, max = 10))]
    pub n: Option<u32>,
    /// Image size, default 256x256
    pub size: Option<ImageSize>,
    /// Response format, default url
    pub response_format: Option<ImageResponseFormat>,
}

impl ImageEditOptions {
    pub fn new(image: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self { image: image.into(), prompt: prompt.into(), ..Default::default() }
    }

    pub fn with_defaults(mut self) -> Self {
        self.n.get_or_insert(1);
        self.size.get_or_insert(ImageSize::default());
        self.response_format.get_or_insert(ImageResponseFormat::default());
        self
    }

    /// Form fields in wire order
    pub fn into_fields(self) -> Vec<FormField> {
        let mut fields = vec![FormField::text("image", self.image)];
        if let Some(mask) = self.mask {
            fields.push(FormField::text("mask", mask));
        }
        fields.push(FormField::text("prompt", self.prompt));
        push_image_fields(&mut fields, self.n, self.size, self.response_format);
        fields
    }
}

/// Image variation options, sent as a URL-encoded form
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ImageVariationOptions {
    /// Image to vary: a remote URL or a local reference
    #[validate(length(min = 1, code = "required"))]
    pub image: String,
    /// Number of images, 1 to 10
    #[validate(range(min = 1, max = 10))]
    pub n: Option<u32>,
    /// Image size, default 256x256
    pub size: Option<ImageSize>,
    /// Response format, default url
    pub response_format: Option<ImageResponseFormat>,
}

impl ImageVariationOptions {
    pub fn new(image: impl Into<String>) -> Self {
        Self { image: image.into(), ..Default::default() }
    }

    pub fn with_defaults(mut self) -> Self {
        self.n.get_or_insert(1);
        self.size.get_or_insert(ImageSize::default());
        self.response_format.get_or_insert(ImageResponseFormat::default());
        self
    }

    /// Form fields in wire order
    pub fn into_fields(self) -> Vec<FormField> {
        let mut fields = vec![FormField::text("image", self.image)];
        push_image_fields(&mut fields, self.n, self.size, self.response_format);
        fields
    }
}

/// Required, at most [`MAX_IMAGE_PROMPT_CHARS`] characters
fn validate_prompt(prompt: &str) -> Result<(), validator::ValidationError> {
    if prompt.trim().is_empty() {
        return Err(validator::ValidationError::new(CODE_REQUIRED));
    }
    if prompt.chars().count() as u64 > MAX_IMAGE_PROMPT_CHARS {
        let mut error = validator::ValidationError::new("length");
        error.add_param("max".into(), &MAX_IMAGE_PROMPT_CHARS);
        return Err(error);
    }
    Ok(())
}

fn push_image_fields(
    fields: &mut Vec<FormField>,
    n: Option<u32>,
    size: Option<ImageSize>,
    response_format: Option<ImageResponseFormat>,
) {
    if let Some(n) = n {
        fields.push(FormField::text("n", n.to_string()));
    }
    if let Some(size) = size {
        fields.push(FormField::text("size", size.as_str()));
    }
    if let Some(format) = response_format {
        fields.push(FormField::text("response_format", format.as_str()));
    }
}

/// One generated image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// Hosted URL, for `url` responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Encoded image, for `b64_json` responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
}

/// Result of image create, edit and variation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Creation timestamp
    pub created: u64,
    /// Generated images
    pub data: Vec<ImageData>,
}

pub type ImageCreateResponse = ImageResponse;
pub type ImageEditResponse = ImageResponse;
pub type ImageVariationResponse = ImageResponse;

impl ImageResponse {
    /// URLs of all images returned as links
    pub fn urls(&self) -> Vec<&str> {
        self.data.iter().filter_map(|image| image.url.as_deref()).collect()
    }
}
