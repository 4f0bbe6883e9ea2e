//! Request encoder
//!
//! Turns an operation payload into a wire body for one of the three
//! encodings the API accepts: JSON, URL-encoded form, or multipart form.

use crate::utils::error::{EncodingError, ErrorContext};
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::Serialize;
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::io::Cursor;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// URL-encoded form content type
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Wire encoding of a request body, fixed per endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// No body (GET endpoints)
    Empty,
    /// Structured JSON document
    Json,
    /// `application/x-www-form-urlencoded` string fields
    UrlEncodedForm,
    /// `multipart/form-data` with a streamed file part
    Multipart,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Empty => "empty",
            Encoding::Json => "json",
            Encoding::UrlEncodedForm => "url-encoded-form",
            Encoding::Multipart => "multipart-form",
        };
        f.write_str(name)
    }
}

/// Readable file content for a multipart upload
pub struct FilePart {
    file_name: String,
    reader: Box<dyn AsyncRead + Send + Sync + Unpin>,
}

impl FilePart {
    /// Wrap any async reader; the content is streamed, never buffered whole
    pub fn new(
        file_name: impl Into<String>,
        reader: impl AsyncRead + Send + Sync + Unpin + 'static,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            reader: Box::new(reader),
        }
    }

    /// In-memory file content
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(file_name, Cursor::new(bytes))
    }

    /// Logical file name sent in the part's disposition
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Chunked content, with read failures tagged with the owning field
    pub(crate) fn into_stream(
        self,
        field: &'static str,
    ) -> impl Stream<Item = Result<Bytes, EncodingError>> + Send + Sync + 'static {
        ReaderStream::new(self.reader).map_err(move |source| EncodingError::new(field, source))
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

/// Value of a form field
#[derive(Debug)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// Named form field; field lists are written in order
#[derive(Debug)]
pub struct FormField {
    pub name: &'static str,
    pub value: FormValue,
}

impl FormField {
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self { name, value: FormValue::Text(value.into()) }
    }

    pub fn file(name: &'static str, file: FilePart) -> Self {
        Self { name, value: FormValue::File(file) }
    }

    /// Text content, `None` for file parts
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            FormValue::Text(text) => Some(text),
            FormValue::File(_) => None,
        }
    }
}

/// Operation payload, prior to encoding
#[derive(Debug)]
pub enum Payload {
    Empty,
    Json(Value),
    Fields(Vec<FormField>),
}

impl Payload {
    /// Serialize options using their wire field names
    pub fn json<T: Serialize>(options: &T) -> Result<Self, EncodingError> {
        let value = serde_json::to_value(options)
            .map_err(|e| EncodingError::new("body", e.into()))?;
        Ok(Payload::Json(value))
    }
}

/// Encoded request body
pub enum EncodedBody {
    Empty,
    Bytes {
        content_type: &'static str,
        bytes: Vec<u8>,
    },
    Multipart(Form),
}

impl EncodedBody {
    /// Content-Type header value, `None` when there is no body
    pub fn content_type(&self) -> Option<String> {
        match self {
            EncodedBody::Empty => None,
            EncodedBody::Bytes { content_type, .. } => Some((*content_type).to_string()),
            EncodedBody::Multipart(form) => {
                Some(format!("multipart/form-data; boundary={}", form.boundary()))
            }
        }
    }

    /// Buffered body bytes; multipart bodies are streamed and return `None`
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            EncodedBody::Bytes { bytes, .. } => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Debug for EncodedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodedBody::Empty => write!(f, "Empty"),
            EncodedBody::Bytes { content_type, bytes } => f
                .debug_struct("Bytes")
                .field("content_type", content_type)
                .field("len", &bytes.len())
                .finish(),
            EncodedBody::Multipart(form) => f
                .debug_struct("Multipart")
                .field("boundary", &form.boundary())
                .finish(),
        }
    }
}

/// Encode a payload with the endpoint's declared encoding
pub fn encode(encoding: Encoding, payload: Payload) -> Result<EncodedBody, EncodingError> {
    match (encoding, payload) {
        (Encoding::Empty, Payload::Empty) => Ok(EncodedBody::Empty),
        (Encoding::Json, Payload::Json(value)) => {
            let bytes = serde_json::to_vec(&value)
                .map_err(|e| EncodingError::new("body", e.into()))?;
            Ok(EncodedBody::Bytes { content_type: CONTENT_TYPE_JSON, bytes })
        }
        (Encoding::UrlEncodedForm, Payload::Fields(fields)) => encode_form(fields),
        (Encoding::Multipart, Payload::Fields(fields)) => encode_multipart(fields),
        (encoding, _) => Err(EncodingError::mismatch(
            "body",
            format!("payload does not fit {} encoding", encoding),
        )),
    }
}

fn encode_form(fields: Vec<FormField>) -> Result<EncodedBody, EncodingError> {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for field in &fields {
        match &field.value {
            FormValue::Text(text) => {
                serializer.append_pair(field.name, text);
            }
            FormValue::File(_) => {
                return Err(EncodingError::mismatch(
                    field.name,
                    "file parts require multipart encoding",
                ));
            }
        }
    }

    Ok(EncodedBody::Bytes {
        content_type: CONTENT_TYPE_FORM,
        bytes: serializer.finish().into_bytes(),
    })
}

fn encode_multipart(fields: Vec<FormField>) -> Result<EncodedBody, EncodingError> {
    let mut form = Form::new();
    for field in fields {
        form = match field.value {
            FormValue::Text(text) => form.text(field.name, text),
            FormValue::File(file) => {
                let file_name = file.file_name.clone();
                let body = Body::wrap_stream(file.into_stream(field.name));
                let part = Part::stream(body)
                    .file_name(file_name)
                    .mime_str("application/octet-stream")
                    .encoding_context(field.name)?;
                form.part(field.name, part)
            }
        };
    }

    Ok(EncodedBody::Multipart(form))
}

/// Find an encoding failure that surfaced through another error's source chain
///
/// File reads happen while the body streams, so they come back wrapped in the
/// transport error.
pub(crate) fn encoding_failure(error: &(dyn StdError + 'static)) -> Option<EncodingError> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(failure) = err.downcast_ref::<EncodingError>() {
            return Some(failure.detached());
        }
        current = err.source();
    }
    None
}
