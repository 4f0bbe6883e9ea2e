//! Request encoder tests

use openai_engine::models::*;
use openai_engine::services::encoder::*;
use serde_json::Value;

fn json_body(body: &EncodedBody) -> Value {
    serde_json::from_slice(body.as_bytes().unwrap()).unwrap()
}

fn form_body(body: &EncodedBody) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body.as_bytes().unwrap())
        .into_owned()
        .collect()
}

fn pair(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

#[test]
fn test_completion_body_gets_default_ceiling() {
    let options = CompletionOptions::new("davinci", "Hello").with_defaults();
    let body = encode(Encoding::Json, Payload::json(&options).unwrap()).unwrap();

    assert_eq!(body.content_type().as_deref(), Some(CONTENT_TYPE_JSON));
    let json = json_body(&body);
    assert_eq!(json["model"], "davinci");
    assert_eq!(json["prompt"], serde_json::json!(["Hello"]));
    assert_eq!(json["max_tokens"], 1024);
    assert!(json.get("temperature").is_none());
}

#[test]
fn test_image_edit_form_in_declaration_order() {
    let fields = ImageEditOptions::new("https://example.com/cat.png", "add a hat")
        .with_defaults()
        .into_fields();
    let body = encode(Encoding::UrlEncodedForm, Payload::Fields(fields)).unwrap();

    assert_eq!(body.content_type().as_deref(), Some(CONTENT_TYPE_FORM));
    assert_eq!(
        form_body(&body),
        vec![
            pair("image", "https://example.com/cat.png"),
            pair("prompt", "add a hat"),
            pair("n", "1"),
            pair("size", "256x256"),
            pair("response_format", "url"),
        ]
    );
}

#[test]
fn test_image_variation_keeps_caller_choices() {
    let options = ImageVariationOptions {
        n: Some(3),
        size: Some(ImageSize::Size512),
        ..ImageVariationOptions::new("cat.png")
    };
    let body = encode(Encoding::UrlEncodedForm, Payload::Fields(options.with_defaults().into_fields())).unwrap();

    assert_eq!(
        form_body(&body),
        vec![
            pair("image", "cat.png"),
            pair("n", "3"),
            pair("size", "512x512"),
            pair("response_format", "url"),
        ]
    );
}

#[test]
fn test_multipart_body_is_streamed() {
    let audio = AudioOptions::new(FilePart::from_bytes("a.wav", b"RIFF".to_vec()), "wav");
    let body = encode(Encoding::Multipart, Payload::Fields(TranslateOptions::new(audio).into_fields())).unwrap();

    let content_type = body.content_type().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(body.as_bytes().is_none());
}

#[test]
fn test_empty_body() {
    let body = encode(Encoding::Empty, Payload::Empty).unwrap();
    assert!(body.content_type().is_none());
    assert!(body.as_bytes().is_none());
}

#[test]
fn test_payload_mismatches_are_rejected() {
    let error = encode(Encoding::Json, Payload::Fields(vec![FormField::text("a", "b")])).unwrap_err();
    assert_eq!(error.field, "body");

    let error = encode(Encoding::Empty, Payload::Json(serde_json::json!({}))).unwrap_err();
    assert_eq!(error.field, "body");

    let fields = vec![
        FormField::text("model", "whisper-1"),
        FormField::file("file", FilePart::from_bytes("a.mp3", vec![1, 2, 3])),
    ];
    let error = encode(Encoding::UrlEncodedForm, Payload::Fields(fields)).unwrap_err();
    assert_eq!(error.field, "file");
}

#[test]
fn test_form_values_are_escaped() {
    let fields = vec![FormField::text("prompt", "cats & dogs = friends?")];
    let body = encode(Encoding::UrlEncodedForm, Payload::Fields(fields)).unwrap();

    assert_eq!(body.as_bytes().unwrap(), b"prompt=cats+%26+dogs+%3D+friends%3F");
    assert_eq!(form_body(&body), vec![pair("prompt", "cats & dogs = friends?")]);
}
