//! Data model unit tests

use openai_engine::models::*;
use serde_json::json;

#[test]
fn test_completion_options_roundtrip() {
    let options = CompletionOptions {
        model: Model::TEXT_DAVINCI_002,
        prompt: vec!["Hello".to_string(), "World".to_string()],
        suffix: Some("!".to_string()),
        max_tokens: Some(64),
        temperature: Some(0.5),
        top_p: Some(0.9),
        n: Some(2),
        stop: Some(vec!["\n".to_string()]),
        presence_penalty: Some(-1.0),
        frequency_penalty: Some(1.5),
        user: Some("user-1".to_string()),
    };

    let json = serde_json::to_string(&options).unwrap();
    let parsed: CompletionOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, options);
}

#[test]
fn test_edit_and_moderation_roundtrip() {
    let options = EditOptions {
        temperature: Some(0.0),
        ..EditOptions::new("What day of the wek is it?", "Fix the spelling mistakes")
    };
    let parsed: EditOptions = serde_json::from_str(&serde_json::to_string(&options).unwrap()).unwrap();
    assert_eq!(parsed, options);
    assert_eq!(parsed.model, Model::TEXT_DAVINCI_EDIT_001);

    let options = ModerationOptions {
        model: Some(Model::TEXT_MODERATION_STABLE),
        ..ModerationOptions::new("some text")
    };
    let parsed: ModerationOptions = serde_json::from_str(&serde_json::to_string(&options).unwrap()).unwrap();
    assert_eq!(parsed, options);
}

#[test]
fn test_image_create_defaults_on_the_wire() {
    let options = ImageCreateOptions::new("a white siamese cat").with_defaults();
    let json = serde_json::to_value(&options).unwrap();

    assert_eq!(
        json,
        json!({"prompt": "a white siamese cat", "size": "256x256", "response_format": "url"})
    );
}

#[test]
fn test_completion_response_parsing() {
    let json = json!({
        "id": "cmpl-uqkvlQyYK7bGYrRHQ0eXlWi7",
        "object": "text_completion",
        "created": 1589478378,
        "model": "text-davinci-003",
        "choices": [{
            "text": "\n\nThis is indeed a test",
            "index": 0,
            "logprobs": null,
            "finish_reason": "length"
        }],
        "usage": {"prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12}
    });

    let response: CompletionResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.model, Model::TEXT_DAVINCI_003);
    assert_eq!(response.first_text(), Some("\n\nThis is indeed a test"));
    assert_eq!(response.choices[0].finish_reason.as_deref(), Some("length"));
    assert!(response.choices[0].logprobs.is_none());
    assert_eq!(response.usage.total_tokens, 12);
}

#[test]
fn test_edit_response_parsing() {
    let json = json!({
        "object": "edit",
        "created": 1589478378,
        "choices": [{"text": "What day of the week is it?", "index": 0}],
        "usage": {"prompt_tokens": 25, "completion_tokens": 32, "total_tokens": 57}
    });

    let response: EditResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.id, "");
    assert_eq!(response.choices[0].text, "What day of the week is it?");
    assert!(response.choices[0].finish_reason.is_none());
}

#[test]
fn test_image_response_parsing() {
    let json = json!({
        "created": 1589478378,
        "data": [{"url": "https://example.com/a.png"}, {"b64_json": "aGVsbG8="}]
    });

    let response: ImageResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.urls(), vec!["https://example.com/a.png"]);
    assert_eq!(response.data[1].b64_json.as_deref(), Some("aGVsbG8="));
}

#[test]
fn test_catalog_parsing() {
    let json = json!({
        "object": "list",
        "data": [
            {"id": "whisper-1", "object": "model", "owned_by": "openai-internal"},
            {"id": "text-davinci-003", "object": "model", "owned_by": "openai", "created": 1669599635}
        ]
    });

    let response: ListModelsResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.find("whisper-1").map(|m| m.owned_by.as_str()), Some("openai-internal"));
    assert_eq!(response.find("text-davinci-003").and_then(|m| m.created), Some(1669599635));
    assert!(response.find("gpt-9").is_none());
}

#[test]
fn test_audio_text_response() {
    let response: TranscribeResponse = serde_json::from_str(r#"{"text":"Hello there"}"#).unwrap();
    assert_eq!(response.text, "Hello there");
}

#[test]
fn test_model_constants() {
    assert_eq!(Model::default(), Model::TEXT_DAVINCI_003);
    assert_eq!(Model::WHISPER_1.to_string(), "whisper-1");
    assert_eq!(Model::from("custom-model").as_str(), "custom-model");
    assert_eq!(ImageSize::MEDIUM.as_str(), "512x512");
    assert_eq!(ImageResponseFormat::default().to_string(), "url");
}
