use serde_json::json;
use ventabot_core::{LlmRequest, Message, Role};

#[test]
fn messages_serialize_with_lowercase_roles() {
    let message = Message {
        role: Role::System,
        content: "you are terse".to_string(),
    };
    let value = serde_json::to_value(&message).unwrap();
    assert_eq!(value, json!({"role": "system", "content": "you are terse"}));
}

#[test]
fn request_omits_unset_sampling_fields() {
    let request = LlmRequest {
        model: "gpt-4o-mini".to_string(),
        messages: vec![Message {
            role: Role::User,
            content: "hi".to_string(),
        }],
        temperature: None,
        max_tokens: None,
    };
    let value = serde_json::to_value(&request).unwrap();
    assert!(value.get("temperature").is_none());
    assert!(value.get("max_tokens").is_none());
}

#[test]
fn request_keeps_explicit_temperature() {
    let request = LlmRequest {
        model: String::new(),
        messages: Vec::new(),
        temperature: Some(0.0),
        max_tokens: Some(256),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["temperature"], json!(0.0));
    assert_eq!(value["max_tokens"], json!(256));
}
