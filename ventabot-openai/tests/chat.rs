use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ventabot_core::{ChatLlm, LlmError, LlmRequest, Message, Role};
use ventabot_openai::OpenAiChat;

fn chat() -> OpenAiChat {
    OpenAiChat::new(SecretString::new("test-key".to_string()), "gpt-4o-mini").unwrap()
}

fn request(content: &str) -> LlmRequest {
    LlmRequest {
        model: String::new(),
        messages: vec![Message {
            role: Role::User,
            content: content.to_string(),
        }],
        temperature: None,
        max_tokens: None,
    }
}

#[tokio::test]
async fn chat_maps_completion_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Shoes sold 120 units."},
                    "finish_reason": "stop"
                }
            ]
        })))
        .mount(&server)
        .await;

    let chat = chat().with_base_url(server.uri());

    let out = chat.complete(request("most sold?")).await.unwrap();
    assert_eq!(out.content, "Shoes sold 120 units.");
}

#[tokio::test]
async fn chat_fills_default_model_when_request_model_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "ok"},
                    "finish_reason": "stop"
                }
            ]
        })))
        .mount(&server)
        .await;

    let chat = chat().with_base_url(server.uri());

    let out = chat.complete(request("hello")).await.unwrap();
    assert_eq!(out.content, "ok");
}

#[tokio::test]
async fn chat_keeps_explicit_request_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4.1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "ok"},
                    "finish_reason": "stop"
                }
            ]
        })))
        .mount(&server)
        .await;

    let chat = chat().with_base_url(server.uri());
    let mut req = request("hello");
    req.model = "gpt-4.1".to_string();

    let out = chat.complete(req).await.unwrap();
    assert_eq!(out.content, "ok");
}

#[tokio::test]
async fn chat_rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"error": {"message": "Rate limit reached"}})),
        )
        .mount(&server)
        .await;

    let chat = chat().with_base_url(server.uri());

    let err = chat.complete(request("hello")).await.unwrap_err();
    assert!(matches!(err, LlmError::RateLimited { .. }));
}

#[tokio::test]
async fn chat_server_error_maps_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(json!({"error": {"message": "Service overloaded"}})),
        )
        .mount(&server)
        .await;

    let chat = chat().with_base_url(server.uri());

    let err = chat.complete(request("hello")).await.unwrap_err();
    match err {
        LlmError::Provider(message) => assert!(message.contains("Service overloaded")),
        other => panic!("expected Provider, got {other:?}"),
    }
}

#[tokio::test]
async fn chat_missing_choices_returns_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let chat = chat().with_base_url(server.uri());

    let err = chat.complete(request("hello")).await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn chat_null_content_maps_to_empty_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": null},
                    "finish_reason": "stop"
                }
            ]
        })))
        .mount(&server)
        .await;

    let chat = chat().with_base_url(server.uri());

    let out = chat.complete(request("hello")).await.unwrap();
    assert_eq!(out.content, "");
}
