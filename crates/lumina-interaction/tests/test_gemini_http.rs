use std::sync::Arc;

use httpmock::prelude::*;
use lumina_core::{ChatSession, GatewayConfig};
use lumina_interaction::gateway::{
    CHAT_EMPTY_REPLY, CHAT_REQUEST_FAILED, TIPS_REQUEST_FAILED,
};
use lumina_interaction::{AssistantGateway, GeminiBackend};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn gateway_for(server: &MockServer) -> AssistantGateway {
    let config = GatewayConfig::default()
        .with_api_key("test-key")
        .with_model(MODEL);
    let backend = GeminiBackend::from_config(&config)
        .unwrap()
        .with_base_url(server.url("/v1beta/models"));
    AssistantGateway::new(Arc::new(backend))
}

fn candidate(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
}

#[tokio::test]
async fn test_reply_posts_conversation_with_key_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ENDPOINT)
                .header("x-goog-api-key", "test-key")
                .body_includes(r#""role":"model""#)
                .body_includes(r#""text":"Which sofa fits a loft?""#)
                .body_includes(r#""system_instruction":{"role":"system""#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(candidate("The Aria Velvet Sofa."));
        })
        .await;

    let mut session = ChatSession::new();
    let pending = session.begin_send("Which sofa fits a loft?").unwrap();
    let reply = gateway_for(&server)
        .get_assistant_reply(&pending.history, &pending.message)
        .await;

    mock.assert_async().await;
    assert_eq!(reply, "The Aria Velvet Sofa.");
}

#[tokio::test]
async fn test_styling_tips_disable_thinking() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ENDPOINT)
                .body_includes(r#""thinkingConfig":{"thinkingBudget":0}"#)
                .body_includes("Luna Pendant Lamp");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(candidate("- Hang it low"));
        })
        .await;

    let tips = gateway_for(&server)
        .get_styling_tips("Luna Pendant Lamp", "Opal glass globe")
        .await;

    mock.assert_async().await;
    assert_eq!(tips, "- Hang it low");
}

#[tokio::test]
async fn test_error_envelope_becomes_fallback() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(429)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "error": {
                        "code": 429,
                        "message": "Quota exceeded",
                        "status": "RESOURCE_EXHAUSTED"
                    }
                }));
        })
        .await;

    let gateway = gateway_for(&server);
    assert_eq!(gateway.get_assistant_reply(&[], "hi").await, CHAT_REQUEST_FAILED);
    assert_eq!(gateway.get_styling_tips("Desk", "Ash").await, TIPS_REQUEST_FAILED);
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_server_error_becomes_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(503).body("Service Unavailable");
        })
        .await;

    let reply = gateway_for(&server).get_assistant_reply(&[], "hi").await;
    assert_eq!(reply, CHAT_REQUEST_FAILED);
}

#[tokio::test]
async fn test_malformed_body_becomes_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(200)
                .header("content-type", "application/json")
                .body("{\"candidates\": [");
        })
        .await;

    let gateway = gateway_for(&server);
    assert_eq!(gateway.get_assistant_reply(&[], "hi").await, CHAT_REQUEST_FAILED);
    assert_eq!(gateway.get_styling_tips("Desk", "Ash").await, TIPS_REQUEST_FAILED);
}

#[tokio::test]
async fn test_no_candidates_uses_placeholder() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({"candidates": []}));
        })
        .await;

    let reply = gateway_for(&server).get_assistant_reply(&[], "hi").await;
    assert_eq!(reply, CHAT_EMPTY_REPLY);
}
