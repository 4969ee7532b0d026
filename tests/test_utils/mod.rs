//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body};

use tripchat::ai::chat::{Chat, ChatBuilder};
use tripchat::ai::credentials::StaticCredential;
use tripchat::api::{AppState, app};
use tripchat::core::AppConfig;

pub const TEST_API_KEY: &str = "test-api-key";

pub fn test_config(llm_url: &str) -> AppConfig {
    AppConfig {
        openai_api_hostname: llm_url.to_string(),
        openai_api_key: String::from(TEST_API_KEY),
        openai_model: String::from("gpt-4o"),
        max_tokens: 800,
        temperature: 0.7,
        timeout_secs: 5,
        secrets_url: String::from("http://127.0.0.1:2222/secrets/apiKey"),
        system_message: None,
    }
}

/// A session talking to `llm_url` with a fixed key.
pub fn test_session(llm_url: &str) -> Chat {
    ChatBuilder::new(llm_url, "gpt-4o", Box::new(StaticCredential::new(TEST_API_KEY)))
        .build()
        .expect("Failed to build chat session")
}

/// Creates a test application router along with its state so tests
/// can claim the session to simulate a turn in flight.
pub fn test_app(llm_url: &str) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(test_session(llm_url), test_config(llm_url)));
    (app(Arc::clone(&state)), state)
}

/// A successful chat completion response with `content` as the reply.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

/// Starts a server that accepts connections and never answers. Returns
/// its base URL.
pub async fn silent_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}
