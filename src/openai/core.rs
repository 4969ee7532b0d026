use std::time::Duration;

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

/// A single role-tagged entry of a chat transcript. Fields are
/// private so a message can't be edited after it's been added to a
/// transcript.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Sends the full transcript to an OpenAI compatible chat completion
/// endpoint and returns the raw response body.
///
/// Transport errors and non-2xx statuses are returned as errors. The
/// body is returned unparsed so callers can tell a broken payload
/// apart from an unreachable service.
pub async fn completion(
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
    max_tokens: u32,
    temperature: f64,
    timeout: Duration,
) -> Result<String, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "max_tokens": max_tokens,
        "temperature": temperature,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let body = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(timeout)
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(body)
}

/// Pulls the reply text out of a chat completion response.
///
/// Only the first choice is considered. Returns `None` when there are
/// no choices or the first one has no string content.
pub fn first_choice_content(resp: &Value) -> Option<&str> {
    resp["choices"][0]["message"]["content"].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
    }

    #[test]
    fn test_role_deserialization() {
        assert_eq!(serde_json::from_str::<Role>(r#""system""#).unwrap(), Role::System);
        assert_eq!(
            serde_json::from_str::<Role>(r#""assistant""#).unwrap(),
            Role::Assistant
        );
        assert_eq!(serde_json::from_str::<Role>(r#""user""#).unwrap(), Role::User);
        assert!(serde_json::from_str::<Role>(r#""tool""#).is_err());
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new(Role::User, "Hello world");
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"role":"user","content":"Hello world"}"#
        );
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.content(), "Hello world");
    }

    #[test]
    fn test_first_choice_content() {
        let resp = json!({"choices": [{"message": {"role": "assistant", "content": "Hi"}}]});
        assert_eq!(first_choice_content(&resp), Some("Hi"));

        let resp = json!({
            "choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]
        });
        assert_eq!(first_choice_content(&resp), Some("first"));
    }

    #[test]
    fn test_first_choice_content_missing_fields() {
        assert_eq!(first_choice_content(&json!({})), None);
        assert_eq!(first_choice_content(&json!({"choices": []})), None);
        assert_eq!(first_choice_content(&json!({"choices": [{}]})), None);
        assert_eq!(
            first_choice_content(&json!({"choices": [{"message": {"content": null}}]})),
            None
        );
        assert_eq!(first_choice_content(&json!([1, 2, 3])), None);
    }

    #[tokio::test]
    async fn test_completion_sends_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::Json(json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "Hi"}],
                "max_tokens": 100,
                "temperature": 0.5
            })))
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let messages = vec![Message::new(Role::User, "Hi")];
        let body = completion(
            &messages,
            &format!("{}/", server.url()),
            "test-key",
            "gpt-4o",
            100,
            0.5,
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(body, r#"{"choices":[]}"#);
    }

    #[tokio::test]
    async fn test_completion_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let messages = vec![Message::new(Role::User, "Hi")];
        let result = completion(
            &messages,
            &server.url(),
            "test-key",
            "gpt-4o",
            100,
            0.5,
            Duration::from_secs(5),
        )
        .await;

        assert!(result.is_err());
    }
}
