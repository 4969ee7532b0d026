use std::time::Duration;

use anyhow::Result;
use serde_json::Value;

use super::error::{TurnError, TurnErrorKind};
use super::models::Transcript;
use crate::ai::credentials::{BoxedCredentialSource, SecretsEndpoint};
use crate::ai::prompt::system_message;
use crate::core::AppConfig;
use crate::openai::{Message, Role, completion, first_choice_content};

/// A single conversation with an LLM using an OpenAI compatible chat
/// completion API.
///
/// Every turn replays the whole transcript, nothing is truncated or
/// summarized. A fresh credential is fetched for each request.
///
/// Use `ChatBuilder` to construct a valid `Chat`.
pub struct Chat {
    api_hostname: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    timeout: Duration,
    credentials: BoxedCredentialSource,
    transcript: Transcript,
}

/// What to show the user after a turn settles.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub display: String,
    pub error: Option<TurnErrorKind>,
}

impl TurnOutcome {
    fn reply(content: String) -> Self {
        Self {
            display: content,
            error: None,
        }
    }

    fn failed(kind: TurnErrorKind) -> Self {
        Self {
            display: kind.fallback().to_string(),
            error: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Classifies a completion response body into the reply text or the
/// reason there isn't one.
pub fn parse_reply(body: &str) -> Result<String, TurnError> {
    let resp: Value = serde_json::from_str(body)?;
    first_choice_content(&resp)
        .map(String::from)
        .ok_or_else(|| TurnError::UnexpectedResponse(resp.to_string()))
}

impl Chat {
    /// Runs one turn of the conversation and returns what should be
    /// displayed. The user message is always kept. The assistant reply
    /// is only added when the whole round trip succeeds, otherwise the
    /// failure is logged and a fixed fallback is returned instead.
    pub async fn submit_turn(&mut self, user_text: &str) -> TurnOutcome {
        match self.next_msg(user_text).await {
            Ok(reply) => TurnOutcome::reply(reply),
            Err(err) => {
                tracing::error!(kind = %err.kind(), "Chat turn failed: {}", err);
                TurnOutcome::failed(err.kind())
            }
        }
    }

    /// Same as `submit_turn` but hands back the error for callers that
    /// want to handle it themselves.
    pub async fn next_msg(&mut self, user_text: &str) -> Result<String, TurnError> {
        self.transcript.push(Message::new(Role::User, user_text));

        let reply = self.request_reply().await?;
        tracing::debug!("Received reply of {} bytes", reply.len());

        self.transcript.push(Message::new(Role::Assistant, &reply));
        Ok(reply)
    }

    async fn request_reply(&self) -> Result<String, TurnError> {
        let api_key = self
            .credentials
            .fetch()
            .await
            .map_err(|e| TurnError::Connection(e.context("Failed to fetch API key")))?;

        let body = completion(
            self.transcript.messages(),
            &self.api_hostname,
            &api_key,
            &self.model,
            self.max_tokens,
            self.temperature,
            self.timeout,
        )
        .await
        .map_err(TurnError::Connection)?;

        parse_reply(&body)
    }

    /// Get the full conversation history.
    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    /// Number of messages in history, including the system message.
    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Start over with only the system message.
    pub fn clear(&mut self) {
        self.transcript.reset();
    }
}

pub struct ChatBuilder {
    api_hostname: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    timeout: Duration,
    system_message: Option<String>,
    credentials: BoxedCredentialSource,
}

impl ChatBuilder {
    pub fn new(api_hostname: &str, model: &str, credentials: BoxedCredentialSource) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            model: model.to_string(),
            max_tokens: 800,
            temperature: 0.7,
            timeout: Duration::from_secs(60),
            system_message: None,
            credentials,
        }
    }

    /// Settings from the environment with the API key fetched from
    /// the configured secrets endpoint.
    pub fn from_config(config: &AppConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let credentials = SecretsEndpoint::new(&config.secrets_url).timeout(timeout);
        let mut builder = Self::new(
            &config.openai_api_hostname,
            &config.openai_model,
            Box::new(credentials),
        )
        .max_tokens(config.max_tokens)
        .temperature(config.temperature)
        .timeout(timeout);
        builder.system_message = config.system_message.clone();
        builder
    }

    pub fn build(self) -> Result<Chat> {
        let system = system_message(self.system_message.as_deref())?;
        Ok(Chat {
            api_hostname: self.api_hostname,
            model: self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: self.timeout,
            credentials: self.credentials,
            transcript: Transcript::new(&system),
        })
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn credentials(mut self, credentials: BoxedCredentialSource) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn system_message(mut self, msg: &str) -> Self {
        self.system_message = Some(msg.to_string());
        self
    }
}
