//! Where the bearer token for the completion endpoint comes from.
//!
//! A token is requested right before every completion and dropped as
//! soon as the request has been sent. Nothing here caches it.

use std::time::Duration;

use anyhow::{Error, Result, bail};
use async_trait::async_trait;

#[async_trait]
pub trait CredentialSource {
    async fn fetch(&self) -> Result<String, Error>;
}

pub type BoxedCredentialSource = Box<dyn CredentialSource + Send + Sync + 'static>;

/// Fetches the token as raw text from a local HTTP endpoint
/// (e.g. `GET /secrets/apiKey`).
pub struct SecretsEndpoint {
    url: String,
    timeout: Duration,
}

impl SecretsEndpoint {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CredentialSource for SecretsEndpoint {
    async fn fetch(&self) -> Result<String, Error> {
        let body = reqwest::Client::new()
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // Secret files usually end with a newline which isn't allowed
        // in a header value
        let token = body.trim();
        if token.is_empty() {
            bail!("Secrets endpoint {} returned an empty token", self.url);
        }
        Ok(token.to_string())
    }
}

/// A fixed token, for when the key is already in hand.
pub struct StaticCredential(String);

impl StaticCredential {
    pub fn new(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[async_trait]
impl CredentialSource for StaticCredential {
    async fn fetch(&self) -> Result<String, Error> {
        Ok(self.0.clone())
    }
}
