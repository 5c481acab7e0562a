//! Compatibility insight generation over an Anthropic-style Messages API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmSettings;
use crate::models::PublicProfile;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_RETRIES: u32 = 3;

const SYSTEM_PROMPT: &str = "You are an experienced matchmaker. Given two customer profiles, \
write a short, warm and honest compatibility summary for the matchmaker: shared values, \
complementary traits, and topics worth discussing before an introduction. Plain text, \
no more than 200 words.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Produces free-text compatibility insights for two profiles
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate_insights(
        &self,
        customer: &PublicProfile,
        partner: &PublicProfile,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

impl MessagesResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for the text-generation API
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    retry_base: Duration,
}

impl LlmClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.unwrap_or(60)))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens.unwrap_or(1024),
            retry_base: Duration::from_millis(1000),
        })
    }

    /// Shorten the backoff between retries
    pub fn with_retry_base(mut self, base: Duration) -> Self {
        self.retry_base = base;
        self
    }

    /// Send one prompt, retrying on 429 and 5xx with exponential backoff
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.retry_base * (1 << (attempt - 1));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, message);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let raw = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                    .map(|e| e.error.message)
                    .unwrap_or(raw);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: MessagesResponse = response.json().await?;
            let text = parsed.text().ok_or(LlmError::EmptyContent)?.trim();
            if text.is_empty() {
                return Err(LlmError::EmptyContent);
            }

            debug!("LLM call succeeded on attempt {}", attempt + 1);
            return Ok(text.to_string());
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// User prompt carrying both profiles as JSON
pub fn insights_prompt(
    customer: &PublicProfile,
    partner: &PublicProfile,
) -> Result<String, serde_json::Error> {
    Ok(format!(
        "Customer profile:\n{}\n\nPotential partner profile:\n{}\n\n\
         Describe how compatible these two people are.",
        serde_json::to_string_pretty(customer)?,
        serde_json::to_string_pretty(partner)?,
    ))
}

#[async_trait]
impl InsightGenerator for LlmClient {
    async fn generate_insights(
        &self,
        customer: &PublicProfile,
        partner: &PublicProfile,
    ) -> Result<String, LlmError> {
        let prompt = insights_prompt(customer, partner)?;
        self.complete(&prompt, SYSTEM_PROMPT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(endpoint: String) -> LlmSettings {
        LlmSettings {
            endpoint,
            api_key: "test_key".to_string(),
            model: "test-model".to_string(),
            max_tokens: Some(256),
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn test_complete_returns_text_block() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":[{"type":"text","text":"  Great match.  "}]}"#)
            .create_async()
            .await;

        let client = LlmClient::new(&settings(format!("{}/v1/messages", server.url()))).unwrap();
        let text = client.complete("prompt", "system").await.unwrap();

        assert_eq!(text, "Great match.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(400)
            .with_body(r#"{"error":{"message":"bad request"}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = LlmClient::new(&settings(format!("{}/v1/messages", server.url()))).unwrap();
        let err = client.complete("prompt", "system").await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad request");
            }
            other => panic!("unexpected error: {other}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let client = LlmClient::new(&settings(format!("{}/v1/messages", server.url())))
            .unwrap()
            .with_retry_base(Duration::from_millis(1));
        let err = client.complete("prompt", "system").await.unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 503, .. }));
        mock.assert_async().await;
    }
}
