//! Claude Messages API transport.

use std::time::Duration;

use crate::error::{Result, ScrubLensError};

use super::AiProvider;

const API_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
const MAX_TOKENS: u32 = 1000;

/// Sends prompts to the Anthropic Messages API.
pub struct ClaudeProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Create a provider with the given API key and optional model override.
    pub fn new(api_key: String, model: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client,
        }
    }

    async fn send(&self, prompt: &str) -> std::result::Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(API_ENDPOINT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "messages": [{"role": "user", "content": prompt}],
            }))
            .send()
            .await
    }
}

/// Extract the reply text from a successful Messages API response body.
fn extract_reply(body: &serde_json::Value) -> Result<String> {
    body.get("content")
        .and_then(|c| c.get(0))
        .and_then(|first| first.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ScrubLensError::Provider(format!("Unexpected response format from API: {}", body))
        })
}

/// Extract a useful message from an API error body, falling back to the raw
/// text when it isn't the documented error JSON.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => {
            if let Some(message) = json
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                format!("API call failed: {} - {}", status.as_u16(), message)
            } else {
                format!("API call failed: {} - {}", status.as_u16(), body)
            }
        }
        Err(_) => format!("API call failed: {} - {}", status.as_u16(), body),
    }
}

#[async_trait::async_trait]
impl AiProvider for ClaudeProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // One bounded retry on transient connect failure; everything else
        // surfaces immediately.
        let response = match self.send(prompt).await {
            Ok(resp) => resp,
            Err(e) if e.is_connect() || e.is_timeout() => {
                tracing::warn!(error = %e, "connection failed, retrying once");
                self.send(prompt)
                    .await
                    .map_err(|e| ScrubLensError::Provider(e.to_string()))?
            }
            Err(e) => return Err(ScrubLensError::Provider(e.to_string())),
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScrubLensError::Provider(e.to_string()))?;

        if !status.is_success() {
            return Err(ScrubLensError::Provider(error_message(status, &body)));
        }

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|_| ScrubLensError::Provider(format!("Failed to parse API response: {}", body)))?;
        extract_reply(&json)
    }

    fn name(&self) -> &str {
        "claude"
    }
}
