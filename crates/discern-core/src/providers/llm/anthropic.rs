use super::{LlmClient, LlmResponse};
use crate::errors::PipelineError;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Judge model used when none is configured.
pub const DEFAULT_JUDGE_MODEL: &str = "claude-sonnet-4-20250514";

/// Environment variable gating all oracle calls.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Oracle calls are batch and idempotent per record; a non-responsive oracle
/// must surface as an error judgment, not block the run forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct AnthropicClient {
    pub model: String,
    api_key: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(model: String, api_key: String, max_tokens: u32) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PipelineError::ClientInit(e.to_string()))?;
        Ok(Self {
            model,
            api_key,
            max_tokens,
            client,
        })
    }

    /// Create from the environment. A missing credential is a startup-time
    /// fatal error, not a per-call one.
    pub fn from_env(model: String, max_tokens: u32) -> Result<Self, PipelineError> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| PipelineError::Credential(API_KEY_VAR))?;
        Self::new(model, api_key, max_tokens)
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{"role": "user", "content": prompt}],
        });

        let resp = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!("anthropic messages API error (status {}): {}", status, error_text);
        }

        let json: serde_json::Value = resp.json().await?;

        let text = json
            .pointer("/content/0/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("anthropic API response missing text content"))?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "anthropic".to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_constructs_with_bounded_timeout() {
        let client = AnthropicClient::new(
            DEFAULT_JUDGE_MODEL.to_string(),
            "test-key".to_string(),
            1000,
        )
        .unwrap();
        assert_eq!(client.provider_name(), "anthropic");
        assert_eq!(client.model, DEFAULT_JUDGE_MODEL);
    }
}
