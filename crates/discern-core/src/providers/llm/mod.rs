pub mod anthropic;

use async_trait::async_trait;

/// A completion from the oracle.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// Transport abstraction over the judging oracle. Implementations perform
/// one network call per invocation; retries are the caller's business.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}
