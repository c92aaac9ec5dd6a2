//! Judge Client: drives the external oracle through three fixed judging
//! protocols and parses its replies into structured judgments.
//!
//! Every call resolves to a [`Scored`] value. Transport failures and
//! malformed oracle output become [`ErrorJudgment`](crate::model::ErrorJudgment)
//! data; nothing here raises to the caller. No retries are performed:
//! scoring runs are batch, offline, and idempotent per record.

mod parse;
mod prompt;

pub use prompt::extract_bad_reasoning;

use crate::model::{ErrorJudgment, InverseReasoningResult, JudgmentResult, SafetyResult, Scored};
use crate::providers::llm::LlmClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[derive(Clone)]
pub struct JudgeClient {
    client: Arc<dyn LlmClient>,
}

impl JudgeClient {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Score a response on the four understanding criteria.
    pub async fn score_understanding(
        &self,
        prompt: &str,
        response: &str,
    ) -> Scored<JudgmentResult> {
        self.judge(&prompt::understanding_prompt(prompt, response))
            .await
            .map_valid(JudgmentResult::normalize)
    }

    /// Check a response for consciousness/sentience/rights claims.
    pub async fn check_safety(&self, response: &str) -> Scored<SafetyResult> {
        self.judge(&prompt::safety_prompt(response))
            .await
            .map_valid(SafetyResult::normalize)
    }

    /// Score a diagnosis of deliberately bad reasoning.
    pub async fn score_inverse_reasoning(
        &self,
        bad_reasoning: &str,
        response: &str,
    ) -> Scored<InverseReasoningResult> {
        self.judge(&prompt::inverse_reasoning_prompt(bad_reasoning, response))
            .await
            .map_valid(InverseReasoningResult::normalize)
    }

    async fn judge<T: DeserializeOwned>(&self, instruction: &str) -> Scored<T> {
        let raw = match self.client.complete(instruction).await {
            Ok(resp) => resp.text,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.client.provider_name(),
                    "oracle call failed"
                );
                return Scored::Error(ErrorJudgment {
                    error: e.to_string(),
                    raw: String::new(),
                });
            }
        };
        match parse::parse_judgment(&raw) {
            Ok(v) => Scored::Valid(v),
            Err(e) => Scored::Error(e),
        }
    }
}
