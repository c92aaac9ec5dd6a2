//! Scorer: drives the [`JudgeClient`] across every response in a
//! [`ResponseSet`] and assembles the scored artifact.
//!
//! Oracle calls are issued one at a time so each score stays attributable in
//! the logs and the oracle's rate limits are respected. Judgments are
//! independent, so a run aborted at any record boundary leaves a valid
//! partial artifact (detectable via the per-category `count` fields).

use crate::judge::{extract_bad_reasoning, JudgeClient};
use crate::model::{
    Category, InverseReasoningRow, ModelResponses, ModelScores, ModelSummary, ResponseSet,
    SafetyRow, ScoreMetadata, ScoredArtifact, UnderstandingRow,
};
use std::collections::BTreeMap;

pub struct Scorer {
    judge: JudgeClient,
}

impl Scorer {
    pub fn new(judge: JudgeClient) -> Self {
        Self { judge }
    }

    /// Score every model in the set. Total oracle calls per model:
    /// `novel_scenarios * 2 + format_transfer + inverse_reasoning`.
    pub async fn score_all(&self, responses: &ResponseSet, source_file: &str) -> ScoredArtifact {
        let mut model_scores = BTreeMap::new();
        for (model_name, model_data) in &responses.models {
            tracing::info!(model = %model_name, "scoring model");
            let scores = self.score_model(model_data).await;
            tracing::info!(
                model = %model_name,
                understanding = %format!("{:.2}/4.0", scores.summary.understanding.mean_score),
                safety_flags = scores.summary.safety.total_flags,
                inverse = %format!("{:.2}/3.0", scores.summary.inverse_reasoning.mean_quality),
                "model scored"
            );
            model_scores.insert(model_name.clone(), scores);
        }
        ScoredArtifact {
            metadata: ScoreMetadata {
                timestamp: chrono::Utc::now().to_rfc3339(),
                source_file: source_file.to_string(),
            },
            model_scores,
        }
    }

    /// Score one model's responses across all three categories.
    pub async fn score_model(&self, model: &ModelResponses) -> ModelScores {
        let mut understanding = Vec::new();
        let mut safety = Vec::new();
        let mut inverse = Vec::new();

        // Novel scenarios get both an understanding score and a safety check;
        // this is the only category where open-ended claims are expected.
        for item in &model.responses.novel_scenarios {
            tracing::info!(id = %item.id, category = "novel_scenarios", "scoring");
            let scores = self
                .judge
                .score_understanding(&item.prompt, &item.response)
                .await;
            understanding.push(UnderstandingRow {
                id: item.id.clone(),
                category: Category::NovelScenarios,
                circle_concept: item.circle_concept.clone(),
                scores,
            });

            let checks = self.judge.check_safety(&item.response).await;
            safety.push(SafetyRow {
                id: item.id.clone(),
                category: Category::NovelScenarios,
                checks,
            });
        }

        for item in &model.responses.format_transfer {
            tracing::info!(id = %item.id, category = "format_transfer", "scoring");
            let scores = self
                .judge
                .score_understanding(&item.prompt, &item.response)
                .await;
            understanding.push(UnderstandingRow {
                id: item.id.clone(),
                category: Category::FormatTransfer,
                circle_concept: item.circle_concept.clone(),
                scores,
            });
        }

        for item in &model.responses.inverse_reasoning {
            tracing::info!(id = %item.id, category = "inverse_reasoning", "scoring");
            let bad_reasoning = extract_bad_reasoning(&item.prompt);
            let scores = self
                .judge
                .score_inverse_reasoning(bad_reasoning, &item.response)
                .await;
            inverse.push(InverseReasoningRow {
                id: item.id.clone(),
                circle_concept: item.circle_concept.clone(),
                scores,
            });
        }

        let summary = ModelSummary::compute(&understanding, &safety, &inverse);
        ModelScores {
            understanding_scores: understanding,
            safety_checks: safety,
            inverse_reasoning_scores: inverse,
            summary,
        }
    }
}
