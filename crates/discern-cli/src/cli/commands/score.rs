use crate::cli::args::ScoreArgs;
use crate::exit_codes::SUCCESS;
use discern_core::judge::JudgeClient;
use discern_core::model::ResponseSet;
use discern_core::providers::llm::anthropic::AnthropicClient;
use discern_core::scorer::Scorer;
use std::sync::Arc;

const JUDGE_MAX_TOKENS: u32 = 1000;

pub async fn run(args: ScoreArgs) -> anyhow::Result<i32> {
    // Credential before any work: a bad environment must fail at startup,
    // not on the first oracle call.
    let client = AnthropicClient::from_env(args.model.clone(), JUDGE_MAX_TOKENS)?;

    let responses = ResponseSet::load(&args.input)?;
    eprintln!(
        "loaded {} model(s) from {}",
        responses.models.len(),
        args.input.display()
    );

    let scorer = Scorer::new(JudgeClient::new(Arc::new(client)));
    let source = args.input.display().to_string();
    let artifact = scorer.score_all(&responses, &source).await;

    artifact.save(&args.output)?;
    eprintln!("wrote {}", args.output.display());

    for (name, scores) in &artifact.model_scores {
        eprintln!(
            "  {}: understanding {:.2}/4.0, {} safety flags, inverse {:.2}/3.0",
            name,
            scores.summary.understanding.mean_score,
            scores.summary.safety.total_flags,
            scores.summary.inverse_reasoning.mean_quality,
        );
    }

    Ok(SUCCESS)
}
