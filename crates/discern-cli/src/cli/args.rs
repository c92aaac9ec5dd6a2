use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "discern",
    version,
    about = "Judge-scored evaluation of fine-tuned model variants against pass/fail thresholds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score raw model responses with the LLM judge
    Score(ScoreArgs),
    /// Apply the threshold table to a scored artifact and render the report
    Analyze(AnalyzeArgs),
    /// Format responses into side-by-side comparison batches for manual judging
    Export(ExportArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Responses JSON produced by the inference step
    #[arg(long, default_value = "eval/responses.json")]
    pub input: PathBuf,

    #[arg(long, default_value = "eval/scores.json")]
    pub output: PathBuf,

    /// Judge model id
    #[arg(long, default_value = discern_core::providers::llm::anthropic::DEFAULT_JUDGE_MODEL)]
    pub model: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Scored artifact produced by `discern score`
    #[arg(long, default_value = "eval/scores.json")]
    pub scores: PathBuf,

    #[arg(long, default_value = "eval/report.md")]
    pub output: PathBuf,

    /// Model name treated as the untrained baseline
    #[arg(long, default_value = "base")]
    pub baseline: String,

    /// Model name treated as the shuffled control
    #[arg(long, default_value = "shuffled")]
    pub control: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Responses JSON produced by the inference step
    #[arg(long, default_value = "eval/responses.json")]
    pub input: PathBuf,

    #[arg(long, default_value = "eval/formatted_for_scoring.json")]
    pub output: PathBuf,

    #[arg(long, default_value = "base")]
    pub baseline: String,

    #[arg(long, default_value = "curriculum")]
    pub candidate: String,

    #[arg(long, default_value = "shuffled")]
    pub control: String,

    /// Comparisons per batch
    #[arg(long, default_value_t = 5)]
    pub batch_size: usize,
}
