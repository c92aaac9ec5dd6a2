use crate::cli::args::AnalyzeArgs;
use crate::exit_codes::SUCCESS;
use discern_core::analysis::{Analyzer, Thresholds};
use discern_core::errors::PipelineError;
use discern_core::model::ScoredArtifact;
use discern_core::report::{console, markdown};

pub fn run(args: AnalyzeArgs) -> anyhow::Result<i32> {
    let artifact = ScoredArtifact::load(&args.scores)?;
    if artifact.model_scores.is_empty() {
        return Err(PipelineError::MissingField {
            field: "model_scores",
            path: args.scores.display().to_string(),
        }
        .into());
    }

    let thresholds = Thresholds::default();
    thresholds.validate()?;
    let analyzer = Analyzer::new(thresholds);

    let baseline = artifact.model_scores.get(&args.baseline);
    let control = artifact.model_scores.get(&args.control);

    // Role-ordered verdicts: baseline stands alone, candidates are measured
    // against baseline and control, the control against the baseline only.
    let mut verdicts = Vec::new();
    if let Some(scores) = baseline {
        verdicts.push(analyzer.evaluate(&args.baseline, scores, None, None));
    }
    for (name, scores) in &artifact.model_scores {
        if *name == args.baseline || *name == args.control {
            continue;
        }
        verdicts.push(analyzer.evaluate(name, scores, baseline, control));
    }
    if let Some(scores) = control {
        verdicts.push(analyzer.evaluate(&args.control, scores, baseline, None));
    }

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let report = markdown::render(&verdicts, analyzer.thresholds(), &generated_at);

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&args.output, &report)?;
    eprintln!("wrote {}", args.output.display());

    console::print_summary(&verdicts);
    Ok(SUCCESS)
}
