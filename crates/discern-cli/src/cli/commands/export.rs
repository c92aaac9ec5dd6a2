use crate::cli::args::ExportArgs;
use crate::exit_codes::SUCCESS;
use discern_core::export::build_export;
use discern_core::model::ResponseSet;

pub fn run(args: ExportArgs) -> anyhow::Result<i32> {
    let responses = ResponseSet::load(&args.input)?;
    let source = args.input.display().to_string();

    let artifact = build_export(
        &responses,
        &args.baseline,
        &args.candidate,
        &args.control,
        args.batch_size,
        &source,
    )?;

    artifact.save(&args.output)?;
    eprintln!(
        "wrote {} ({} comparisons in {} batches)",
        args.output.display(),
        artifact.metadata.total_comparisons,
        artifact.metadata.num_batches,
    );

    Ok(SUCCESS)
}
