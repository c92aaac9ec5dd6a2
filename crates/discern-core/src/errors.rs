//! Fatal error taxonomy for the pipeline.
//!
//! Only structural and configuration failures abort a run. Per-record
//! failures (oracle transport errors, malformed judge output) are recovered
//! locally and recorded as [`ErrorJudgment`](crate::model::ErrorJudgment)
//! data instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input file could not be read.
    #[error("cannot read {path}: {source}")]
    MissingInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An input file was read but did not match the artifact schema.
    #[error("malformed artifact {path}: {detail}")]
    MalformedArtifact { path: String, detail: String },

    /// A structurally required field is absent or empty.
    #[error("missing `{field}` in {path}")]
    MissingField { field: &'static str, path: String },

    /// The oracle credential environment variable is unset. Checked at
    /// startup, before any work begins.
    #[error("credential not set: {0}")]
    Credential(&'static str),

    /// The HTTP client for the oracle could not be constructed.
    #[error("oracle client init failed: {0}")]
    ClientInit(String),

    /// An output artifact could not be written.
    #[error("cannot write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
