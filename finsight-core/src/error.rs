//! Pipeline error vocabulary.
//!
//! Only file-level problems are fatal. Row-level anomalies (missing amount,
//! unparseable date, blank description) are dropped or defaulted upstream and
//! never surface here.

use thiserror::Error;

/// Fatal failures of a single pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The format hint (usually a file extension) is not one we ingest.
    #[error("unsupported statement format: {0}")]
    UnsupportedFormat(String),

    /// Parsing succeeded but zero usable rows or lines survived.
    #[error("no usable transactions found: {0}")]
    EmptyInput(String),

    /// The underlying reader failed, or a required text service is
    /// unavailable. The message carries the underlying cause.
    #[error("extraction failed: {0}")]
    ExtractionFailure(String),
}

impl PipelineError {
    /// Wrap an underlying reader/service error.
    pub fn extraction(context: &str, cause: impl std::fmt::Display) -> Self {
        PipelineError::ExtractionFailure(format!("{context}: {cause}"))
    }
}
