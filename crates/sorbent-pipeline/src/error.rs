//! Error types for the pipeline

use sorbent_domain::{InvokeError, SourceError};
use thiserror::Error;

/// Errors that can occur while running the pipeline
///
/// The `Display` text of a fatal variant becomes the run's error detail.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The document could not be loaded (fatal, ends the run while loading)
    #[error("Failed to load document: {0}")]
    SourceUnavailable(#[from] SourceError),

    /// The extraction backend failed (fatal, ends the run mid-loop)
    #[error("Analysis failed: {0}")]
    ServiceFailure(String),

    /// Backend output could not be parsed (soft, skips one segment)
    #[error("Malformed output: {0}")]
    MalformedOutput(String),

    /// The table could not be produced (fatal, findings stay readable)
    #[error("Formatting failed: {0}")]
    ProjectionFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Whether this error ends the run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PipelineError::MalformedOutput(_))
    }
}

impl From<InvokeError> for PipelineError {
    fn from(e: InvokeError) -> Self {
        match e {
            InvokeError::MalformedOutput(msg) => PipelineError::MalformedOutput(msg),
            InvokeError::ServiceFailure(msg) => PipelineError::ServiceFailure(msg),
        }
    }
}

impl From<PipelineError> for InvokeError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::MalformedOutput(msg) => InvokeError::MalformedOutput(msg),
            other => InvokeError::ServiceFailure(other.to_string()),
        }
    }
}
