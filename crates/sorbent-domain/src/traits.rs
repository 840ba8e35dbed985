//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Implementations live in other crates.

use crate::error::{InvokeError, SourceError};
use crate::finding::Finding;
use crate::segment::LoadedDocument;

/// Turns a locator into ordered, page-tagged segments
///
/// Implemented by the infrastructure layer (sorbent-pipeline's `FileSource`)
pub trait SegmentSource {
    /// Load and split the document behind `locator`
    fn load(&self, locator: &str) -> Result<LoadedDocument, SourceError>;
}

/// Extracts findings from one segment's text
///
/// Implemented by the application layer (sorbent-pipeline's `LlmInvoker`)
pub trait ExtractionInvoker {
    /// Answer `questions` about `text`, returning zero or more findings
    fn extract(&self, text: &str, questions: &[String]) -> Result<Vec<Finding>, InvokeError>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (sorbent-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}
