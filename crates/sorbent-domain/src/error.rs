//! Failure kinds reported by the pipeline's collaborators

use std::error::Error;
use std::fmt;

/// The segment source could not produce segments for a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    /// Locator that failed to load (usually a file path)
    pub locator: String,
    /// Human-readable cause
    pub reason: String,
}

impl SourceError {
    /// Create a new source error
    pub fn new(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source '{}' unavailable: {}", self.locator, self.reason)
    }
}

impl Error for SourceError {}

/// Failure of a single extraction call.
///
/// The two variants carry different policies: a malformed response only skips
/// the segment it came from, a service failure ends the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The backend answered but the answer is not the expected structure
    MalformedOutput(String),
    /// The call itself failed (network, backend, timeout, ...)
    ServiceFailure(String),
}

impl InvokeError {
    /// Whether the pipeline may skip the segment and keep going
    pub fn is_soft(&self) -> bool {
        matches!(self, InvokeError::MalformedOutput(_))
    }
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::MalformedOutput(msg) => write!(f, "malformed output: {}", msg),
            InvokeError::ServiceFailure(msg) => write!(f, "service failure: {}", msg),
        }
    }
}

impl Error for InvokeError {}
