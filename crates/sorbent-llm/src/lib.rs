//! Sorbent LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `sorbent-domain`. Every backend answers a plain-text prompt with plain
//! text; turning that text into findings is the pipeline's job.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Generative Language API
//! - `OllamaProvider`: Local Ollama API integration
//! - `Provider`: Runtime selection between the above
//!
//! # Examples
//!
//! ```
//! use sorbent_llm::MockProvider;
//! use sorbent_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("[]");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "[]");
//! ```

#![warn(missing_docs)]

pub mod gemini;
mod http;
pub mod ollama;

use sorbent_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response envelope from the backend
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credential missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Replies are keyed by a marker substring: the first registered marker found
/// in the prompt decides the reply. Prompts embed the segment text, so a
/// marker placed in a segment selects the reply for that segment.
///
/// # Examples
///
/// ```
/// use sorbent_llm::MockProvider;
/// use sorbent_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::new("[]");
/// provider.add_response("page one", r#"[{"name": "A"}]"#);
/// provider.add_error("page two", "connection reset");
///
/// assert_eq!(provider.generate("... page one ...").unwrap(), r#"[{"name": "A"}]"#);
/// assert!(provider.generate("... page two ...").is_err());
/// assert_eq!(provider.generate("anything else").unwrap(), "[]");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    replies: Arc<Mutex<Vec<(String, MockReply)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            replies: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` to prompts containing `marker`
    pub fn add_response(&mut self, marker: impl Into<String>, response: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((marker.into(), MockReply::Text(response.into())));
    }

    /// Fail prompts containing `marker` with a communication error
    pub fn add_error(&mut self, marker: impl Into<String>, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((marker.into(), MockReply::Error(message.into())));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Forget recorded prompts
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
        let reply = replies
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(message)) => Err(LlmError::Communication(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}

/// Backend chosen at runtime (e.g. from configuration)
pub enum Provider {
    /// Google Generative Language API
    Gemini(GeminiProvider),
    /// Local Ollama instance
    Ollama(OllamaProvider),
    /// Canned responses
    Mock(MockProvider),
}

impl Provider {
    /// Short backend name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini(_) => "gemini",
            Provider::Ollama(_) => "ollama",
            Provider::Mock(_) => "mock",
        }
    }
}

impl LlmProviderTrait for Provider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Gemini(p) => LlmProviderTrait::generate(p, prompt),
            Provider::Ollama(p) => LlmProviderTrait::generate(p, prompt),
            Provider::Mock(p) => p.generate(prompt),
        }
    }
}
