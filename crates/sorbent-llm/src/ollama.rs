//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API, for running extraction
//! against a local model.
//!
//! # Examples
//!
//! ```no_run
//! use sorbent_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1");
//! ```

use crate::http::{block_on, send_with_retry};
use crate::LlmError;
use serde::{Deserialize, Serialize};
use sorbent_domain::traits::LlmProvider as LlmProviderTrait;
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests. Local models are slow on long segments.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.1", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text using the Ollama API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - Network communication fails
    /// - Response envelope is invalid
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let request_body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions { temperature: 0.0 },
        };

        let response = send_with_retry(self.max_retries, &self.model, || {
            self.client
                .post(&url)
                .timeout(self.timeout)
                .json(&request_body)
        })
        .await?;

        response
            .json::<OllamaGenerateResponse>()
            .await
            .map(|r| r.response)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(OllamaProvider::generate(self, prompt))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llama3.1");
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model(), "llama3.1");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(provider.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_ollama_provider_builders() {
        let provider = OllamaProvider::default_endpoint("mistral")
            .with_max_retries(5)
            .with_timeout(Duration::from_secs(10));
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.max_retries, 5);
        assert_eq!(provider.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_request_body_shape() {
        let body = OllamaGenerateRequest {
            model: "llama3.1",
            prompt: "hi",
            stream: false,
            options: OllamaOptions { temperature: 0.0 },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.1");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.0);
    }

    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_generate_integration() {
        let provider = OllamaProvider::default_endpoint("llama3.1");
        let result = provider.generate("Say 'hello' and nothing else").await;
        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Invalid port makes the request fail before any network I/O
        let provider = OllamaProvider::new("http://localhost:99999", "llama3.1")
            .with_max_retries(1);

        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[test]
    fn test_sync_trait_outside_runtime() {
        let provider = OllamaProvider::new("http://localhost:99999", "llama3.1")
            .with_max_retries(1);
        let result = LlmProviderTrait::generate(&provider, "test");
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
