//! Gemini Provider Implementation
//!
//! Calls the Google Generative Language `generateContent` endpoint with
//! temperature 0 so that repeated runs over the same document stay as stable
//! as the backend allows.
//!
//! The API key is passed in explicitly; this module never reads the
//! environment.
//!
//! # Examples
//!
//! ```no_run
//! use sorbent_llm::GeminiProvider;
//!
//! let provider = GeminiProvider::new("my-api-key", "gemini-2.5-flash-lite");
//! ```

use crate::http::{block_on, send_with_retry};
use crate::LlmError;
use serde::{Deserialize, Serialize};
use sorbent_domain::traits::LlmProvider as LlmProviderTrait;
use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Default timeout for a single request
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the API endpoint (proxies, test servers)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
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

    /// Generate text for `prompt`
    ///
    /// # Errors
    ///
    /// Returns error if the key is missing or rejected, the model does not
    /// exist, the request keeps failing after retries, or the response has
    /// no text candidate.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::Authentication("API key is empty".to_string()));
        }

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let response = send_with_retry(self.max_retries, &self.model, || {
            self.client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .timeout(self.timeout)
                .json(&request_body)
        })
        .await?;

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        response_text(body)
    }
}

/// Concatenate the text parts of the first candidate
fn response_text(body: GenerateContentResponse) -> Result<String, LlmError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(LlmError::InvalidResponse(format!(
            "Candidate has no text (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(GeminiProvider::generate(self, prompt))?
    }
}
