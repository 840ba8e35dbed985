//! Shared HTTP plumbing for the remote providers

use crate::LlmError;
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Send a request, retrying transport errors, 429 and 5xx with exponential
/// backoff (1s, 2s, 4s, ...). `max_retries` is the total number of attempts.
pub(crate) async fn send_with_retry<F>(
    max_retries: u32,
    model: &str,
    build: F,
) -> Result<reqwest::Response, LlmError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let max_attempts = max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_attempts {
        match build().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }
                if status == StatusCode::NOT_FOUND {
                    return Err(LlmError::ModelNotAvailable(model.to_string()));
                }
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    return Err(LlmError::Authentication(format!("HTTP {}", status)));
                }

                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());

                if status == StatusCode::TOO_MANY_REQUESTS {
                    last_error = Some(LlmError::RateLimitExceeded);
                } else if status.is_server_error() {
                    last_error = Some(LlmError::Communication(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                } else {
                    return Err(LlmError::Communication(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_attempts {
            let delay = Duration::from_secs(2u64.pow(attempts - 1));
            warn!(
                "LLM request attempt {}/{} failed, retrying in {}s",
                attempts,
                max_attempts,
                delay.as_secs()
            );
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error
        .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}

/// Drive an async provider call from the synchronous `LlmProvider` trait.
///
/// Inside a tokio runtime this must be called from a blocking-pool thread
/// (`spawn_blocking`), which is how the pipeline invokes providers.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => Ok(handle.block_on(future)),
        Err(_) => {
            debug!("No ambient runtime, starting a current-thread runtime");
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
            Ok(runtime.block_on(future))
        }
    }
}
