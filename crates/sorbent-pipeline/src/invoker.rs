//! LLM-backed extraction invoker

use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use sorbent_domain::traits::{ExtractionInvoker, LlmProvider};
use sorbent_domain::{Finding, InvokeError};
use std::fmt::Display;
use tracing::debug;

/// Extracts findings by prompting an LLM and parsing its JSON answer.
///
/// Provider errors are service failures. Answers that do not parse are
/// malformed output.
pub struct LlmInvoker<L> {
    provider: L,
}

impl<L> LlmInvoker<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new invoker around a provider
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.provider
    }
}

impl<L> ExtractionInvoker for LlmInvoker<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    fn extract(&self, text: &str, questions: &[String]) -> Result<Vec<Finding>, InvokeError> {
        let prompt = PromptBuilder::new(text, questions).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .provider
            .generate(&prompt)
            .map_err(|e| InvokeError::ServiceFailure(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        parse_llm_response(&response).map_err(InvokeError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorbent_llm::{LlmError, MockProvider};

    fn questions() -> Vec<String> {
        vec!["What is the biochar?".to_string()]
    }

    #[test]
    fn test_extract_parses_findings() {
        let invoker = LlmInvoker::new(MockProvider::new(
            r#"[{"name": "Bamboo biochar", "targeted_molecule": "Tetracycline"}]"#,
        ));

        let findings = invoker.extract("text", &questions()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].name.as_deref(), Some("Bamboo biochar"));
    }

    #[test]
    fn test_extract_sends_text_and_questions() {
        let invoker = LlmInvoker::new(MockProvider::new("[]"));
        invoker.extract("Segment about walnut shells", &questions()).unwrap();

        let prompts = invoker.provider().prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Segment about walnut shells"));
        assert!(prompts[0].contains("1. What is the biochar?"));
    }

    #[test]
    fn test_unparsable_answer_is_malformed() {
        let invoker = LlmInvoker::new(MockProvider::new("Sorry, I cannot help with that."));
        let err = invoker.extract("text", &questions()).unwrap_err();
        assert!(err.is_soft());
    }

    #[test]
    fn test_truncated_array_is_malformed() {
        let invoker = LlmInvoker::new(MockProvider::new(r#"[{"name": "A"}, "Sorry, truncated"]"#));
        let err = invoker.extract("text", &questions()).unwrap_err();
        assert!(err.is_soft());
    }

    #[test]
    fn test_provider_error_is_service_failure() {
        let mut provider = MockProvider::default();
        provider.add_error("text", "connection refused");
        let invoker = LlmInvoker::new(provider);

        let err = invoker.extract("text", &questions()).unwrap_err();
        assert_eq!(
            err,
            InvokeError::ServiceFailure(LlmError::Communication("connection refused".into()).to_string())
        );
    }
}
