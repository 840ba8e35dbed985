//! Configuration for the pipeline

use serde::{Deserialize, Serialize};

/// Separator placed between pages inside one segment
pub const DEFAULT_PAGE_SEPARATOR: &str = "\n\n--- Page Break ---\n\n";

/// Questions asked about every material found in a segment
pub const DEFAULT_QUESTIONS: [&str; 4] = [
    "What is the biochar?",
    "What is the targeted molecule?",
    "What is the adsorption capacity of the biochar?",
    "Where is this information located (page number or section)?",
];

/// Configuration for the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pages grouped into one segment
    #[serde(default = "default_pages_per_segment")]
    pub pages_per_segment: usize,

    /// Text inserted between pages of the same segment
    #[serde(default = "default_page_separator")]
    pub page_separator: String,

    /// Extraction questions, fixed for a run
    #[serde(default = "default_questions")]
    pub questions: Vec<String>,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.pages_per_segment == 0 {
            return Err("pages_per_segment must be greater than 0".to_string());
        }
        if self.questions.is_empty() {
            return Err("at least one question is required".to_string());
        }
        if let Some(idx) = self.questions.iter().position(|q| q.trim().is_empty()) {
            return Err(format!("question {} is empty", idx + 1));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pages_per_segment: default_pages_per_segment(),
            page_separator: default_page_separator(),
            questions: default_questions(),
        }
    }
}

fn default_pages_per_segment() -> usize {
    3
}

fn default_page_separator() -> String {
    DEFAULT_PAGE_SEPARATOR.to_string()
}

fn default_questions() -> Vec<String> {
    DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pages_per_segment, 3);
        assert_eq!(config.questions.len(), 4);
    }

    #[test]
    fn test_zero_pages_per_segment_rejected() {
        let mut config = PipelineConfig::default();
        config.pages_per_segment = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_question_rejected() {
        let mut config = PipelineConfig::default();
        config.questions.push("   ".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.contains("question 5"));
    }

    #[test]
    fn test_no_questions_rejected() {
        let mut config = PipelineConfig::default();
        config.questions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("pages_per_segment = 5").unwrap();
        assert_eq!(config.pages_per_segment, 5);
        assert_eq!(config.page_separator, DEFAULT_PAGE_SEPARATOR);
        assert_eq!(config.questions.len(), DEFAULT_QUESTIONS.len());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PipelineConfig::default();
        config.questions = vec!["What is the sorbent?".to_string()];
        let toml_str = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
