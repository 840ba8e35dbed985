//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sorbent_llm::{gemini, ollama, GeminiProvider, OllamaProvider, Provider};
use sorbent_pipeline::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extraction backend
    #[serde(default)]
    pub backend: BackendConfig,

    /// Report output
    #[serde(default)]
    pub output: OutputConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Segmenting and questions
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Which LLM answers the questions, and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend kind
    #[serde(default)]
    pub kind: BackendKind,

    /// Model name (backend default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Endpoint URL (backend default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (backend default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Retries on transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Supported backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Google Gemini
    #[default]
    Gemini,
    /// Local Ollama
    Ollama,
}

/// Where reports are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report directory
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".sorbent").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default one.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from file, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate().map_err(CliError::Config)
    }
}

impl BackendConfig {
    /// Build the provider this configuration describes.
    ///
    /// Gemini needs an API key; it is passed in rather than read from the
    /// environment here.
    pub fn build(&self, api_key: Option<&str>) -> Result<Provider> {
        match self.kind {
            BackendKind::Gemini => {
                let api_key = api_key
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| {
                        CliError::Config(
                            "Gemini needs an API key: pass --api-key or set GOOGLE_API_KEY".into(),
                        )
                    })?;

                let model = self.model.as_deref().unwrap_or(gemini::DEFAULT_MODEL);
                let mut provider = GeminiProvider::new(api_key, model)
                    .with_max_retries(self.max_retries)
                    .with_timeout(Duration::from_secs(
                        self.timeout_secs.unwrap_or(gemini::DEFAULT_TIMEOUT_SECS),
                    ));
                if let Some(endpoint) = &self.endpoint {
                    provider = provider.with_endpoint(endpoint.as_str());
                }
                Ok(Provider::Gemini(provider))
            }
            BackendKind::Ollama => {
                let model = self.model.as_deref().ok_or_else(|| {
                    CliError::Config("Ollama needs a model: set backend.model or pass --model".into())
                })?;
                let endpoint = self.endpoint.as_deref().unwrap_or(ollama::DEFAULT_ENDPOINT);

                let provider = OllamaProvider::new(endpoint, model)
                    .with_max_retries(self.max_retries)
                    .with_timeout(Duration::from_secs(
                        self.timeout_secs.unwrap_or(ollama::DEFAULT_TIMEOUT_SECS),
                    ));
                Ok(Provider::Ollama(provider))
            }
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Gemini,
            model: None,
            endpoint: None,
            timeout_secs: None,
            max_retries: default_max_retries(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_max_retries() -> u32 {
    gemini::DEFAULT_MAX_RETRIES
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
