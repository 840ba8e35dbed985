//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sorbent CLI - Extract biochar records from research papers.
#[derive(Debug, Parser)]
#[command(name = "sorbent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (results only)
    Quiet,
}

/// Extraction backend options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum BackendArg {
    /// Google Gemini
    Gemini,
    /// Local Ollama
    Ollama,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a document and extract findings
    Run(RunArgs),

    /// Load a document and list its segments without analyzing them
    Segments(SegmentsArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Document to process (.pdf, or text with form-feed page breaks)
    pub file: PathBuf,

    /// API key for the Gemini backend
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Extraction backend (overrides the configuration file)
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Model name (overrides the configuration file)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Pages grouped into one segment
    #[arg(short, long)]
    pub pages_per_segment: Option<usize>,

    /// Question to ask (repeatable; replaces the configured questions)
    #[arg(short, long = "question")]
    pub questions: Vec<String>,

    /// Directory for the saved reports
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Do not write report files
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the segments command.
#[derive(Debug, Parser)]
pub struct SegmentsArgs {
    /// Document to split
    pub file: PathBuf,

    /// Pages grouped into one segment
    #[arg(short, long)]
    pub pages_per_segment: Option<usize>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<BackendArg> for crate::config::BackendKind {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Gemini => crate::config::BackendKind::Gemini,
            BackendArg::Ollama => crate::config::BackendKind::Ollama,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command() {
        let cli = Cli::try_parse_from(["sorbent", "run", "paper.pdf", "--no-save"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.file, PathBuf::from("paper.pdf"));
                assert!(args.no_save);
                assert!(args.questions.is_empty());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_repeated_questions() {
        let cli = Cli::try_parse_from([
            "sorbent",
            "run",
            "paper.pdf",
            "-q",
            "What is the biochar?",
            "--question",
            "What does it adsorb?",
        ])
        .unwrap();
        match cli.command {
            Command::Run(args) => assert_eq!(args.questions.len(), 2),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sorbent",
            "segments",
            "paper.txt",
            "--format",
            "json",
            "--no-color",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Segments(_)));
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::try_parse_from(["sorbent", "config", "init", "--force"]).unwrap();
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_file_argument_required() {
        assert!(Cli::try_parse_from(["sorbent", "run"]).is_err());
    }

    #[test]
    fn test_backend_conversion() {
        let kind: crate::config::BackendKind = BackendArg::Ollama.into();
        assert_eq!(kind, crate::config::BackendKind::Ollama);
    }
}
