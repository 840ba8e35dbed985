//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::report::save_reports;
use sorbent_domain::{Run, RunStatus};
use sorbent_llm::Provider;
use sorbent_pipeline::{FileSource, LlmInvoker, Pipeline, PipelineConfig};
use std::path::Path;
use tracing::info;

/// Execute the run command.
pub async fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let config = apply_overrides(config, &args);
    config.validate()?;

    let provider = config.backend.build(args.api_key.as_deref())?;
    info!(
        "Processing {} with the {} backend ({} question(s))",
        args.file.display(),
        provider.name(),
        config.pipeline.questions.len()
    );

    let run = process(&config.pipeline, provider, &args.file).await;
    println!("{}", formatter.format_run(&run)?);

    if !args.no_save {
        let dir = args
            .output_dir
            .as_deref()
            .unwrap_or(config.output.dir.as_path());
        let (markdown, json) = save_reports(&run, dir)?;
        if formatter.format() == OutputFormat::Table {
            println!();
            println!("{}", formatter.success(&format!("Results saved to: {}", markdown.display())));
            println!("{}", formatter.success(&format!("JSON saved to: {}", json.display())));
        }
    }

    match run.status() {
        RunStatus::Error => Err(CliError::RunFailed(
            run.error().unwrap_or("unknown error").to_string(),
        )),
        _ => Ok(()),
    }
}

/// Run the pipeline over one file with the given backend.
pub async fn process(pipeline_config: &PipelineConfig, provider: Provider, file: &Path) -> Run {
    let pipeline = Pipeline::new(
        FileSource::from_config(pipeline_config),
        LlmInvoker::new(provider),
        pipeline_config.clone(),
    );

    pipeline.run_with_defaults(file.display().to_string()).await
}

/// Merge command-line overrides into a copy of the configuration.
fn apply_overrides(config: &Config, args: &RunArgs) -> Config {
    let mut config = config.clone();

    if let Some(backend) = args.backend {
        config.backend.kind = backend.into();
    }
    if let Some(model) = &args.model {
        config.backend.model = Some(model.clone());
    }
    if let Some(pages) = args.pages_per_segment {
        config.pipeline.pages_per_segment = pages;
    }
    if !args.questions.is_empty() {
        config.pipeline.questions = args.questions.clone();
    }

    config
}
