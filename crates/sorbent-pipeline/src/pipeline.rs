//! The segment-iteration state machine

use crate::accumulator::accumulate;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::projection::TableProjection;
use sorbent_domain::traits::{ExtractionInvoker, SegmentSource};
use sorbent_domain::{Run, SourceError, Stage};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Drives a run through load, the per-segment analysis loop, and finalize.
///
/// Segments are analyzed strictly in order, one at a time. Collaborator
/// calls are blocking and run on tokio's blocking pool.
pub struct Pipeline<S, I> {
    source: Arc<S>,
    invoker: Arc<I>,
    config: PipelineConfig,
    projection: TableProjection,
}

impl<S, I> Pipeline<S, I>
where
    S: SegmentSource + Send + Sync + 'static,
    I: ExtractionInvoker + Send + Sync + 'static,
{
    /// Create a new pipeline
    pub fn new(source: S, invoker: I, config: PipelineConfig) -> Self {
        Self {
            source: Arc::new(source),
            invoker: Arc::new(invoker),
            config,
            projection: TableProjection::default(),
        }
    }

    /// Use a different column schema for the final table
    pub fn with_projection(mut self, projection: TableProjection) -> Self {
        self.projection = projection;
        self
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The segment source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The extraction invoker
    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Create a fresh run without executing anything
    pub fn start(&self, locator: impl Into<String>, questions: Vec<String>) -> Run {
        let run = Run::new(locator, questions);
        debug!("Created run {} for {}", run.id(), run.locator());
        run
    }

    /// Perform one transition and return the stage the run is now in.
    ///
    /// A terminal run is returned untouched.
    pub async fn step(&self, run: &mut Run) -> Stage {
        match run.stage() {
            Stage::Initialized | Stage::Loading => self.load(run).await,
            Stage::Analyzing => self.analyze(run).await,
            Stage::Finalizing => self.finalize(run),
            Stage::Complete | Stage::Error => {}
        }
        run.stage()
    }

    /// Execute a whole run and return it in a terminal stage
    pub async fn run(&self, locator: impl Into<String>, questions: Vec<String>) -> Run {
        let mut run = self.start(locator, questions);
        while !run.stage().is_terminal() {
            self.step(&mut run).await;
        }

        info!(
            "Run {} finished with status {} ({} finding(s))",
            run.id(),
            run.status(),
            run.findings().len()
        );
        run
    }

    /// Execute a whole run with the configured questions
    pub async fn run_with_defaults(&self, locator: impl Into<String>) -> Run {
        let questions = self.config.questions.clone();
        self.run(locator, questions).await
    }

    async fn load(&self, run: &mut Run) {
        run.enter(Stage::Loading);
        info!("Loading document: {}", run.locator());

        let source = Arc::clone(&self.source);
        let locator = run.locator().to_string();
        let task_locator = locator.clone();

        let result = tokio::task::spawn_blocking(move || source.load(&task_locator))
            .await
            .map_err(|e| {
                PipelineError::SourceUnavailable(SourceError::new(
                    locator,
                    format!("loader task failed: {}", e),
                ))
            })
            .and_then(|loaded| loaded.map_err(PipelineError::from));

        match result {
            Ok(document) => {
                info!(
                    "Loaded {} page(s) into {} segment(s)",
                    document.page_count,
                    document.segments.len()
                );
                run.load(document);
                run.enter(next_stage(run));
            }
            Err(e) => {
                error!("{}", e);
                run.fail(e.to_string());
            }
        }
    }

    async fn analyze(&self, run: &mut Run) {
        let Some(segment) = run.current_segment() else {
            run.enter(Stage::Finalizing);
            return;
        };

        let position = segment.index() + 1;
        let total = segment.total();
        let text = segment.text().to_string();
        info!(
            "Analyzing segment {}/{} ({})",
            position,
            total,
            segment.page_range()
        );

        let invoker = Arc::clone(&self.invoker);
        let questions = run.questions().to_vec();

        let result = tokio::task::spawn_blocking(move || invoker.extract(&text, &questions))
            .await
            .map_err(|e| PipelineError::ServiceFailure(format!("extraction task failed: {}", e)))
            .and_then(|extracted| extracted.map_err(PipelineError::from));

        match result {
            Ok(findings) => {
                let count = accumulate(run, findings);
                debug!("Segment {}/{} yielded {} finding(s)", position, total, count);
            }
            Err(e) if !e.is_fatal() => {
                warn!("Skipping segment {}/{}: {}", position, total, e);
            }
            Err(e) => {
                error!("Segment {}/{}: {}", position, total, e);
                run.fail(e.to_string());
                return;
            }
        }

        run.advance();
        run.enter(next_stage(run));
    }

    fn finalize(&self, run: &mut Run) {
        run.enter(Stage::Finalizing);

        match self.projection.project(run.findings()) {
            Ok(table) => {
                debug!("Projected {} finding(s)", run.findings().len());
                run.complete(table);
            }
            Err(e) => {
                error!("{}", e);
                run.fail(e.to_string());
            }
        }
    }
}

/// Whether the analysis loop has another segment to process
pub fn should_continue(run: &Run) -> bool {
    !run.stage().is_terminal() && run.has_remaining()
}

fn next_stage(run: &Run) -> Stage {
    if should_continue(run) {
        Stage::Analyzing
    } else {
        Stage::Finalizing
    }
}
