//! Sorbent Pipeline
//!
//! Walks a document segment by segment, asks an extraction backend about each
//! one, and merges the answers into a single table.
//!
//! # Architecture
//!
//! ```text
//! Document → SegmentSource → [Segment] → Pipeline ⟲ ExtractionInvoker → Findings → Table
//! ```
//!
//! # Failure handling
//!
//! - A segment whose backend answer cannot be parsed is skipped and the loop
//!   moves on.
//! - Any other failure ends the run with status `error`. Findings gathered
//!   before the failure stay on the run.
//!
//! # Example Usage
//!
//! ```no_run
//! use sorbent_pipeline::{FileSource, LlmInvoker, Pipeline, PipelineConfig};
//! use sorbent_llm::OllamaProvider;
//!
//! # async fn example() {
//! let config = PipelineConfig::default();
//! let source = FileSource::from_config(&config);
//! let invoker = LlmInvoker::new(OllamaProvider::default_endpoint("llama3"));
//!
//! let pipeline = Pipeline::new(source, invoker, config);
//! let run = pipeline.run_with_defaults("paper.pdf").await;
//!
//! println!("{}", run.table());
//! # }
//! ```

#![warn(missing_docs)]

mod accumulator;
mod config;
mod error;
mod invoker;
mod parser;
mod pipeline;
mod projection;
mod prompt;
mod segmenter;
mod source;


pub use accumulator::{accumulate, backfill_provenance};
pub use config::{PipelineConfig, DEFAULT_PAGE_SEPARATOR, DEFAULT_QUESTIONS};
pub use error::PipelineError;
pub use invoker::LlmInvoker;
pub use parser::parse_llm_response;
pub use pipeline::{should_continue, Pipeline};
pub use projection::{Column, TableProjection, NO_RESULTS};
pub use prompt::PromptBuilder;
pub use segmenter::PageSegmenter;
pub use source::{split_pages, FileSource, FORM_FEED};
