//! Sorbent Domain Layer
//!
//! Core value types and collaborator interfaces for the segment-iteration
//! pipeline. This crate carries no I/O and only two small dependencies
//! (`uuid` for run identifiers, `serde` so results can be dumped).
//!
//! ## Key Concepts
//!
//! - **Segment**: a page-bounded slice of document text plus its page markers
//! - **Finding**: one structured record extracted from a segment
//! - **Run**: the full state of one pipeline execution
//! - **Stage**: where a run currently sits in the load → analyze → finalize flow
//!
//! ## Architecture
//!
//! Infrastructure (PDF loading, LLM calls, table rendering) lives in other
//! crates and plugs in through the traits in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod finding;
pub mod run;
pub mod segment;
pub mod traits;

// Re-exports for convenience
pub use error::{InvokeError, SourceError};
pub use finding::{Finding, FindingField};
pub use run::{Run, RunId, RunStatus, Stage};
pub use segment::{LoadedDocument, Segment};
