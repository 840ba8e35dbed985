//! Segments command implementation.

use crate::cli::SegmentsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sorbent_domain::traits::SegmentSource;
use sorbent_domain::LoadedDocument;
use sorbent_pipeline::{FileSource, PageSegmenter};

/// Execute the segments command.
pub fn execute_segments(args: SegmentsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = load_segments(&args, config)?;
    println!("{}", formatter.format_segments(&document)?);
    Ok(())
}

/// Load and segment a document without analyzing it.
pub fn load_segments(args: &SegmentsArgs, config: &Config) -> Result<LoadedDocument> {
    let pages_per_segment = args
        .pages_per_segment
        .unwrap_or(config.pipeline.pages_per_segment);
    let segmenter = PageSegmenter::new(pages_per_segment, config.pipeline.page_separator.as_str());

    let locator = args.file.display().to_string();
    Ok(FileSource::new(segmenter).load(&locator)?)
}
