//! Grouping of page texts into segments

use crate::config::PipelineConfig;
use sorbent_domain::Segment;

/// Groups consecutive pages into fixed-size segments
pub struct PageSegmenter {
    pages_per_segment: usize,
    separator: String,
}

impl PageSegmenter {
    /// Create a new segmenter. A page count of zero is treated as one.
    pub fn new(pages_per_segment: usize, separator: impl Into<String>) -> Self {
        Self {
            pages_per_segment: pages_per_segment.max(1),
            separator: separator.into(),
        }
    }

    /// Create a segmenter from pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.pages_per_segment, config.page_separator.clone())
    }

    /// Pages grouped into one segment
    pub fn pages_per_segment(&self) -> usize {
        self.pages_per_segment
    }

    /// Split page texts into segments.
    ///
    /// Pages are numbered from 1. Every segment records the final segment
    /// count; the last segment may hold fewer pages than the others.
    pub fn segment<S: AsRef<str>>(&self, pages: &[S]) -> Result<Vec<Segment>, String> {
        let total = pages.len().div_ceil(self.pages_per_segment);

        pages
            .chunks(self.pages_per_segment)
            .enumerate()
            .map(|(index, group)| {
                let first_page = index * self.pages_per_segment + 1;
                let page_numbers = (first_page..first_page + group.len())
                    .map(|p| p as u32)
                    .collect();
                let text = group
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<&str>>()
                    .join(&self.separator);

                Segment::new(text, page_numbers, index, total)
            })
            .collect()
    }
}
