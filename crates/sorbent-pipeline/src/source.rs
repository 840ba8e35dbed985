//! File-backed segment source

use crate::config::PipelineConfig;
use crate::segmenter::PageSegmenter;
use sorbent_domain::traits::SegmentSource;
use sorbent_domain::{LoadedDocument, SourceError};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Page break character in plain-text documents
pub const FORM_FEED: char = '\u{c}';

/// Loads a document from disk and splits it into segments.
///
/// `.pdf` files are read page by page with `lopdf`. Any other file is read as
/// UTF-8 text where a form feed separates pages (the output of `pdftotext`).
pub struct FileSource {
    segmenter: PageSegmenter,
}

impl FileSource {
    /// Create a new file source
    pub fn new(segmenter: PageSegmenter) -> Self {
        Self { segmenter }
    }

    /// Create a file source from pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(PageSegmenter::from_config(config))
    }

    /// Read the page texts of a document
    pub fn read_pages(&self, path: &Path) -> Result<Vec<String>, SourceError> {
        let locator = path.display().to_string();
        if !path.is_file() {
            return Err(SourceError::new(locator, "file not found"));
        }

        if is_pdf(path) {
            read_pdf_pages(path)
        } else {
            read_text_pages(path)
        }
    }
}

impl SegmentSource for FileSource {
    fn load(&self, locator: &str) -> Result<LoadedDocument, SourceError> {
        let pages = self.read_pages(Path::new(locator))?;
        let segments = self
            .segmenter
            .segment(&pages)
            .map_err(|e| SourceError::new(locator, e))?;

        info!(
            "Created {} segment(s) from {} page(s) of {}",
            segments.len(),
            pages.len(),
            locator
        );

        Ok(LoadedDocument {
            page_count: pages.len(),
            segments,
        })
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
}

fn read_pdf_pages(path: &Path) -> Result<Vec<String>, SourceError> {
    let locator = path.display().to_string();
    let document = lopdf::Document::load(path)
        .map_err(|e| SourceError::new(locator.as_str(), format!("cannot parse PDF: {}", e)))?;

    let pages = document.get_pages();
    debug!("{} has {} page(s)", locator, pages.len());

    let texts = pages
        .keys()
        .map(|&page_number| match document.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                // Scanned pages have no text layer; keep the page so numbering stays right
                warn!("No text extracted from page {} of {}: {}", page_number, locator, e);
                String::new()
            }
        })
        .collect();

    Ok(texts)
}

fn read_text_pages(path: &Path) -> Result<Vec<String>, SourceError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SourceError::new(path.display().to_string(), e.to_string()))?;
    Ok(split_pages(&contents))
}

/// Split plain text into pages on form feeds.
///
/// Empty input has no pages; a trailing form feed does not open a new page.
pub fn split_pages(contents: &str) -> Vec<String> {
    if contents.is_empty() {
        return Vec::new();
    }

    let body = contents.strip_suffix(FORM_FEED).unwrap_or(contents);
    body.split(FORM_FEED).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn text_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_split_pages() {
        assert_eq!(split_pages("a\u{c}b\u{c}c"), vec!["a", "b", "c"]);
        assert_eq!(split_pages("a\u{c}b\u{c}"), vec!["a", "b"]);
        assert_eq!(split_pages("single"), vec!["single"]);
        assert!(split_pages("").is_empty());
    }

    #[test]
    fn test_blank_page_between_form_feeds() {
        assert_eq!(split_pages("a\u{c}\u{c}c"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_load_text_document() {
        let file = text_file("one\u{c}two\u{c}three\u{c}four");
        let source = FileSource::new(PageSegmenter::new(3, "\n"));

        let doc = source.load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(doc.page_count, 4);
        assert_eq!(doc.segments.len(), 2);
        assert_eq!(doc.segments[0].text(), "one\ntwo\nthree");
        assert_eq!(doc.segments[1].pages(), &[4]);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = FileSource::from_config(&PipelineConfig::default());
        let err = source.load("/definitely/not/here.pdf").unwrap_err();
        assert_eq!(err.locator, "/definitely/not/here.pdf");
        assert!(err.reason.contains("not found"));
    }

    #[test]
    fn test_invalid_pdf_is_unavailable() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let source = FileSource::from_config(&PipelineConfig::default());
        let err = source.load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.reason.contains("cannot parse PDF"));
    }

    #[test]
    fn test_pdf_extension_case_insensitive() {
        assert!(is_pdf(Path::new("paper.PDF")));
        assert!(is_pdf(Path::new("dir/paper.pdf")));
        assert!(!is_pdf(Path::new("paper.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }
}
