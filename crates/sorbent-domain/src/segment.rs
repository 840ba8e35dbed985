//! Segment module - page-bounded slices of document text

use serde::Serialize;

/// An immutable unit of input text.
///
/// A segment always covers at least one page. Page markers are kept in the
/// order the segment source produced them; provenance uses the first and the
/// last marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    text: String,
    pages: Vec<u32>,
    index: usize,
    total: usize,
}

impl Segment {
    /// Create a new segment
    ///
    /// # Errors
    /// Returns an error if `pages` is empty.
    pub fn new(
        text: impl Into<String>,
        pages: Vec<u32>,
        index: usize,
        total: usize,
    ) -> Result<Self, String> {
        if pages.is_empty() {
            return Err(format!("segment {} has no page markers", index));
        }

        Ok(Self {
            text: text.into(),
            pages,
            index,
            total,
        })
    }

    /// Text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Page markers (1-indexed)
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    /// Position of this segment in the document
    pub fn index(&self) -> usize {
        self.index
    }

    /// Segment count recorded when the document was split
    pub fn total(&self) -> usize {
        self.total
    }

    /// First page covered
    pub fn first_page(&self) -> u32 {
        self.pages[0]
    }

    /// Last page covered
    pub fn last_page(&self) -> u32 {
        self.pages[self.pages.len() - 1]
    }

    /// Human-readable page range used as fallback provenance
    ///
    /// # Examples
    ///
    /// ```
    /// use sorbent_domain::Segment;
    ///
    /// let seg = Segment::new("...", vec![4, 5, 6], 1, 3).unwrap();
    /// assert_eq!(seg.page_range(), "Pages 4-6");
    ///
    /// let seg = Segment::new("...", vec![7], 2, 3).unwrap();
    /// assert_eq!(seg.page_range(), "Page 7");
    /// ```
    pub fn page_range(&self) -> String {
        let (first, last) = (self.first_page(), self.last_page());
        if first == last {
            format!("Page {}", first)
        } else {
            format!("Pages {}-{}", first, last)
        }
    }
}

/// Output of a segment source
#[derive(Debug, Clone, Default)]
pub struct LoadedDocument {
    /// Segments in document order
    pub segments: Vec<Segment>,
    /// Number of pages in the source document
    pub page_count: usize,
}
