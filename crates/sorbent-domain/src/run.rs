//! Run module - the state of one pipeline execution

use crate::finding::Finding;
use crate::segment::{LoadedDocument, Segment};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a run based on UUIDv7
///
/// UUIDv7 keeps identifiers of successive runs chronologically sortable, which
/// is what the exported JSON dumps are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u128);

impl RunId {
    /// Generate a new UUIDv7-based RunId
    ///
    /// # Examples
    ///
    /// ```
    /// use sorbent_domain::RunId;
    ///
    /// let id = RunId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a RunId from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid run id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for RunId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Externally visible run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Created, nothing loaded yet
    Initialized,
    /// Segments loaded, analysis in progress
    Processing,
    /// Table produced
    Complete,
    /// A fatal failure ended the run
    Error,
}

impl RunStatus {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Initialized => "initialized",
            RunStatus::Processing => "processing",
            RunStatus::Complete => "complete",
            RunStatus::Error => "error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a run in the load → analyze → finalize flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Not started
    Initialized,
    /// Next transition loads segments
    Loading,
    /// Next transition analyzes `segments[cursor]`
    Analyzing,
    /// Next transition projects the table
    Finalizing,
    /// Terminal: success
    Complete,
    /// Terminal: fatal failure
    Error,
}

impl Stage {
    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Complete | Stage::Error)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Initialized => "initialized",
            Stage::Loading => "loading",
            Stage::Analyzing => "analyzing",
            Stage::Finalizing => "finalizing",
            Stage::Complete => "complete",
            Stage::Error => "error",
        };
        f.write_str(name)
    }
}

/// The full state of one pipeline execution.
///
/// Mutation goes through the methods below so that the cursor only moves
/// forward, findings are only appended, and a terminal run stays terminal.
#[derive(Debug, Clone, Serialize)]
pub struct Run {
    id: RunId,
    locator: String,
    questions: Vec<String>,
    segments: Vec<Segment>,
    page_count: usize,
    cursor: usize,
    findings: Vec<Finding>,
    table: String,
    status: RunStatus,
    stage: Stage,
    error: Option<String>,
    started_at: u64,
    finished_at: Option<u64>,
}

impl Run {
    /// Create a fresh run for a locator and a fixed question list
    pub fn new(locator: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            id: RunId::new(),
            locator: locator.into(),
            questions,
            segments: Vec::new(),
            page_count: 0,
            cursor: 0,
            findings: Vec::new(),
            table: String::new(),
            status: RunStatus::Initialized,
            stage: Stage::Initialized,
            error: None,
            started_at: now_secs(),
            finished_at: None,
        }
    }

    /// Run identifier
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Source locator
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Extraction questions
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Loaded segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Pages in the source document
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Index of the next segment to analyze
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Findings accumulated so far
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Projected table (empty until finalized)
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Current status
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Error detail, set only when status is `error`
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start time (seconds since Unix epoch)
    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Finish time, once terminal
    pub fn finished_at(&self) -> Option<u64> {
        self.finished_at
    }

    /// Segment at the cursor, if any remain
    pub fn current_segment(&self) -> Option<&Segment> {
        self.segments.get(self.cursor)
    }

    /// Whether segments remain to be analyzed
    pub fn has_remaining(&self) -> bool {
        self.cursor < self.segments.len()
    }

    /// Move to a non-terminal stage. Ignored once the run is terminal.
    pub fn enter(&mut self, stage: Stage) -> bool {
        if self.stage.is_terminal() || stage.is_terminal() {
            return false;
        }
        self.stage = stage;
        true
    }

    /// Install loaded segments and mark the run as processing
    pub fn load(&mut self, document: LoadedDocument) {
        if self.stage.is_terminal() {
            return;
        }
        self.segments = document.segments;
        self.page_count = document.page_count;
        self.cursor = 0;
        self.status = RunStatus::Processing;
        self.error = None;
    }

    /// Append findings in arrival order
    pub fn append_findings(&mut self, findings: impl IntoIterator<Item = Finding>) {
        if self.stage.is_terminal() {
            return;
        }
        self.findings.extend(findings);
    }

    /// Advance the cursor by one segment. Returns the new cursor.
    ///
    /// The cursor never passes the end of the segment list.
    pub fn advance(&mut self) -> usize {
        if !self.stage.is_terminal() && self.has_remaining() {
            self.cursor += 1;
        }
        self.cursor
    }

    /// Record the projected table and finish successfully
    pub fn complete(&mut self, table: String) {
        if self.stage.is_terminal() {
            return;
        }
        self.table = table;
        self.status = RunStatus::Complete;
        self.stage = Stage::Complete;
        self.finished_at = Some(now_secs());
    }

    /// Finish with a fatal error, keeping everything accumulated so far
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.stage.is_terminal() {
            return;
        }
        self.status = RunStatus::Error;
        self.stage = Stage::Error;
        self.error = Some(message.into());
        self.finished_at = Some(now_secs());
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingField;

    fn loaded(n: usize) -> LoadedDocument {
        let segments = (0..n)
            .map(|i| Segment::new(format!("segment {}", i), vec![i as u32 + 1], i, n).unwrap())
            .collect();
        LoadedDocument {
            segments,
            page_count: n,
        }
    }

    #[test]
    fn test_new_run_defaults() {
        let run = Run::new("paper.pdf", vec!["What is the biochar?".to_string()]);
        assert_eq!(run.status(), RunStatus::Initialized);
        assert_eq!(run.stage(), Stage::Initialized);
        assert_eq!(run.cursor(), 0);
        assert!(run.findings().is_empty());
        assert!(run.error().is_none());
        assert!(run.finished_at().is_none());
    }

    #[test]
    fn test_load_sets_processing() {
        let mut run = Run::new("paper.pdf", vec![]);
        run.load(loaded(2));
        assert_eq!(run.status(), RunStatus::Processing);
        assert_eq!(run.segments().len(), 2);
        assert_eq!(run.page_count(), 2);
        assert!(run.has_remaining());
    }

    #[test]
    fn test_cursor_never_passes_end() {
        let mut run = Run::new("paper.pdf", vec![]);
        run.load(loaded(2));
        assert_eq!(run.advance(), 1);
        assert_eq!(run.advance(), 2);
        assert_eq!(run.advance(), 2);
        assert!(run.current_segment().is_none());
    }

    #[test]
    fn test_fail_is_terminal() {
        let mut run = Run::new("paper.pdf", vec![]);
        run.load(loaded(3));
        run.append_findings(vec![Finding::new().with(FindingField::Name, "A")]);
        run.fail("Analysis failed: timeout");

        assert_eq!(run.status(), RunStatus::Error);
        assert_eq!(run.stage(), Stage::Error);
        assert_eq!(run.error(), Some("Analysis failed: timeout"));

        // Nothing moves after a terminal transition
        assert_eq!(run.advance(), 0);
        run.append_findings(vec![Finding::new()]);
        run.complete("table".to_string());
        assert!(!run.enter(Stage::Analyzing));
        assert_eq!(run.findings().len(), 1);
        assert_eq!(run.status(), RunStatus::Error);
        assert!(run.table().is_empty());
    }

    #[test]
    fn test_enter_rejects_terminal_stages() {
        let mut run = Run::new("paper.pdf", vec![]);
        assert!(run.enter(Stage::Loading));
        assert!(!run.enter(Stage::Complete));
        assert_eq!(run.stage(), Stage::Loading);
    }

    #[test]
    fn test_run_id_round_trip() {
        let id = RunId::new();
        let parsed = RunId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&RunStatus::Complete).unwrap();
        assert_eq!(json, "\"complete\"");
    }
}
