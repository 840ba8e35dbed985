//! Report files written after a run.

use crate::error::Result;
use serde_json::{json, Value};
use sorbent_domain::Run;
use std::fs;
use std::path::{Path, PathBuf};

/// Markdown report file name
pub const MARKDOWN_REPORT: &str = "biochar_results.md";

/// JSON report file name
pub const JSON_REPORT: &str = "biochar_results.json";

/// Render the Markdown report for a finished run.
pub fn markdown_report(run: &Run) -> String {
    let mut report = String::new();
    report.push_str("# Biochar Extraction Results\n\n");
    report.push_str(&format!("**Source:** {}\n\n", run.locator()));
    report.push_str(&format!("**Pages:** {}\n\n", run.page_count()));
    report.push_str(&format!("**Biochars Found:** {}\n\n", run.findings().len()));
    report.push_str(&format!("**Status:** {}\n\n", run.status()));
    if let Some(error) = run.error() {
        report.push_str(&format!("**Error:** {}\n\n", error));
    }
    report.push_str("## Results Table\n\n");
    report.push_str(run.table());
    report.push('\n');
    report
}

/// Machine-readable summary of a run.
pub fn json_report(run: &Run) -> Value {
    json!({
        "run_id": run.id().to_string(),
        "source": run.locator(),
        "page_count": run.page_count(),
        "segment_count": run.segments().len(),
        "status": run.status(),
        "error": run.error(),
        "findings": run.findings(),
    })
}

/// Write both reports into `dir`, creating it if needed.
///
/// Returns the Markdown and JSON paths.
pub fn save_reports(run: &Run, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let markdown_path = dir.join(MARKDOWN_REPORT);
    fs::write(&markdown_path, markdown_report(run))?;

    let json_path = dir.join(JSON_REPORT);
    fs::write(&json_path, serde_json::to_string_pretty(&json_report(run))?)?;

    Ok((markdown_path, json_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorbent_domain::{Finding, FindingField, LoadedDocument, Segment};
    use tempfile::TempDir;

    fn finished_run() -> Run {
        let mut run = Run::new("data/paper.pdf", vec!["What is the biochar?".to_string()]);
        run.load(LoadedDocument {
            segments: vec![Segment::new("text", vec![1, 2], 0, 1).unwrap()],
            page_count: 2,
        });
        run.append_findings(vec![Finding::new()
            .with(FindingField::Name, "Rice husk biochar")
            .with(FindingField::Location, "Pages 1-2")]);
        run.advance();
        run.complete("| Biochar Name |\n|---|\n| Rice husk biochar |".to_string());
        run
    }

    #[test]
    fn test_markdown_report() {
        let report = markdown_report(&finished_run());
        assert!(report.starts_with("# Biochar Extraction Results"));
        assert!(report.contains("**Source:** data/paper.pdf"));
        assert!(report.contains("**Pages:** 2"));
        assert!(report.contains("**Biochars Found:** 1"));
        assert!(report.contains("**Status:** complete"));
        assert!(!report.contains("**Error:**"));
        assert!(report.contains("| Rice husk biochar |"));
    }

    #[test]
    fn test_markdown_report_includes_error() {
        let mut run = Run::new("missing.pdf", vec![]);
        run.fail("Failed to load document: file not found");
        let report = markdown_report(&run);
        assert!(report.contains("**Status:** error"));
        assert!(report.contains("**Error:** Failed to load document: file not found"));
    }

    #[test]
    fn test_json_report() {
        let value = json_report(&finished_run());
        assert_eq!(value["source"], "data/paper.pdf");
        assert_eq!(value["page_count"], 2);
        assert_eq!(value["segment_count"], 1);
        assert_eq!(value["status"], "complete");
        assert!(value["error"].is_null());
        assert_eq!(value["findings"][0]["name"], "Rice husk biochar");
        assert!(value["findings"][0].get("description").is_none());
    }

    #[test]
    fn test_save_reports() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("output");

        let (markdown, json) = save_reports(&finished_run(), &out).unwrap();
        assert_eq!(markdown, out.join(MARKDOWN_REPORT));
        assert!(fs::read_to_string(markdown).unwrap().contains("Rice husk biochar"));

        let parsed: Value = serde_json::from_str(&fs::read_to_string(json).unwrap()).unwrap();
        assert_eq!(parsed["status"], "complete");
    }
}
