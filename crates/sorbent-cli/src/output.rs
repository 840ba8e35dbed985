//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::report::json_report;
use colored::*;
use serde_json::json;
use sorbent_domain::{LoadedDocument, Run, RunStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a finished run.
    pub fn format_run(&self, run: &Run) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json_report(run))?),
            OutputFormat::Table => Ok(self.format_run_summary(run)),
            OutputFormat::Quiet => Ok(run.table().to_string()),
        }
    }

    fn format_run_summary(&self, run: &Run) -> String {
        let status = match run.status() {
            RunStatus::Complete => self.colorize(run.status().as_str(), "green"),
            RunStatus::Error => self.colorize(run.status().as_str(), "red"),
            _ => self.colorize(run.status().as_str(), "yellow"),
        };

        let mut lines = vec![
            format!("Status: {}", status),
            format!("Pages processed: {}", run.page_count()),
            format!("Segments processed: {}/{}", run.cursor(), run.segments().len()),
            format!("Biochars found: {}", run.findings().len()),
        ];
        if let Some(error) = run.error() {
            lines.push(self.error(error));
        }
        if !run.table().is_empty() {
            lines.push(String::new());
            lines.push(run.table().to_string());
        }

        lines.join("\n")
    }

    /// Format the segments of a loaded document.
    pub fn format_segments(&self, document: &LoadedDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let segments: Vec<_> = document
                    .segments
                    .iter()
                    .map(|s| {
                        json!({
                            "index": s.index(),
                            "pages": s.pages(),
                            "page_range": s.page_range(),
                            "characters": s.text().chars().count(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "page_count": document.page_count,
                    "segments": segments,
                }))?)
            }
            OutputFormat::Table => Ok(self.format_segments_table(document)),
            OutputFormat::Quiet => Ok(document
                .segments
                .iter()
                .map(|s| s.page_range())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_segments_table(&self, document: &LoadedDocument) -> String {
        if document.segments.is_empty() {
            return self.warning("Document has no pages.");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Pages", "Characters"]);

        for segment in &document.segments {
            builder.push_record([
                (segment.index() + 1).to_string(),
                segment.page_range(),
                segment.text().chars().count().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!(
            "{}\n{}",
            table,
            self.info(&format!(
                "{} page(s) in {} segment(s)",
                document.page_count,
                document.segments.len()
            ))
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorbent_domain::{Finding, FindingField, Segment};

    fn document() -> LoadedDocument {
        LoadedDocument {
            segments: vec![
                Segment::new("abc", vec![1, 2, 3], 0, 2).unwrap(),
                Segment::new("de", vec![4], 1, 2).unwrap(),
            ],
            page_count: 4,
        }
    }

    fn complete_run() -> Run {
        let mut run = Run::new("paper.pdf", vec![]);
        run.load(document());
        run.append_findings(vec![Finding::new().with(FindingField::Name, "B1")]);
        run.advance();
        run.advance();
        run.complete("| Biochar Name |\n|---|\n| B1 |".to_string());
        run
    }

    #[test]
    fn test_run_summary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_run(&complete_run()).unwrap();
        assert!(output.contains("Status: complete"));
        assert!(output.contains("Pages processed: 4"));
        assert!(output.contains("Segments processed: 2/2"));
        assert!(output.contains("Biochars found: 1"));
        assert!(output.contains("| B1 |"));
    }

    #[test]
    fn test_run_summary_with_error() {
        let mut run = Run::new("paper.pdf", vec![]);
        run.fail("Analysis failed: timeout");

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_run(&run).unwrap();
        assert!(output.contains("Status: error"));
        assert!(output.contains("✗ Analysis failed: timeout"));
    }

    #[test]
    fn test_run_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_run(&complete_run()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], "complete");
        assert_eq!(value["findings"][0]["name"], "B1");
    }

    #[test]
    fn test_run_quiet_prints_table_only() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_run(&complete_run()).unwrap();
        assert_eq!(output, "| Biochar Name |\n|---|\n| B1 |");
    }

    #[test]
    fn test_segments_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_segments(&document()).unwrap();
        assert!(output.contains("Pages 1-3"));
        assert!(output.contains("Page 4"));
        assert!(output.contains("4 page(s) in 2 segment(s)"));
    }

    #[test]
    fn test_segments_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_segments(&document()).unwrap();
        assert_eq!(output, "Pages 1-3\nPage 4");
    }

    #[test]
    fn test_segments_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_segments(&document()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["page_count"], 4);
        assert_eq!(value["segments"][1]["page_range"], "Page 4");
        assert_eq!(value["segments"][0]["characters"], 3);
    }

    #[test]
    fn test_empty_document() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_segments(&LoadedDocument::default()).unwrap();
        assert!(output.contains("no pages"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
