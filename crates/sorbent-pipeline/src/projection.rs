//! Projection of accumulated findings onto a fixed column schema

use crate::error::PipelineError;
use sorbent_domain::{Finding, FindingField};
use std::collections::HashSet;
use tabled::{builder::Builder, settings::Style};

/// Table text for a run that found nothing
pub const NO_RESULTS: &str = "No biochars found in the document.";

/// One output column: the finding field it reads and its header label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Source field
    pub field: FindingField,
    /// Header text
    pub label: String,
}

impl Column {
    /// Create a new column
    pub fn new(field: FindingField, label: impl Into<String>) -> Self {
        Self {
            field,
            label: label.into(),
        }
    }
}

/// Renders findings as a Markdown table.
///
/// Only columns that at least one finding fills are rendered, in schema
/// order. Cells for absent fields are left empty.
#[derive(Debug, Clone)]
pub struct TableProjection {
    columns: Vec<Column>,
    empty_message: String,
}

impl TableProjection {
    /// Create a projection over an ordered column schema
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            empty_message: NO_RESULTS.to_string(),
        }
    }

    /// The biochar report schema
    pub fn biochar() -> Self {
        Self::new(vec![
            Column::new(FindingField::Name, "Biochar Name"),
            Column::new(FindingField::Description, "What is the Biochar?"),
            Column::new(FindingField::TargetedMolecule, "Targeted Molecule"),
            Column::new(FindingField::AdsorptionCapacity, "Adsorption Capacity"),
            Column::new(FindingField::Location, "Location (Page/Section)"),
        ])
    }

    /// Replace the text returned when there are no findings
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// The full column schema
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Schema columns that at least one finding fills
    pub fn present_columns(&self, findings: &[Finding]) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|column| findings.iter().any(|f| f.has(column.field)))
            .collect()
    }

    /// Render findings as a Markdown table.
    ///
    /// Returns the empty message when there are no findings, or when no
    /// schema column is filled by any of them.
    pub fn project(&self, findings: &[Finding]) -> Result<String, PipelineError> {
        self.validate()?;

        if findings.is_empty() {
            return Ok(self.empty_message.clone());
        }

        let columns = self.present_columns(findings);
        if columns.is_empty() {
            return Ok(self.empty_message.clone());
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|c| escape_cell(&c.label)));

        for finding in findings {
            builder.push_record(
                columns
                    .iter()
                    .map(|c| finding.get(c.field).map(escape_cell).unwrap_or_default()),
            );
        }

        let mut table = builder.build();
        table.with(Style::markdown());

        Ok(table.to_string())
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.columns.is_empty() {
            return Err(PipelineError::ProjectionFailure(
                "column schema is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.field) {
                return Err(PipelineError::ProjectionFailure(format!(
                    "field '{}' appears twice in the column schema",
                    column.field
                )));
            }
        }

        Ok(())
    }
}

impl Default for TableProjection {
    fn default() -> Self {
        Self::biochar()
    }
}

/// Keep cell text on one line and out of the column separators
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
