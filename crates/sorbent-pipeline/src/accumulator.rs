//! Append-only accumulation of findings into a run

use sorbent_domain::{Finding, FindingField, Run, Segment};

/// Fill in missing provenance from the originating segment.
///
/// A finding whose location is absent or blank gets the segment's page range.
/// Every other field is left exactly as the invoker returned it.
pub fn backfill_provenance(findings: Vec<Finding>, segment: &Segment) -> Vec<Finding> {
    let fallback = segment.page_range();

    findings
        .into_iter()
        .map(|mut finding| {
            if !finding.has_location() {
                finding.set(FindingField::Location, fallback.as_str());
            }
            finding
        })
        .collect()
}

/// Append the findings of the segment under the run's cursor.
///
/// Order is preserved and nothing is deduplicated. Returns the number of
/// findings appended.
pub fn accumulate(run: &mut Run, findings: Vec<Finding>) -> usize {
    let findings = match run.current_segment() {
        Some(segment) => backfill_provenance(findings, segment),
        None => return 0,
    };

    let count = findings.len();
    run.append_findings(findings);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorbent_domain::LoadedDocument;

    fn segment(pages: Vec<u32>) -> Segment {
        Segment::new("text", pages, 0, 1).unwrap()
    }

    fn run_with(segments: Vec<Segment>) -> Run {
        let mut run = Run::new("paper.pdf", vec![]);
        let page_count = segments.iter().map(|s| s.pages().len()).sum();
        run.load(LoadedDocument {
            segments,
            page_count,
        });
        run
    }

    #[test]
    fn test_backfill_missing_location() {
        let findings = vec![Finding::new().with(FindingField::Name, "A")];
        let filled = backfill_provenance(findings, &segment(vec![4, 5, 6]));
        assert_eq!(filled[0].location.as_deref(), Some("Pages 4-6"));
    }

    #[test]
    fn test_backfill_single_page() {
        let findings = vec![Finding::new()];
        let filled = backfill_provenance(findings, &segment(vec![7]));
        assert_eq!(filled[0].location.as_deref(), Some("Page 7"));
    }

    #[test]
    fn test_backfill_blank_location() {
        let findings = vec![Finding::new().with(FindingField::Location, "  ")];
        let filled = backfill_provenance(findings, &segment(vec![1, 2]));
        assert_eq!(filled[0].location.as_deref(), Some("Pages 1-2"));
    }

    #[test]
    fn test_existing_location_kept() {
        let findings = vec![Finding::new().with(FindingField::Location, "Section 3.2")];
        let filled = backfill_provenance(findings, &segment(vec![1, 2]));
        assert_eq!(filled[0].location.as_deref(), Some("Section 3.2"));
    }

    #[test]
    fn test_other_fields_untouched() {
        let findings = vec![Finding::new().with(FindingField::Description, "")];
        let filled = backfill_provenance(findings, &segment(vec![1]));
        assert_eq!(filled[0].description.as_deref(), Some(""));
        assert!(filled[0].name.is_none());
        assert!(filled[0].adsorption_capacity.is_none());
    }

    #[test]
    fn test_accumulate_preserves_order_and_duplicates() {
        let mut run = run_with(vec![segment(vec![1, 2, 3])]);
        let a = Finding::new().with(FindingField::Name, "A");
        let b = Finding::new().with(FindingField::Name, "B");

        let appended = accumulate(&mut run, vec![a.clone(), b, a]);
        assert_eq!(appended, 3);

        let names: Vec<_> = run.findings().iter().map(|f| f.name.as_deref()).collect();
        assert_eq!(names, vec![Some("A"), Some("B"), Some("A")]);
        assert!(run.findings().iter().all(|f| f.has_location()));
    }

    #[test]
    fn test_accumulate_without_segment_is_noop() {
        let mut run = run_with(vec![]);
        assert_eq!(accumulate(&mut run, vec![Finding::new()]), 0);
        assert!(run.findings().is_empty());
    }
}
