//! Comparing fixture pairs

use crate::common::*;
use pretty_assertions::assert_eq;
use sheet_parity::prelude::*;
use sheet_parity::WidthValue;

fn compare(original: &[SheetFixture], generated: &[SheetFixture]) -> DifferenceReport {
    let dir = tempfile::tempdir().unwrap();
    let a = write_xlsx(dir.path(), "original.xlsx", original);
    let b = write_xlsx(dir.path(), "generated.xlsx", generated);
    compare_files(&a, &b, &SamplingLimits::default(), &CompareOptions::default()).unwrap()
}

#[test]
fn test_identical_files_have_no_findings() {
    let report = compare(&[template_sheet("Ethogram")], &[template_sheet("Ethogram")]);
    assert_eq!(report.entries.len(), 1);
    assert!(!report.has_findings());
    assert!(remediation_hints(&report).is_empty());
}

#[test]
fn test_missing_frozen_pane_is_the_only_difference() {
    let report = compare(
        &[template_sheet("Ethogram")],
        &[template_sheet("Export").without_frozen_pane()],
    );

    assert_eq!(report.mismatch_count(), 1);
    let sheet = report.compared().next().unwrap();
    assert_eq!(sheet.label(), "Ethogram vs Export");
    assert_eq!(sheet.frozen_panes.original.as_deref(), Some("B5"));
    assert_eq!(sheet.frozen_panes.generated, None);
    assert!(!sheet.frozen_panes.matches);
    assert!(sheet.column_widths.iter().all(|w| w.matches));
    assert!(sheet.merged_cells.counts_match);
    assert!(sheet.cells.iter().all(|c| !c.has_mismatch()));

    let hints: Vec<String> = remediation_hints(&report).iter().map(|h| h.to_string()).collect();
    assert_eq!(hints, vec!["[Export] Set frozen pane to B5"]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["entries"][0]["frozen_panes"]["original"], "B5");
    assert_eq!(json["entries"][0]["frozen_panes"]["generated"], serde_json::Value::Null);
}

#[test]
fn test_plain_generated_file() {
    let generated = SheetFixture::new("Sheet1")
        .cell("A1", "1 Hour Ethogram", xf::PLAIN)
        .cell("B3", "Time:", xf::PLAIN)
        .cell("A4", "Date/Time", xf::PLAIN)
        .cell("B5", "07:00", xf::PLAIN)
        .cell("C5", "resting", xf::PLAIN);
    let report = compare(&[template_sheet("Ethogram")], &[generated]);
    let sheet = report.compared().next().unwrap();

    assert!(!sheet.frozen_panes.matches);
    let widths: Vec<(String, WidthValue, WidthValue)> = sheet
        .column_widths
        .iter()
        .map(|w| (w.column.letters(), w.original, w.generated))
        .collect();
    assert_eq!(
        widths,
        vec![
            ("A".to_string(), WidthValue::Explicit(25.75), WidthValue::Default),
            ("B".to_string(), WidthValue::Explicit(4.88), WidthValue::Default),
            ("C".to_string(), WidthValue::Explicit(13.0), WidthValue::Default),
        ]
    );
    assert_eq!(sheet.merged_cells.original_count, 1);
    assert_eq!(sheet.merged_cells.generated_count, 0);

    let a1 = &sheet.cells[0];
    assert_eq!(a1.reference.to_string(), "A1");
    let flagged: Vec<StyleFacet> = a1
        .facets
        .iter()
        .filter(|f| !f.matches)
        .map(|f| f.facet)
        .collect();
    assert_eq!(
        flagged,
        vec![StyleFacet::Bold, StyleFacet::WrapText, StyleFacet::FillColor]
    );

    // B5 has no truthy styling in the original, so nothing is compared
    let b5 = sheet
        .cells
        .iter()
        .find(|c| c.reference.to_string() == "B5")
        .unwrap();
    assert!(b5.facets.is_empty());
}

#[test]
fn test_generated_file_with_fewer_sheets() {
    let report = compare(
        &[
            template_sheet("A"),
            SheetFixture::new("B"),
            SheetFixture::new("C"),
        ],
        &[template_sheet("X"), SheetFixture::new("Y")],
    );

    assert_eq!(report.entries.len(), 3);
    assert!(matches!(report.entries[1], SheetEntry::Compared(_)));
    match &report.entries[2] {
        SheetEntry::Missing { index, name } => {
            assert_eq!(*index, 2);
            assert_eq!(name, "C");
        }
        other => panic!("expected a missing sheet, got {:?}", other),
    }
    assert_eq!(report.mismatch_count(), 0);
    assert!(report.has_findings());
}

#[test]
fn test_detailed_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_xlsx(dir.path(), "original.xlsx", &[template_sheet("Ethogram")]);
    let generated = SheetFixture::new("Sheet1")
        .width(1, 25.7)
        .cell("A1", "1 Hour Ethogram", xf::HEADER)
        .cell("B3", "Time:", xf::PLAIN)
        .cell("B5", "07:00", xf::PLAIN)
        .cell("C5", "resting", xf::PLAIN);
    let b = write_xlsx(dir.path(), "generated.xlsx", &[generated]);

    let analysis = detailed_files(&a, &b, &DetailedOptions::default()).unwrap();

    assert_eq!(analysis.column_widths.len(), 13);
    assert!(analysis.column_widths[0].matches);
    // widths beyond the used extent still take part
    assert_eq!(
        analysis.column_widths[12].original,
        WidthValue::Explicit(13.0)
    );
    assert!(!analysis.column_widths[12].matches);

    let header: Vec<String> = analysis
        .header_issues
        .iter()
        .map(|c| c.reference.to_string())
        .collect();
    assert_eq!(header, vec!["B3", "A4"]);

    assert_eq!(analysis.data_rows[0].original_label.as_deref(), Some("07:00"));
    assert_eq!(analysis.data_rows[0].generated_label.as_deref(), Some("07:00"));
    assert_eq!(analysis.data_rows[0].missing_wrap.len(), 1);
    assert_eq!(analysis.data_rows[0].missing_wrap[0].column.letters(), "C");

    let hints: Vec<String> = analysis.hints().iter().map(|h| h.to_string()).collect();
    assert_eq!(hints[0], "[Sheet1] Set frozen pane to B5");
    assert!(hints.contains(&"[Sheet1] Make B3 bold".to_string()));
    assert!(hints.contains(&"[Sheet1] Enable wrap text on C5".to_string()));
}
