//! Reading fixtures through the public entry points

use crate::common::*;
use pretty_assertions::assert_eq;
use sheet_parity::prelude::*;
use sheet_parity::HorizontalAlignment;

#[test]
fn test_open_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx(dir.path(), "template.xlsx", &[template_sheet("Ethogram")]);

    let workbook = open_workbook(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Ethogram"]);

    let sheet = workbook.worksheet(0).unwrap();
    assert_eq!(sheet.frozen_pane(), Some("B5"));
    assert_eq!(sheet.column_width(0), Some(25.75));
    assert_eq!(sheet.column_width(12), Some(13.0));
    assert_eq!(sheet.row_height(0), Some(30.0));
    assert_eq!(sheet.dimensions(), "A1:C5");
}

#[test]
fn test_snapshot_of_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx(dir.path(), "template.xlsx", &[template_sheet("Ethogram")]);

    let snapshot = snapshot_file(&path, &SamplingLimits::default()).unwrap();
    assert_eq!(snapshot.source, path.display().to_string());
    let sheet = &snapshot.sheets[0];

    assert_eq!(sheet.dimensions.max_row, 5);
    assert_eq!(sheet.dimensions.max_column, 3);
    assert_eq!(sheet.frozen_panes.as_deref(), Some("B5"));
    // widths are only read up to the used extent (column C)
    let widths: Vec<(String, f64)> = sheet
        .column_widths
        .iter()
        .map(|(c, w)| (c.letters(), *w))
        .collect();
    assert_eq!(
        widths,
        vec![
            ("A".to_string(), 25.75),
            ("B".to_string(), 4.88),
            ("C".to_string(), 13.0)
        ]
    );
    assert_eq!(sheet.merged_cells, vec!["A1:M1".to_string()]);

    let refs: Vec<String> = sheet.sample_cells.keys().map(|a| a.to_string()).collect();
    assert_eq!(refs, vec!["A1", "B3", "A4", "B5", "C5"]);

    let title = &sheet.sample_cells[&CellAddress::parse("A1").unwrap()];
    assert_eq!(title.value, "1 Hour Ethogram");
    assert_eq!(title.font_bold, Some(true));
    assert_eq!(title.font_size, Some(11.0));
    assert_eq!(title.alignment_horizontal, Some(HorizontalAlignment::Center));
    assert_eq!(title.alignment_wrap_text, Some(true));
    assert_eq!(title.fill_color.as_deref(), Some("FFD9E1F2"));
    assert!(title.border);

    let plain = &sheet.sample_cells[&CellAddress::parse("B5").unwrap()];
    assert_eq!(plain.font_bold, None);
    assert_eq!(plain.alignment_wrap_text, None);
    assert_eq!(plain.fill_color, None);
    assert!(!plain.border);
}

#[test]
fn test_xlsm_extension_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx(dir.path(), "macro.XLSM", &[SheetFixture::new("Data")]);
    let workbook = Workbook::open(&path).unwrap();
    assert_eq!(workbook.sheet_count(), 1);
}

#[test]
fn test_snapshot_serializes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx(dir.path(), "template.xlsx", &[template_sheet("Ethogram")]);
    let snapshot = snapshot_file(&path, &SamplingLimits::default()).unwrap();

    let json = serde_json::to_value(&snapshot).unwrap();
    let sheet = &json["sheets"][0];
    assert_eq!(sheet["name"], "Ethogram");
    assert_eq!(sheet["column_widths"]["B"], 4.88);
    assert_eq!(sheet["row_heights"]["1"], 30.0);
    assert_eq!(sheet["sample_cells"]["A1"]["alignment_horizontal"], "center");
    assert_eq!(sheet["sample_cells"]["B5"]["font_bold"], serde_json::Value::Null);
}
