//! Documents that cannot be opened

use crate::common::*;
use sheet_parity::prelude::*;
use sheet_parity::XlsxError;
use std::error::Error as _;

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.xlsx");

    let err = open_workbook(&path).unwrap_err();
    assert!(matches!(
        err,
        OpenError::Read {
            source: XlsxError::Io(_),
            ..
        }
    ));
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("nope.xlsx"));
    assert!(err.source().is_some());
}

#[test]
fn test_not_a_zip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.xlsx");
    std::fs::write(&path, b"this is not a spreadsheet").unwrap();

    let err = open_workbook(&path).unwrap_err();
    assert!(matches!(
        err,
        OpenError::Read {
            source: XlsxError::Zip(_),
            ..
        }
    ));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx(dir.path(), "report.csv", &[SheetFixture::new("Data")]);

    let err = open_workbook(&path).unwrap_err();
    assert!(matches!(err, OpenError::UnsupportedFormat { .. }));
    assert!(err.to_string().contains("report.csv"));
}

#[test]
fn test_broken_generated_file_yields_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let original = write_xlsx(dir.path(), "original.xlsx", &[template_sheet("Ethogram")]);
    let generated = dir.path().join("generated.xlsx");
    std::fs::write(&generated, b"PK\x03\x04 truncated").unwrap();

    let result = compare_files(
        &original,
        &generated,
        &SamplingLimits::default(),
        &CompareOptions::default(),
    );
    match result {
        Err(err) => assert_eq!(err.path(), generated.as_path()),
        Ok(report) => panic!("expected an open error, got {} entries", report.entries.len()),
    }
}

#[test]
fn test_detailed_requires_openable_files() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("missing.xlsx");
    let generated = write_xlsx(dir.path(), "generated.xlsx", &[template_sheet("Ethogram")]);

    let err = detailed_files(&original, &generated, &DetailedOptions::default()).unwrap_err();
    assert_eq!(err.path(), original.as_path());
}
