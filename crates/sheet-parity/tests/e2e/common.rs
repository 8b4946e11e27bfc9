//! Common utilities for E2E tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

/// Style indices available to fixture cells
pub mod xf {
    /// Default formatting
    pub const PLAIN: u32 = 0;
    /// Bold, centered, wrapped, light blue fill, thin border
    pub const HEADER: u32 = 1;
    /// Wrapped only
    pub const WRAP: u32 = 2;
}

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="2">
    <font><sz val="11"/><name val="Calibri"/></font>
    <font><b/><sz val="11"/><name val="Calibri"/></font>
  </fonts>
  <fills count="3">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
    <fill><patternFill patternType="solid"><fgColor rgb="FFD9E1F2"/><bgColor indexed="64"/></patternFill></fill>
  </fills>
  <borders count="2">
    <border><left/><right/><top/><bottom/><diagonal/></border>
    <border><left style="thin"/><right style="thin"/><top style="thin"/><bottom style="thin"/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="0" fontId="1" fillId="2" borderId="1" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1">
      <alignment horizontal="center" vertical="center" wrapText="1"/>
    </xf>
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1">
      <alignment wrapText="1"/>
    </xf>
  </cellXfs>
  <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

/// One worksheet of a fixture
#[derive(Debug, Clone, Default)]
pub struct SheetFixture {
    name: String,
    frozen: Option<String>,
    widths: Vec<(u32, f64)>,
    rows: Vec<(u32, Option<f64>, Vec<(String, String, u32)>)>,
    merged: Vec<String>,
}

impl SheetFixture {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Freeze panes at `anchor`
    pub fn frozen(mut self, anchor: &str) -> Self {
        self.frozen = Some(anchor.to_string());
        self
    }

    pub fn without_frozen_pane(mut self) -> Self {
        self.frozen = None;
        self
    }

    /// Explicit width for a 1-based column
    pub fn width(mut self, column: u32, width: f64) -> Self {
        self.widths.push((column, width));
        self
    }

    /// Inline-string cell with a style index
    pub fn cell(mut self, reference: &str, value: &str, style: u32) -> Self {
        let row: u32 = reference
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .parse()
            .expect("cell reference needs a row");
        match self.rows.iter_mut().find(|(r, _, _)| *r == row) {
            Some((_, _, cells)) => cells.push((reference.to_string(), value.to_string(), style)),
            None => self.rows.push((
                row,
                None,
                vec![(reference.to_string(), value.to_string(), style)],
            )),
        }
        self
    }

    /// Explicit height for a 1-based row
    pub fn height(mut self, row: u32, height: f64) -> Self {
        match self.rows.iter_mut().find(|(r, _, _)| *r == row) {
            Some((_, h, _)) => *h = Some(height),
            None => self.rows.push((row, Some(height), Vec::new())),
        }
        self
    }

    pub fn merge(mut self, range: &str) -> Self {
        self.merged.push(range.to_string());
        self
    }

    fn to_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        xml.push_str(r#"<sheetViews><sheetView workbookViewId="0">"#);
        if let Some(anchor) = &self.frozen {
            xml.push_str(&format!(
                r#"<pane xSplit="1" ySplit="4" topLeftCell="{}" activePane="bottomRight" state="frozen"/>"#,
                anchor
            ));
        }
        xml.push_str("</sheetView></sheetViews>");

        if !self.widths.is_empty() {
            xml.push_str("<cols>");
            for (col, width) in &self.widths {
                xml.push_str(&format!(
                    r#"<col min="{0}" max="{0}" width="{1}" customWidth="1"/>"#,
                    col, width
                ));
            }
            xml.push_str("</cols>");
        }

        let mut rows = self.rows.clone();
        rows.sort_by_key(|(r, _, _)| *r);
        xml.push_str("<sheetData>");
        for (row, height, cells) in &rows {
            match height {
                Some(h) => xml.push_str(&format!(
                    r#"<row r="{}" ht="{}" customHeight="1">"#,
                    row, h
                )),
                None => xml.push_str(&format!(r#"<row r="{}">"#, row)),
            }
            for (reference, value, style) in cells {
                xml.push_str(&format!(
                    r#"<c r="{}" s="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    reference,
                    style,
                    escape(value)
                ));
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");

        if !self.merged.is_empty() {
            xml.push_str(&format!(r#"<mergeCells count="{}">"#, self.merged.len()));
            for range in &self.merged {
                xml.push_str(&format!(r#"<mergeCell ref="{}"/>"#, range));
            }
            xml.push_str("</mergeCells>");
        }

        xml.push_str("</worksheet>");
        xml
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write an XLSX package with the given sheets to `dir/file_name`
pub fn write_xlsx(dir: &Path, file_name: &str, sheets: &[SheetFixture]) -> PathBuf {
    let path = dir.join(file_name);
    let file = File::create(&path).expect("create fixture file");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let mut put = |name: &str, content: &str| {
        zip.start_file(name, options).expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    };

    put("[Content_Types].xml", CONTENT_TYPES);
    put("_rels/.rels", PACKAGE_RELS);

    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, sheet) in sheets.iter().enumerate() {
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(&sheet.name),
            i + 1,
            i + 1
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        sheets.len() + 1
    ));
    rels.push_str("</Relationships>");

    put("xl/workbook.xml", &workbook);
    put("xl/_rels/workbook.xml.rels", &rels);
    put("xl/styles.xml", STYLES);
    for (i, sheet) in sheets.iter().enumerate() {
        put(&format!("xl/worksheets/sheet{}.xml", i + 1), &sheet.to_xml());
    }

    zip.finish().expect("finish zip");
    path
}

/// The reference template: frozen at B5, sized columns, styled header rows
pub fn template_sheet(name: &str) -> SheetFixture {
    let mut sheet = SheetFixture::new(name)
        .frozen("B5")
        .width(1, 25.75)
        .width(2, 4.88)
        .height(1, 30.0)
        .cell("A1", "1 Hour Ethogram", xf::HEADER)
        .merge("A1:M1")
        .cell("B3", "Time:", xf::HEADER)
        .cell("A4", "Date/Time", xf::HEADER)
        .cell("B5", "07:00", xf::PLAIN)
        .cell("C5", "resting", xf::WRAP);
    for col in 3..=13 {
        sheet = sheet.width(col, 13.0);
    }
    sheet
}
