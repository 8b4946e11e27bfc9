//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::read_styles_xml;
use crate::xml::{attr_parse, attr_value};
use sheet_parity_core::style::CellStyle;
use sheet_parity_core::{CellAddress, CellRange, CellValue, Workbook, Worksheet, MAX_COLS};

const DEFAULT_WORKBOOK_PART: &str = "xl/workbook.xml";

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// One entry of a `.rels` part
#[derive(Debug, Clone)]
struct Relationship {
    /// Package path of the target part, without a leading '/'
    target: String,
    rel_type: String,
}

impl Relationship {
    fn is(&self, kind: &str) -> bool {
        self.rel_type.rsplit('/').next() == Some(kind)
    }
}

/// Cell being accumulated between `<c>` and `</c>`
#[derive(Debug, Default)]
struct PendingCell {
    address: Option<CellAddress>,
    cell_type: Option<String>,
    style: Option<usize>,
    value: Option<String>,
    formula: Option<String>,
    inline: Option<String>,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let workbook_part = Self::read_workbook_part_name(&mut archive)?;
        let sheets = Self::read_workbook_xml(&mut archive, &workbook_part)?;
        let rels = Self::read_relationships(&mut archive, &workbook_part)?;

        let shared_strings = match rels.values().find(|r| r.is("sharedStrings")) {
            Some(rel) => Self::read_shared_strings(&mut archive, &rel.target)?,
            None => Vec::new(),
        };
        let cell_styles = match rels.values().find(|r| r.is("styles")) {
            Some(rel) => match archive.by_name(&rel.target) {
                Ok(file) => read_styles_xml(file)?,
                Err(_) => {
                    log::warn!("styles part {} is missing; cells read unstyled", rel.target);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut workbook = Workbook::new();
        for (name, r_id) in sheets {
            match rels.get(&r_id) {
                Some(rel) if rel.is("worksheet") => {
                    let mut worksheet = Worksheet::new(name);
                    Self::read_worksheet(
                        &mut archive,
                        &rel.target,
                        &mut worksheet,
                        &shared_strings,
                        &cell_styles,
                    )?;
                    workbook.add_worksheet(worksheet)?;
                }
                Some(rel) => {
                    log::warn!("skipping sheet '{}': {} is not a worksheet", name, rel.target);
                }
                None => {
                    log::warn!("skipping sheet '{}': no relationship {}", name, r_id);
                }
            }
        }

        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat("workbook has no worksheets".into()));
        }

        Ok(workbook)
    }

    /// Locate the main workbook part through the package relationships
    fn read_workbook_part_name<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<String> {
        if archive.by_name("_rels/.rels").is_err() {
            return Ok(DEFAULT_WORKBOOK_PART.to_string());
        }
        let rels = Self::read_relationships(archive, "")?;
        Ok(rels
            .values()
            .find(|r| r.is("officeDocument"))
            .map(|r| r.target.clone())
            .unwrap_or_else(|| DEFAULT_WORKBOOK_PART.to_string()))
    }

    /// Read workbook.xml to get sheet names and relationship ids, in tab order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        part: &str,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name(part)
            .map_err(|_| XlsxError::MissingPart(part.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sheet" => {
                    if let (Some(name), Some(r_id)) = (attr_value(&e, b"name"), attr_value(&e, b"id"))
                    {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read the `.rels` part belonging to `source_part` ("" for the package)
    ///
    /// Targets are resolved to package paths relative to the source part.
    fn read_relationships<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        source_part: &str,
    ) -> XlsxResult<HashMap<String, Relationship>> {
        let (dir, file_name) = match source_part.rsplit_once('/') {
            Some((dir, file_name)) => (dir, file_name),
            None => ("", source_part),
        };
        let rels_part = if dir.is_empty() {
            format!("_rels/{}.rels", file_name)
        } else {
            format!("{}/_rels/{}.rels", dir, file_name)
        };

        let file = archive
            .by_name(&rels_part)
            .map_err(|_| XlsxError::MissingPart(rels_part.clone()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let external = attr_value(&e, b"TargetMode").as_deref() == Some("External");
                    if let (Some(id), Some(target), Some(rel_type), false) = (
                        attr_value(&e, b"Id"),
                        attr_value(&e, b"Target"),
                        attr_value(&e, b"Type"),
                        external,
                    ) {
                        rels.insert(
                            id,
                            Relationship {
                                target: resolve_target(dir, &target),
                                rel_type,
                            },
                        );
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read the shared strings table
    ///
    /// Rich-text runs are concatenated; phonetic runs (`rPh`) are skipped.
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        part: &str,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name(part) {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if !in_si && e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        current.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read a worksheet part into `worksheet`
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        part: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        cell_styles: &[CellStyle],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(part)
            .map_err(|_| XlsxError::MissingPart(part.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();

        let mut sheet_views_seen = 0usize;
        let mut in_sheet_view = false;

        // 1-based number of the current row, and the last column used in it
        let mut current_row: u32 = 0;
        let mut last_col: Option<u16> = None;

        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_formula = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;

        loop {
            let event = xml_reader.read_event_into(&mut buf)?;
            let done = matches!(event, Event::Eof);
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    match e.local_name().as_ref() {
                        b"sheetView" => {
                            sheet_views_seen += 1;
                            in_sheet_view = !is_empty && sheet_views_seen == 1;
                        }
                        b"pane" if in_sheet_view => {
                            worksheet.set_frozen_pane(pane_anchor(e));
                        }
                        b"col" => Self::apply_col(e, worksheet),
                        b"row" => {
                            current_row = attr_parse(e, b"r").unwrap_or(current_row + 1);
                            last_col = None;
                            if let Some(height) = attr_parse::<f64>(e, b"ht") {
                                worksheet.set_row_height(current_row.saturating_sub(1), height);
                            }
                        }
                        b"c" => {
                            let pending = Self::start_cell(e, current_row, last_col);
                            if let Some(addr) = pending.address {
                                last_col = Some(addr.col);
                            }
                            if is_empty {
                                Self::process_cell(
                                    worksheet,
                                    pending,
                                    shared_strings,
                                    cell_styles,
                                )?;
                            } else {
                                cell = Some(pending);
                            }
                        }
                        b"v" if cell.is_some() && !is_empty => in_value = true,
                        b"f" if cell.is_some() && !is_empty => in_formula = true,
                        b"rPh" if cell.is_some() && !is_empty => in_phonetic = true,
                        b"t" if cell.is_some() && !is_empty && !in_phonetic => {
                            in_inline_text = true;
                        }
                        b"mergeCell" => {
                            if let Some(reference) = attr_value(e, b"ref") {
                                match CellRange::parse(&reference) {
                                    Ok(range) => worksheet.merge_cells(range),
                                    Err(err) => log::warn!(
                                        "{}: ignoring merged range {:?}: {}",
                                        worksheet.name(),
                                        reference,
                                        err
                                    ),
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"sheetView" => in_sheet_view = false,
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            Self::process_cell(worksheet, pending, shared_strings, cell_styles)?;
                        }
                    }
                    b"v" => in_value = false,
                    b"f" => in_formula = false,
                    b"t" => in_inline_text = false,
                    b"rPh" => in_phonetic = false,
                    _ => {}
                },
                Event::Text(ref e) => {
                    if let Some(pending) = cell.as_mut() {
                        let text = e.unescape()?;
                        if in_value {
                            pending.value.get_or_insert_with(String::new).push_str(&text);
                        } else if in_formula {
                            pending.formula.get_or_insert_with(String::new).push_str(&text);
                        } else if in_inline_text {
                            pending.inline.get_or_insert_with(String::new).push_str(&text);
                        }
                    }
                }
                _ => {}
            }
            drop(event);
            if done {
                break;
            }
            buf.clear();
        }

        Ok(())
    }

    /// Apply a `<col min max width>` range; the width attribute alone makes it explicit
    fn apply_col(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        let min = attr_parse::<u32>(e, b"min");
        let max = attr_parse::<u32>(e, b"max");
        let width = attr_parse::<f64>(e, b"width");

        if let (Some(min), Some(max), Some(width)) = (min, max, width) {
            let max = max.min(MAX_COLS as u32);
            for col in min.max(1)..=max {
                worksheet.set_column_width((col - 1) as u16, width);
            }
        }
    }

    /// Read the attributes of a `<c>` element. A cell without `r` follows the
    /// previous cell of the same row.
    fn start_cell(e: &BytesStart<'_>, current_row: u32, last_col: Option<u16>) -> PendingCell {
        let address = match attr_value(e, b"r") {
            Some(reference) => CellAddress::parse(&reference).ok(),
            None if current_row > 0 => Some(CellAddress::new(
                current_row - 1,
                last_col.map_or(0, |c| c.saturating_add(1)),
            )),
            None => None,
        };

        PendingCell {
            address,
            cell_type: attr_value(e, b"t"),
            style: attr_parse(e, b"s"),
            ..Default::default()
        }
    }

    /// Store a finished cell in the worksheet
    fn process_cell(
        worksheet: &mut Worksheet,
        cell: PendingCell,
        shared_strings: &[String],
        styles: &[CellStyle],
    ) -> XlsxResult<()> {
        let Some(addr) = cell.address else {
            log::warn!("{}: skipping cell without a usable reference", worksheet.name());
            return Ok(());
        };

        let cell_type = cell.cell_type.as_deref();
        let value = match (cell.formula, cell.value) {
            (Some(formula), cached) => CellValue::Formula {
                text: if formula.starts_with('=') {
                    formula
                } else {
                    format!("={}", formula)
                },
                cached_value: cached
                    .map(|v| Self::typed_value(&v, cell_type, shared_strings))
                    .transpose()?
                    .map(Box::new),
            },
            (None, Some(v)) => Self::typed_value(&v, cell_type, shared_strings)?,
            (None, None) => match cell.inline {
                Some(text) => CellValue::String(decode_excel_escapes(&text)),
                None => CellValue::Empty,
            },
        };

        if !value.is_empty() {
            worksheet.set_value_at(addr.row, addr.col, value)?;
        }

        if let Some(index) = cell.style {
            match styles.get(index) {
                Some(style) => worksheet.set_style_at(addr.row, addr.col, style.clone())?,
                None => log::warn!(
                    "{}!{}: style index {} out of range ({} formats)",
                    worksheet.name(),
                    addr,
                    index,
                    styles.len()
                ),
            }
        }

        Ok(())
    }

    /// Interpret a `<v>` payload according to the cell's `t` attribute
    fn typed_value(
        raw: &str,
        cell_type: Option<&str>,
        shared_strings: &[String],
    ) -> XlsxResult<CellValue> {
        Ok(match cell_type {
            Some("s") => {
                let idx: usize = raw.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", raw))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::String(s.clone())
            }
            Some("b") => CellValue::Boolean(raw.trim() == "1" || raw.eq_ignore_ascii_case("true")),
            Some("e") => CellValue::Error(raw.to_string()),
            Some("str") | Some("inlineStr") => CellValue::String(decode_excel_escapes(raw)),
            None | Some("n") => match raw.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(raw.to_string()),
            },
            Some(_) => CellValue::String(raw.to_string()),
        })
    }
}

/// Frozen-pane anchor from a `<pane>` element
///
/// `topLeftCell` is kept verbatim. A frozen pane that omits it gets the cell
/// just past the split.
fn pane_anchor(e: &BytesStart<'_>) -> Option<String> {
    if let Some(top_left) = attr_value(e, b"topLeftCell") {
        return Some(top_left);
    }

    let frozen = matches!(
        attr_value(e, b"state").as_deref(),
        Some("frozen") | Some("frozenSplit")
    );
    if !frozen {
        return None;
    }

    let x_split = attr_parse::<f64>(e, b"xSplit").unwrap_or(0.0).max(0.0) as u32;
    let y_split = attr_parse::<f64>(e, b"ySplit").unwrap_or(0.0).max(0.0) as u32;
    if x_split == 0 && y_split == 0 {
        return None;
    }
    let col = x_split.min(MAX_COLS as u32 - 1) as u16;
    Some(CellAddress::new(y_split, col).to_string())
}

/// Resolve a relationship target against the source part's directory
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}
