use anyhow::Result;
use sheet_parity::{
    CellComparison, CompareOptions, DetailedAnalysis, DetailedOptions, DifferenceReport,
    FacetValue, Hint, SheetComparison, SheetEntry, WidthValue, Workbook, Worksheet,
};
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 80;

/// Explicit widths listed by `inspect` (columns A..L)
const INSPECT_WIDTH_COLUMNS: u16 = 12;

pub fn write_compare_report<W: Write>(
    w: &mut W,
    report: &DifferenceReport,
    hints: Option<&[Hint]>,
    options: &CompareOptions,
) -> Result<()> {
    banner(w, "EXCEL FORMATTING COMPARISON")?;
    writeln!(w)?;

    writeln!(w, "📄 ORIGINAL:  {}", report.original)?;
    writeln!(w, "📄 GENERATED: {}", report.generated)?;
    writeln!(w)?;

    writeln!(w, "📋 SHEETS")?;
    rule(w, '-')?;
    writeln!(w, "Original sheets:  {}", quoted_list(&report.original_sheets))?;
    writeln!(w, "Generated sheets: {}", quoted_list(&report.generated_sheets))?;
    writeln!(w)?;

    for entry in &report.entries {
        match entry {
            SheetEntry::Missing { index, name } => {
                writeln!(w, "⚠️  Sheet {} '{}' missing in generated file!", index + 1, name)?;
                writeln!(w)?;
            }
            SheetEntry::Compared(cmp) => write_sheet(w, cmp, options)?,
        }
    }

    if let Some(hints) = hints {
        write_fix_summary(w, hints)?;
    }
    Ok(())
}

fn write_sheet<W: Write>(w: &mut W, cmp: &SheetComparison, options: &CompareOptions) -> Result<()> {
    writeln!(w, "📊 SHEET: {}", cmp.label())?;
    rule(w, '-')?;

    let dims = &cmp.dimensions;
    writeln!(w, "Dimensions:")?;
    writeln!(
        w,
        "  Original:  {} rows × {} cols",
        dims.original.max_row, dims.original.max_column
    )?;
    writeln!(
        w,
        "  Generated: {} rows × {} cols",
        dims.generated.max_row, dims.generated.max_column
    )?;
    writeln!(w)?;

    writeln!(w, "Frozen Panes:")?;
    writeln!(w, "  Original:  {}", or_none(cmp.frozen_panes.original.as_deref()))?;
    writeln!(w, "  Generated: {}", or_none(cmp.frozen_panes.generated.as_deref()))?;
    if !cmp.frozen_panes.matches {
        writeln!(w, "  ❌ DIFFERENCE!")?;
    }
    writeln!(w)?;

    writeln!(w, "Column Widths (first {} columns):", options.width_columns)?;
    if cmp.column_widths.is_empty() {
        writeln!(w, "  (no explicit widths)")?;
    }
    for width in &cmp.column_widths {
        writeln!(
            w,
            "  {}: {:>8} | {:>8} {}",
            width.column,
            width.original,
            width.generated,
            mark(width.matches)
        )?;
    }
    writeln!(w)?;

    let merged = &cmp.merged_cells;
    writeln!(w, "Merged Cells:")?;
    writeln!(w, "  Original:  {} merged regions", merged.original_count)?;
    writeln!(w, "  Generated: {} merged regions", merged.generated_count)?;
    if !merged.original_regions.is_empty() {
        writeln!(w, "  Original regions: {}", quoted_list(&merged.original_regions))?;
    }
    if !merged.generated_regions.is_empty() {
        writeln!(w, "  Generated regions: {}", quoted_list(&merged.generated_regions))?;
    }
    if !merged.counts_match {
        writeln!(w, "  ❌ DIFFERENCE!")?;
    }
    writeln!(w)?;

    match options.max_style_cells {
        Some(n) => writeln!(w, "Sample Cell Formatting (first {} cells with values):", n)?,
        None => writeln!(w, "Sample Cell Formatting (cells with values):")?,
    }
    for cell in &cmp.cells {
        write_cell(w, cell)?;
    }
    writeln!(w)?;
    writeln!(w)?;
    Ok(())
}

fn write_cell<W: Write>(w: &mut W, cell: &CellComparison) -> Result<()> {
    writeln!(w, "  {}: {}", cell.reference, cell.label)?;
    for facet in &cell.facets {
        let generated = if cell.generated_present {
            facet_text(facet.generated.as_ref())
        } else {
            "N/A".to_string()
        };
        writeln!(
            w,
            "    {}: {} | {} {}",
            facet.facet.label(),
            facet_text(facet.original.as_ref()),
            generated,
            mark(facet.matches)
        )?;
    }
    Ok(())
}

pub fn write_detailed_report<W: Write>(
    w: &mut W,
    analysis: &DetailedAnalysis,
    options: &DetailedOptions,
) -> Result<()> {
    banner(w, "DETAILED FORMATTING ANALYSIS")?;
    writeln!(
        w,
        "Sheets: '{}' vs '{}'",
        analysis.original_sheet, analysis.generated_sheet
    )?;
    writeln!(w)?;

    writeln!(w, "🧊 FROZEN PANES")?;
    rule(w, '-')?;
    let panes = &analysis.frozen_panes;
    writeln!(w, "Original:  {}", or_none(panes.original.as_deref()))?;
    writeln!(w, "Generated: {}", or_none(panes.generated.as_deref()))?;
    if panes.matches {
        writeln!(w, "✅ Match")?;
    } else {
        writeln!(w, "❌ DIFFERENCE!")?;
    }
    writeln!(w)?;

    writeln!(w, "📏 COLUMN WIDTHS")?;
    rule(w, '-')?;
    for width in &analysis.column_widths {
        writeln!(
            w,
            "Column {:>2}: Original={}  Generated={}  {}",
            width.column,
            fixed_width(&width.original),
            fixed_width(&width.generated),
            mark(width.matches)
        )?;
    }
    writeln!(w)?;

    let header = options.header_rows;
    writeln!(w, "📋 HEADER FORMATTING (Rows {}-{})", header.first, header.last)?;
    rule(w, '-')?;
    if analysis.header_issues.is_empty() {
        writeln!(w, "  ✅ No header differences")?;
    }
    for cell in &analysis.header_issues {
        writeln!(w, "  {}: {}", cell.reference, cell.label)?;
        for facet in cell.facets.iter().filter(|f| !f.matches) {
            writeln!(
                w,
                "    ❌ {}: {} vs {}",
                facet.facet.label(),
                facet_text(facet.original.as_ref()),
                facet_text(facet.generated.as_ref())
            )?;
        }
    }
    writeln!(w)?;

    let data = options.data_rows;
    writeln!(w, "⏰ DATA ROW FORMATTING (Rows {}-{})", data.first, data.last)?;
    rule(w, '-')?;
    for row in &analysis.data_rows {
        writeln!(
            w,
            "  Row {}: {} | {}",
            row.row,
            or_none(row.original_label.as_deref()),
            or_none(row.generated_label.as_deref())
        )?;
        for finding in &row.missing_wrap {
            writeln!(
                w,
                "    ❌ {}: Original has wrap_text=True, Generated has {}",
                finding.column,
                facet_text(finding.generated.map(FacetValue::Flag).as_ref())
            )?;
        }
    }
    writeln!(w)?;

    write_fix_summary(w, &analysis.hints())
}

fn write_fix_summary<W: Write>(w: &mut W, hints: &[Hint]) -> Result<()> {
    banner(w, "SUMMARY OF REQUIRED FIXES")?;
    writeln!(w)?;
    if hints.is_empty() {
        writeln!(w, "✅ No formatting differences found.")?;
    }
    for (i, hint) in hints.iter().enumerate() {
        writeln!(w, "{}. ❌ {}", i + 1, hint)?;
    }
    Ok(())
}

/// Grid bounds for `inspect`
pub struct InspectLayout {
    pub rows: u32,
    pub columns: u16,
    pub cell_chars: usize,
}

pub fn write_inspection<W: Write>(
    w: &mut W,
    path: &Path,
    workbook: &Workbook,
    layout: &InspectLayout,
) -> Result<()> {
    writeln!(w)?;
    banner(w, &format!("Analyzing: {}", path.display()))?;

    for sheet in workbook.worksheets() {
        writeln!(w)?;
        writeln!(w, "Sheet: {}", sheet.name())?;
        writeln!(w, "Dimensions: {}", sheet.dimensions())?;
        writeln!(
            w,
            "Max row: {}, Max col: {}",
            sheet.max_row(),
            sheet.max_column()
        )?;

        writeln!(w)?;
        writeln!(w, "First {} rows:", layout.rows)?;
        let rows = layout.rows.min(sheet.max_row());
        let columns = u32::from(layout.columns).min(sheet.max_column()) as u16;
        for row in 0..rows {
            let rendered: Vec<String> = (0..columns)
                .map(|col| render_cell(sheet, row, col, layout.cell_chars))
                .collect();
            writeln!(w, "Row {:2}: {}", row + 1, rendered.join(" | "))?;
        }

        writeln!(w)?;
        writeln!(w, "Column widths:")?;
        for col in 0..INSPECT_WIDTH_COLUMNS {
            if let Some(width) = sheet.column_width(col) {
                writeln!(w, "  {}: {}", column_letters(col), plain_float(width))?;
            }
        }

        if !sheet.merged_regions().is_empty() {
            writeln!(w)?;
            writeln!(w, "Merged cells:")?;
            for range in sheet.merged_regions() {
                writeln!(w, "  {}", range)?;
            }
        }
    }
    Ok(())
}

/// Display value with `[BOLD,BG:<color>,WRAP]` tags, truncated
fn render_cell(sheet: &Worksheet, row: u32, col: u16, max_chars: usize) -> String {
    let Some(cell) = sheet.cell_at(row, col).filter(|c| c.has_content()) else {
        return String::new();
    };
    let mut text = cell.value.to_string();

    if let Some(style) = &cell.style {
        let mut tags = Vec::new();
        if style.bold() == Some(true) {
            tags.push("BOLD".to_string());
        }
        if let Some(color) = style.fill_color() {
            tags.push(format!("BG:{}", color));
        }
        if style.wrap_text() == Some(true) {
            tags.push("WRAP".to_string());
        }
        if !tags.is_empty() {
            text = format!("{} [{}]", text, tags.join(","));
        }
    }

    text.chars().take(max_chars).collect()
}

fn column_letters(col: u16) -> String {
    sheet_parity::CellAddress::column_to_letters(col)
}

fn banner<W: Write>(w: &mut W, title: &str) -> Result<()> {
    rule(w, '=')?;
    writeln!(w, "{}", title)?;
    rule(w, '=')?;
    Ok(())
}

fn rule<W: Write>(w: &mut W, ch: char) -> Result<()> {
    writeln!(w, "{}", ch.to_string().repeat(RULE_WIDTH))?;
    Ok(())
}

fn mark(matches: bool) -> &'static str {
    if matches {
        "✅"
    } else {
        "❌"
    }
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("None")
}

fn facet_text(value: Option<&FacetValue>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

/// `['a', 'b']`
fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{}'", s)).collect();
    format!("[{}]", quoted.join(", "))
}

fn fixed_width(width: &WidthValue) -> String {
    match width.as_explicit() {
        Some(w) => format!("{:>6.2}", w),
        None => format!("{:>6}", width),
    }
}

/// Whole numbers keep one decimal ("13.0")
fn plain_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_parity::{
        compare_snapshots, CellStyle, FontStyle, SamplingLimits, WorkbookSnapshot,
    };

    fn workbook(sheets: Vec<Worksheet>) -> Workbook {
        let mut wb = Workbook::new();
        for sheet in sheets {
            wb.add_worksheet(sheet).unwrap();
        }
        wb
    }

    fn render_compare(original: &Workbook, generated: &Workbook) -> String {
        let limits = SamplingLimits::default();
        let options = CompareOptions::default();
        let report = compare_snapshots(
            &WorkbookSnapshot::extract("original.xlsx", original, &limits),
            &WorkbookSnapshot::extract("generated.xlsx", generated, &limits),
            &options,
        );
        let hints = sheet_parity::remediation_hints(&report);
        let mut out = Vec::new();
        write_compare_report(&mut out, &report, Some(&hints), &options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_compare_report_sections() {
        let bold = CellStyle::new().with_font(FontStyle::new().with_bold(true));

        let mut original = Worksheet::new("Roster");
        original.set_value("A1", "Title").unwrap();
        original.set_style("A1", bold).unwrap();
        original.set_column_width(0, 25.75);
        original.set_frozen_pane(Some("B5".to_string()));
        let notes = Worksheet::new("Notes");

        let mut generated = Worksheet::new("Export");
        generated.set_value("A1", "Title").unwrap();

        let text = render_compare(
            &workbook(vec![original, notes]),
            &workbook(vec![generated]),
        );

        assert!(text.contains("Original sheets:  ['Roster', 'Notes']"));
        assert!(text.contains("Generated sheets: ['Export']"));
        assert!(text.contains("📊 SHEET: Roster vs Export"));
        assert!(text.contains("  Original:  B5\n  Generated: None\n  ❌ DIFFERENCE!"));
        assert!(text.contains("  A:    25.75 |  default ❌"));
        assert!(text.contains("    Bold: True | None ❌"));
        assert!(text.contains("⚠️  Sheet 2 'Notes' missing in generated file!"));
        assert!(text.contains("SUMMARY OF REQUIRED FIXES"));
        assert!(text.contains("❌ [Export] Set frozen pane to B5"));
    }

    #[test]
    fn test_identical_workbooks_report_no_fixes() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_value("A1", "x").unwrap();
        let text = render_compare(&workbook(vec![sheet.clone()]), &workbook(vec![sheet]));
        assert!(text.contains("✅ No formatting differences found."));
        assert!(!text.contains("❌"));
    }

    #[test]
    fn test_render_cell_tags() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_value("A1", "Heading").unwrap();
        sheet
            .set_style(
                "A1",
                CellStyle::new().with_font(FontStyle::new().with_bold(true)),
            )
            .unwrap();
        sheet.set_value("B1", 0.0).unwrap();
        sheet.set_value("C1", "a long value").unwrap();

        assert_eq!(render_cell(&sheet, 0, 0, 40), "Heading [BOLD]");
        assert_eq!(render_cell(&sheet, 0, 1, 40), "0");
        assert_eq!(render_cell(&sheet, 0, 2, 6), "a long");
        assert_eq!(render_cell(&sheet, 5, 5, 40), "");
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(quoted_list(&["A".to_string(), "B".to_string()]), "['A', 'B']");
        assert_eq!(fixed_width(&WidthValue::Explicit(8.43)), "  8.43");
        assert_eq!(fixed_width(&WidthValue::Default), "default");
        assert_eq!(plain_float(13.0), "13.0");
        assert_eq!(plain_float(4.88), "4.88");
    }
}
