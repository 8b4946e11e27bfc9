//! styles.xml reader
//!
//! Resolves each `cellXfs/xf` record into a [`CellStyle`]. Cell style
//! records (`cellStyleXfs`) and differential formats (`dxfs`) are skipped.

use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::XlsxResult;
use crate::xml::{attr_bool, attr_parse, attr_value};
use sheet_parity_core::style::{
    Alignment, BorderLineStyle, BorderStyle, CellStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, VerticalAlignment,
};

/// Which top-level collection of styles.xml is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Fonts,
    Fills,
    Borders,
    CellXfs,
    Skipped,
}

#[derive(Debug, Default)]
struct PendingFill {
    pattern: Option<String>,
    foreground: Option<Color>,
    background: Option<Color>,
    gradient: bool,
}

impl PendingFill {
    fn finish(self) -> FillStyle {
        if self.gradient {
            return FillStyle::Gradient;
        }
        match self.pattern.as_deref() {
            None | Some("none") => FillStyle::None,
            Some("solid") => FillStyle::Solid {
                color: self.foreground,
            },
            Some(pattern) => FillStyle::Pattern {
                pattern: pattern.to_string(),
                foreground: self.foreground,
                background: self.background,
            },
        }
    }
}

#[derive(Debug, Default)]
struct PendingXf {
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    alignment: Option<Alignment>,
}

impl PendingXf {
    fn from_element(e: &BytesStart<'_>) -> Self {
        Self {
            font_id: attr_parse(e, b"fontId").unwrap_or(0),
            fill_id: attr_parse(e, b"fillId").unwrap_or(0),
            border_id: attr_parse(e, b"borderId").unwrap_or(0),
            alignment: None,
        }
    }
}

/// Read styles.xml into one resolved style per `cellXfs` entry
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Vec<CellStyle>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut section = Section::None;

    let mut fonts: Vec<FontStyle> = Vec::new();
    let mut fills: Vec<FillStyle> = Vec::new();
    let mut borders: Vec<BorderStyle> = Vec::new();
    let mut cell_xfs: Vec<CellStyle> = Vec::new();

    let mut current_font: Option<FontStyle> = None;
    let mut current_fill: Option<PendingFill> = None;
    let mut current_border: Option<BorderStyle> = None;
    let mut current_xf: Option<PendingXf> = None;

    loop {
        let event = xml_reader.read_event_into(&mut buf)?;
        let done = matches!(event, Event::Eof);
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"fonts" => section = Section::Fonts,
                    b"fills" => section = Section::Fills,
                    b"borders" => section = Section::Borders,
                    b"cellXfs" => section = Section::CellXfs,
                    b"cellStyleXfs" | b"dxfs" | b"cellStyles" | b"tableStyles" | b"colors"
                    | b"extLst" => section = Section::Skipped,

                    b"font" if section == Section::Fonts => {
                        if is_empty {
                            fonts.push(FontStyle::new());
                        } else {
                            current_font = Some(FontStyle::new());
                        }
                    }
                    b"b" => {
                        if let Some(font) = current_font.as_mut() {
                            // <b/> alone means bold; val only ever turns it off
                            font.bold = Some(attr_bool(e, b"val").unwrap_or(true));
                        }
                    }
                    b"sz" => {
                        if let Some(font) = current_font.as_mut() {
                            font.size = attr_parse(e, b"val");
                        }
                    }
                    b"name" => {
                        if let Some(font) = current_font.as_mut() {
                            font.name = attr_value(e, b"val");
                        }
                    }

                    b"fill" if section == Section::Fills => {
                        if is_empty {
                            fills.push(FillStyle::None);
                        } else {
                            current_fill = Some(PendingFill::default());
                        }
                    }
                    b"patternFill" => {
                        if let Some(fill) = current_fill.as_mut() {
                            fill.pattern = attr_value(e, b"patternType");
                        }
                    }
                    b"gradientFill" => {
                        if let Some(fill) = current_fill.as_mut() {
                            fill.gradient = true;
                        }
                    }
                    b"fgColor" => {
                        if let Some(fill) = current_fill.as_mut() {
                            fill.foreground = Some(parse_color_attrs(e));
                        }
                    }
                    b"bgColor" => {
                        if let Some(fill) = current_fill.as_mut() {
                            fill.background = Some(parse_color_attrs(e));
                        }
                    }

                    b"border" if section == Section::Borders => {
                        if is_empty {
                            borders.push(BorderStyle::new());
                        } else {
                            current_border = Some(BorderStyle::new());
                        }
                    }
                    edge @ (b"left" | b"right" | b"top" | b"bottom" | b"start" | b"end") => {
                        if let Some(border) = current_border.as_mut() {
                            let name = match edge {
                                b"left" | b"start" => "left",
                                b"right" | b"end" => "right",
                                b"top" => "top",
                                _ => "bottom",
                            };
                            let line =
                                attr_value(e, b"style").and_then(|s| BorderLineStyle::from_xlsx(&s));
                            border.set_edge(name, line);
                        }
                    }

                    b"xf" if section == Section::CellXfs => {
                        let xf = PendingXf::from_element(e);
                        if is_empty {
                            cell_xfs.push(resolve_style(xf, &fonts, &fills, &borders));
                        } else {
                            current_xf = Some(xf);
                        }
                    }
                    b"alignment" => {
                        if let Some(xf) = current_xf.as_mut() {
                            xf.alignment = Some(parse_alignment(e));
                        }
                    }
                    _ => {}
                }
            }

            Event::End(ref e) => match e.local_name().as_ref() {
                b"fonts" | b"fills" | b"borders" | b"cellXfs" | b"cellStyleXfs" | b"dxfs"
                | b"cellStyles" | b"tableStyles" | b"colors" | b"extLst" => {
                    section = Section::None;
                }
                b"font" => {
                    if let Some(font) = current_font.take() {
                        fonts.push(font);
                    }
                }
                b"fill" => {
                    if let Some(fill) = current_fill.take() {
                        fills.push(fill.finish());
                    }
                }
                b"border" => {
                    if let Some(border) = current_border.take() {
                        borders.push(border);
                    }
                }
                b"xf" => {
                    if let Some(xf) = current_xf.take() {
                        cell_xfs.push(resolve_style(xf, &fonts, &fills, &borders));
                    }
                }
                _ => {}
            },

            _ => {}
        }
        drop(event);
        if done {
            break;
        }
        buf.clear();
    }

    Ok(cell_xfs)
}

fn resolve_style(
    xf: PendingXf,
    fonts: &[FontStyle],
    fills: &[FillStyle],
    borders: &[BorderStyle],
) -> CellStyle {
    let font = fonts.get(xf.font_id).cloned();
    if font.is_none() && !fonts.is_empty() {
        log::warn!("cell format references missing font {}", xf.font_id);
    }

    CellStyle {
        font,
        alignment: xf.alignment,
        fill: fills.get(xf.fill_id).cloned().unwrap_or_default(),
        border: borders.get(xf.border_id).copied().unwrap_or_default(),
    }
}

fn parse_alignment(e: &BytesStart<'_>) -> Alignment {
    Alignment {
        horizontal: attr_value(e, b"horizontal").and_then(|s| HorizontalAlignment::from_xlsx(&s)),
        vertical: attr_value(e, b"vertical").and_then(|s| VerticalAlignment::from_xlsx(&s)),
        wrap_text: attr_bool(e, b"wrapText"),
    }
}

fn parse_color_attrs(e: &BytesStart<'_>) -> Color {
    // Priority: rgb > theme > indexed > auto
    if let Some(color) = attr_value(e, b"rgb").and_then(|s| Color::from_hex(&s)) {
        return color;
    }

    if let Some(index) = attr_parse::<u8>(e, b"theme") {
        let tint = attr_parse::<f64>(e, b"tint")
            .map(|t| (t * 100.0).round() as i8)
            .unwrap_or(0);
        return Color::Theme { index, tint };
    }

    if let Some(i) = attr_parse::<u8>(e, b"indexed") {
        return Color::Indexed(i);
    }

    Color::Auto
}
