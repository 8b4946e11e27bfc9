use anyhow::Result;
use serde::Serialize;
use sheet_parity::{DetailedAnalysis, DifferenceReport, Hint};
use std::io::Write;

#[derive(Serialize)]
struct CompareOutput<'a> {
    #[serde(flatten)]
    report: &'a DifferenceReport,
    has_findings: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    hints: Option<&'a [Hint]>,
}

#[derive(Serialize)]
struct DetailedOutput<'a> {
    #[serde(flatten)]
    analysis: &'a DetailedAnalysis,
    has_findings: bool,
    hints: Vec<Hint>,
}

pub fn write_compare_report<W: Write>(
    w: &mut W,
    report: &DifferenceReport,
    hints: Option<&[Hint]>,
) -> Result<()> {
    write_json(
        w,
        &CompareOutput {
            report,
            has_findings: report.has_findings(),
            hints,
        },
    )
}

pub fn write_detailed_report<W: Write>(w: &mut W, analysis: &DetailedAnalysis) -> Result<()> {
    write_json(
        w,
        &DetailedOutput {
            analysis,
            has_findings: analysis.has_findings(),
            hints: analysis.hints(),
        },
    )
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}
