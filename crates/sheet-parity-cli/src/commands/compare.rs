use crate::commands::LimitArgs;
use crate::output::{json, text};
use crate::OutputFormat;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use sheet_parity::prelude::*;
use sheet_parity::NumericTolerance;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WidthMode {
    /// Absent widths read as "default" and must match exactly
    Symbolic,
    /// Absent widths read as the standard width; equal within a tolerance
    Numeric,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference workbook
    #[arg(default_value = "original.xlsx")]
    pub original: PathBuf,

    /// Workbook to check against the reference
    #[arg(default_value = "generated.xlsx")]
    pub generated: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// How column widths are compared
    #[arg(long, value_enum, default_value = "symbolic")]
    pub widths: WidthMode,

    /// Width assumed for columns without one (numeric mode)
    #[arg(long, value_name = "WIDTH", default_value_t = 8.43)]
    pub standard_width: f64,

    /// Largest width difference still treated as equal (numeric mode)
    #[arg(long, value_name = "DELTA", default_value_t = 0.1)]
    pub width_tolerance: f64,

    /// Style facets to compare, comma separated [default: bold,wrap,fill]
    #[arg(long, value_delimiter = ',', value_name = "FACETS")]
    pub facets: Vec<StyleFacet>,

    /// Compare only the first N sampled cells of each sheet
    #[arg(long, value_name = "N")]
    pub max_cells: Option<usize>,

    /// Width rows listed per sheet
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub width_listing: usize,

    /// Merged regions listed per sheet
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub merged_listing: usize,

    /// Characters of a cell value shown as its label
    #[arg(long, value_name = "N", default_value_t = 30)]
    pub label_chars: usize,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Leave out the summary of required fixes
    #[arg(long)]
    pub no_hints: bool,

    /// Exit with status 1 when any difference is found
    #[arg(long)]
    pub fail_on_diff: bool,
}

impl CompareArgs {
    pub fn compare_options(&self) -> CompareOptions {
        let width_policy = match self.widths {
            WidthMode::Symbolic => WidthPolicyKind::Symbolic,
            WidthMode::Numeric => WidthPolicyKind::Numeric(NumericTolerance {
                standard_width: self.standard_width,
                tolerance: self.width_tolerance,
            }),
        };
        let defaults = CompareOptions::default();
        CompareOptions {
            width_columns: self.width_listing,
            merged_listing: self.merged_listing,
            label_chars: self.label_chars,
            width_policy,
            facets: if self.facets.is_empty() {
                defaults.facets
            } else {
                self.facets.clone()
            },
            max_style_cells: self.max_cells,
        }
    }
}

pub fn run(args: &CompareArgs) -> Result<ExitCode> {
    let options = args.compare_options();
    let report = compare_files(
        &args.original,
        &args.generated,
        &args.limits.to_limits(),
        &options,
    )
    .context("comparison aborted")?;

    let hints = (!args.no_hints).then(|| remediation_hints(&report));

    let stdout = io::stdout();
    let mut handle = BufWriter::new(stdout.lock());
    match args.format {
        OutputFormat::Text => {
            text::write_compare_report(&mut handle, &report, hints.as_deref(), &options)?
        }
        OutputFormat::Json => {
            json::write_compare_report(&mut handle, &report, hints.as_deref())?
        }
    }
    handle.flush()?;

    tracing::info!(
        mismatches = report.mismatch_count(),
        missing_sheets = report.missing_sheet_count(),
        "comparison finished"
    );

    if args.fail_on_diff && report.has_findings() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
