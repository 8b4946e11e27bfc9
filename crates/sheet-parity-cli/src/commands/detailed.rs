use crate::output::{json, text};
use crate::OutputFormat;
use anyhow::{bail, Context, Result};
use clap::Args;
use sheet_parity::prelude::*;
use sheet_parity::{NumericTolerance, RowSpan};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct DetailedArgs {
    /// Reference workbook
    #[arg(default_value = "original.xlsx")]
    pub original: PathBuf,

    /// Workbook to check against the reference
    #[arg(default_value = "generated.xlsx")]
    pub generated: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Columns checked for widths and header styling
    #[arg(long, value_name = "N", default_value_t = 13)]
    pub columns: u16,

    /// Header rows, as FIRST:LAST (1-based)
    #[arg(long, value_name = "FIRST:LAST", default_value = "1:4", value_parser = parse_row_span)]
    pub header_rows: RowSpan,

    /// Data rows, as FIRST:LAST (1-based)
    #[arg(long, value_name = "FIRST:LAST", default_value = "5:7", value_parser = parse_row_span)]
    pub data_rows: RowSpan,

    /// Column holding each data row's label
    #[arg(long, value_name = "COLUMN", default_value = "B")]
    pub label_column: ColumnRef,

    /// Width assumed for columns without one
    #[arg(long, value_name = "WIDTH", default_value_t = 8.43)]
    pub standard_width: f64,

    /// Largest width difference still treated as equal
    #[arg(long, value_name = "DELTA", default_value_t = 0.1)]
    pub width_tolerance: f64,

    /// Exit with status 1 when any difference is found
    #[arg(long)]
    pub fail_on_diff: bool,
}

impl DetailedArgs {
    pub fn detailed_options(&self) -> Result<DetailedOptions> {
        if self.columns == 0 {
            bail!("--columns must be at least 1");
        }
        Ok(DetailedOptions {
            columns: self.columns,
            header_rows: self.header_rows,
            data_rows: self.data_rows,
            label_column: self.label_column,
            widths: NumericTolerance {
                standard_width: self.standard_width,
                tolerance: self.width_tolerance,
            },
            ..DetailedOptions::default()
        })
    }
}

fn parse_row_span(s: &str) -> std::result::Result<RowSpan, String> {
    let (first, last) = s.split_once(':').unwrap_or((s, s));
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .ok()
            .filter(|row| *row >= 1)
            .ok_or_else(|| format!("invalid row number '{}'", part))
    };
    Ok(RowSpan::new(parse(first)?, parse(last)?))
}

pub fn run(args: &DetailedArgs) -> Result<ExitCode> {
    let options = args.detailed_options()?;
    let analysis = detailed_files(&args.original, &args.generated, &options)
        .context("detailed analysis aborted")?;

    let stdout = io::stdout();
    let mut handle = BufWriter::new(stdout.lock());
    match args.format {
        OutputFormat::Text => text::write_detailed_report(&mut handle, &analysis, &options)?,
        OutputFormat::Json => json::write_detailed_report(&mut handle, &analysis)?,
    }
    handle.flush()?;

    if args.fail_on_diff && analysis.has_findings() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: DetailedArgs,
    }

    #[test]
    fn test_defaults_match_library_defaults() {
        let args = Harness::parse_from(["test"]).args;
        assert_eq!(args.detailed_options().unwrap(), DetailedOptions::default());
    }

    #[test]
    fn test_row_spans() {
        assert_eq!(parse_row_span("1:4"), Ok(RowSpan::new(1, 4)));
        assert_eq!(parse_row_span("6"), Ok(RowSpan::new(6, 6)));
        assert_eq!(parse_row_span("7:5"), Ok(RowSpan::new(5, 7)));
        assert!(parse_row_span("0:3").is_err());
        assert!(parse_row_span("a:b").is_err());
    }

    #[test]
    fn test_zero_columns_rejected() {
        let args = Harness::parse_from(["test", "--columns", "0"]).args;
        assert!(args.detailed_options().is_err());
    }
}
