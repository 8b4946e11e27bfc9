use crate::output::text;
use anyhow::Result;
use clap::Args;
use sheet_parity::prelude::*;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Workbooks to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Rows shown per sheet
    #[arg(long, value_name = "N", default_value_t = 30)]
    pub rows: u32,

    /// Columns shown per row
    #[arg(long, value_name = "N", default_value_t = 14)]
    pub columns: u16,

    /// Characters kept from each rendered cell
    #[arg(long, value_name = "N", default_value_t = 40)]
    pub cell_chars: usize,
}

/// Every file is attempted; the run fails if any of them could not be read
pub fn run(args: &InspectArgs) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut handle = BufWriter::new(stdout.lock());
    let layout = text::InspectLayout {
        rows: args.rows,
        columns: args.columns,
        cell_chars: args.cell_chars,
    };

    let mut failures = 0usize;
    for path in &args.files {
        match open_workbook(path) {
            Ok(workbook) => text::write_inspection(&mut handle, path, &workbook, &layout)?,
            Err(e) => {
                failures += 1;
                tracing::warn!(path = %path.display(), "inspection failed");
                writeln!(handle)?;
                writeln!(handle, "Error analyzing {}: {}", path.display(), e)?;
            }
        }
    }
    handle.flush()?;

    if failures > 0 {
        eprintln!("{} of {} files could not be read", failures, args.files.len());
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
