use crate::commands::LimitArgs;
use crate::output::json;
use anyhow::{Context, Result};
use clap::Args;
use sheet_parity::prelude::*;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Workbook to snapshot
    pub input: PathBuf,

    #[command(flatten)]
    pub limits: LimitArgs,
}

pub fn run(args: &SnapshotArgs) -> Result<ExitCode> {
    let snapshot = snapshot_file(&args.input, &args.limits.to_limits())
        .context("snapshot aborted")?;

    let stdout = io::stdout();
    let mut handle = BufWriter::new(stdout.lock());
    json::write_json(&mut handle, &snapshot)?;
    handle.flush()?;
    Ok(ExitCode::SUCCESS)
}
