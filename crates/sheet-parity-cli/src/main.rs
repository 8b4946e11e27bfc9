//! sheet-parity CLI - check a generated workbook's formatting against a template

mod commands;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "sheet-parity")]
#[command(
    author,
    version,
    about = "Compare the formatting of a generated XLSX workbook against a template"
)]
struct Cli {
    /// Increase log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every sheet of two workbooks, pairing sheets by position
    Compare(commands::compare::CompareArgs),

    /// Strict analysis of the first sheet of each workbook
    Detailed(commands::detailed::DetailedArgs),

    /// Dump the layout and styling of one or more workbooks
    Inspect(commands::inspect::InspectArgs),

    /// Print the snapshot extracted from a workbook as JSON
    Snapshot(commands::snapshot::SnapshotArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::run(&args),
        Commands::Detailed(args) => commands::detailed::run(&args),
        Commands::Inspect(args) => commands::inspect::run(&args),
        Commands::Snapshot(args) => commands::snapshot::run(&args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
