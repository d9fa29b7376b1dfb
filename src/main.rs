use clap::Parser;
use sheetloader::cli::{self, LoadOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sheetloader")]
#[command(about = "Flatten a spreadsheet into header-keyed JSON records for ingestion.")]
#[command(long_about = "Sheetloader - spreadsheet document loader

Reads every worksheet of a workbook. The first non-blank row of each
worksheet is its header; each later non-blank row becomes one compact JSON
object keyed by that header. Records are separated by a blank line.

SUPPORTED FORMATS:
  .xlsx .xlsm .xltx .xltm .xlam   (streamed cell by cell)
  .xls .xla .xlsb .ods            (read per worksheet)

EMPTY VALUES:
  By default any falsy value (empty cell, empty text, 0, false) is left out
  of a record. Use --keep-falsy to drop only truly empty cells.

EXAMPLES:
  sheetloader customers.xlsx
  sheetloader customers.xlsx --json -o customers.json
  RUST_LOG=sheetloader=debug sheetloader inventory.ods")]
#[command(version)]
struct Cli {
    /// Path to the workbook file
    file: PathBuf,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the document as JSON ({"page_content": ...})
    #[arg(long)]
    json: bool,

    /// Keep 0 and false values in records (only empty cells are dropped)
    #[arg(long, env = "SHEETLOADER_KEEP_FALSY")]
    keep_falsy: bool,

    /// Show progress and debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose {
        "sheetloader=debug"
    } else {
        "sheetloader=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::load(LoadOptions {
        input: args.file,
        output: args.output,
        json: args.json,
        keep_falsy: args.keep_falsy,
        verbose: args.verbose,
    })?;

    Ok(())
}
