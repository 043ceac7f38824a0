#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line driver for the address line parser.
//!
//! Parses a single address, batch-parses a CSV file into a CSV report, or
//! validates a reference data file. With no subcommand it drops into an
//! interactive prompt.
//!
//! Uses `indicatif-log-bridge` (via [`addr_line_cli_utils::init_logger`])
//! so batch progress bars and log lines never fight for the terminal.

mod batch;
mod interactive;

use std::path::PathBuf;
use std::time::Instant;

use addr_line_cli_utils::IndicatifProgress;
use addr_line_parser::Parser as AddressParser;
use addr_line_reference::{REFERENCE_PATH_ENV, ReferenceData};
use clap::{Parser, Subcommand};

use crate::batch::BatchOptions;

#[derive(Parser)]
#[command(name = "addr_line", about = "Parse and standardize US street address lines")]
struct Cli {
    /// Reference data TOML file (overrides the `ADDR_LINE_REFERENCE` env var
    /// and the built-in tables)
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single address line and print its components as JSON
    Parse {
        /// Address line (e.g., "1234 N Market St Apt 2")
        address: String,
        /// Print only the standardized address
        #[arg(long)]
        full_only: bool,
    },
    /// Parse every row of a CSV file and write a CSV report
    Batch {
        /// Input CSV file
        input: PathBuf,
        /// Output CSV file (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Name of the column holding the address (defaults to the first column)
        #[arg(long)]
        column: Option<String>,
        /// Treat the first row as data rather than a header
        #[arg(long)]
        no_headers: bool,
    },
    /// Check reference data for overlapping or unmapped forms
    CheckReference,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = addr_line_cli_utils::init_logger();
    let cli = Cli::parse();

    let reference = ReferenceData::load(cli.reference.as_deref())?;
    let parser = AddressParser::new(reference);

    let Some(command) = cli.command else {
        return interactive::run(&parser);
    };

    match command {
        Commands::Parse { address, full_only } => {
            let parsed = parser.parse(&address)?;
            if full_only {
                println!("{}", parsed.full_addr);
            } else {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            }
        }
        Commands::Batch {
            input,
            output,
            column,
            no_headers,
        } => {
            let start = Instant::now();
            let progress = IndicatifProgress::rows_bar(&multi, "Parsing");

            let summary = batch::run(
                &parser,
                BatchOptions {
                    input: &input,
                    output: output.as_deref(),
                    column: column.as_deref(),
                    has_headers: !no_headers,
                },
                progress.as_ref(),
            )?;

            progress.finish(format!("{} rows", summary.total()));
            log::info!(
                "Parsed {} of {} rows ({} failed) in {:.2}s",
                summary.parsed,
                summary.total(),
                summary.failed,
                start.elapsed().as_secs_f64(),
            );
        }
        Commands::CheckReference => {
            let source = cli.reference.as_ref().map_or_else(
                || {
                    std::env::var(REFERENCE_PATH_ENV)
                        .unwrap_or_else(|_| "built-in reference data".to_string())
                },
                |path| path.display().to_string(),
            );
            let issues = parser.reference().issues();
            if issues.is_empty() {
                println!("{source}: OK");
            } else {
                for issue in &issues {
                    println!("{source}: {issue}");
                }
                parser.reference().validate()?;
            }
        }
    }

    Ok(())
}
