//! Exhaustive journey verifier.
//!
//! Enumerates every combination of choices in the dataset, checks that each
//! path touches every segment, prints a report, and exits non-zero when any
//! journey is malformed.

mod cli;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use journey::exit_codes;
use journey::logging;

use crate::cli::{VerifyOptions, run_verify};
use crate::report::render_text;

#[derive(Parser)]
#[command(
    name = "verify-paths",
    version,
    about = "Verify every journey through the dataset"
)]
struct Cli {
    /// Config file (defaults to `journey.toml` in the working directory).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dataset JSON (defaults to config `dataset`, then the bundled dataset).
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Number of failing signatures to list.
    #[arg(long)]
    max_failures: Option<usize>,
    /// Emit the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => std::process::exit(exit_codes::OK),
        Ok(false) => std::process::exit(exit_codes::PATHS_FAILED),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

/// Run the sweep and print the report; returns whether every journey passed.
fn run(cli: &Cli) -> Result<bool> {
    let opts = VerifyOptions {
        config: cli.config.clone(),
        dataset: cli.dataset.clone(),
        max_failures: cli.max_failures,
    };
    let report = run_verify(&opts)?;
    if cli.json {
        let mut payload = serde_json::to_string_pretty(&report).context("serialize report")?;
        payload.push('\n');
        print!("{payload}");
    } else {
        print!("{}", render_text(&report));
    }
    Ok(report.is_success())
}
