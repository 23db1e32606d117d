//! Verifier command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use tracing::{debug, info};

use journey::core::verify::verify_all;
use journey::io::config::{CONFIG_FILE, load_config};
use journey::io::dataset_store::load_dataset_source;

use crate::report::VerifyReport;

/// Inputs resolved from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub config: Option<PathBuf>,
    pub dataset: Option<PathBuf>,
    pub max_failures: Option<usize>,
}

/// Load the dataset, sweep every assignment, and build the report.
///
/// Flags override `journey.toml`; without either the bundled dataset is used.
pub fn run_verify(opts: &VerifyOptions) -> Result<VerifyReport> {
    let config_path = opts
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new(CONFIG_FILE));
    let cfg = load_config(config_path).context("load config")?;
    let max_failures = opts.max_failures.unwrap_or(cfg.verify.max_failures);
    if max_failures == 0 {
        bail!("--max-failures must be > 0");
    }
    let dataset_path = opts.dataset.clone().or(cfg.dataset);
    debug!(dataset = ?dataset_path, max_failures, "dataset resolved");

    let source = load_dataset_source(dataset_path.as_deref())?;
    let dataset = &source.dataset;
    info!(
        dataset = %source.label,
        choices = dataset.choices.len(),
        expected = ?dataset.journey_count(),
        "starting sweep"
    );
    let summary = verify_all(dataset, max_failures).map_err(|err| anyhow!(err))?;
    info!(
        passed = summary.passed,
        failed = summary.failed,
        "sweep complete"
    );

    Ok(VerifyReport::new(
        source.label.clone(),
        source.raw.as_bytes(),
        dataset.choices.len(),
        summary,
        Utc::now(),
    ))
}
