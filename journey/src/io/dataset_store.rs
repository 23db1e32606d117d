//! Dataset loading with schema + invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::Draft;
use serde_json::Value;
use tracing::debug;

use crate::core::invariants::validate_invariants;
use crate::dataset::Dataset;

/// JSON Schema for dataset files (Draft 2020-12).
pub const V1_SCHEMA: &str = include_str!("../../../schemas/journey/v1.schema.json");

/// Dataset shipped with the binaries.
pub const BUNDLED_DATASET: &str = include_str!("../../../data/journey.json");

/// A validated dataset together with the text it was parsed from.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    /// `bundled` or the dataset path.
    pub label: String,
    pub raw: String,
    pub dataset: Dataset,
}

/// Read `path` when given, the bundled dataset otherwise, and validate it.
pub fn load_dataset_source(path: Option<&Path>) -> Result<DatasetSource> {
    let (label, raw) = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading dataset");
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read dataset {}", path.display()))?;
            (path.display().to_string(), raw)
        }
        None => ("bundled".to_string(), BUNDLED_DATASET.to_string()),
    };
    let dataset = parse_dataset(&raw).with_context(|| format!("load dataset {label}"))?;
    Ok(DatasetSource {
        label,
        raw,
        dataset,
    })
}

/// Parse and validate the bundled dataset.
pub fn bundled_dataset() -> Result<Dataset> {
    load_dataset_or_bundled(None)
}

/// Load and validate a dataset from disk (schema + invariants).
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    load_dataset_or_bundled(Some(path))
}

/// Load `path` when given, the bundled dataset otherwise.
pub fn load_dataset_or_bundled(path: Option<&Path>) -> Result<Dataset> {
    load_dataset_source(path).map(|source| source.dataset)
}

/// Parse raw JSON, then validate schema conformance and semantic invariants.
pub fn parse_dataset(raw: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(raw).context("parse dataset json")?;
    validate_schema(&value)?;
    let dataset: Dataset = serde_json::from_value(value).context("deserialize dataset")?;
    let errors = validate_invariants(&dataset);
    if !errors.is_empty() {
        return Err(anyhow!(
            "dataset invariants failed:\n- {}",
            errors.join("\n- ")
        ));
    }
    debug!(
        entries = dataset.entries.len(),
        choices = dataset.choices.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(V1_SCHEMA).context("parse dataset schema")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .context("compile dataset schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        return Err(anyhow!(
            "dataset schema validation failed:\n- {}",
            messages.join("\n- ")
        ));
    }
    Ok(())
}
