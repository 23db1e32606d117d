//! Journey configuration stored in `journey.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "journey.toml";

/// Journey configuration (TOML).
///
/// Missing fields default to the bundled dataset and the standard report
/// size.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JourneyConfig {
    /// Dataset JSON to load instead of the bundled one.
    pub dataset: Option<PathBuf>,

    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifyConfig {
    /// Number of failing signatures listed in the report.
    pub max_failures: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { max_failures: 10 }
    }
}

impl JourneyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.verify.max_failures == 0 {
            return Err(anyhow!("verify.max_failures must be > 0"));
        }
        if let Some(dataset) = &self.dataset
            && dataset.as_os_str().is_empty()
        {
            return Err(anyhow!("dataset must be a non-empty path"));
        }
        Ok(())
    }

    /// Resolve a relative `dataset` path against the config file's directory.
    fn resolve_relative_to(mut self, base: &Path) -> Self {
        if let Some(dataset) = &self.dataset
            && dataset.is_relative()
        {
            self.dataset = Some(base.join(dataset));
        }
        self
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `JourneyConfig::default()`.
pub fn load_config(path: &Path) -> Result<JourneyConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = JourneyConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: JourneyConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(cfg.resolve_relative_to(base))
}
