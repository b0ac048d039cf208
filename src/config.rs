use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::dataset::Scenario;

/// Config file looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "ocr-dashboard.json";

/// Where the four input tables live.
///
/// ```json
/// { "data_dir": "./data", "forecast_base": "predictions_base.parquet" }
/// ```
///
/// Every field is optional; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub historic: String,
    pub forecast_base: String,
    pub forecast_sticky: String,
    pub forecast_downturn: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            historic: "historic_output.csv".into(),
            forecast_base: "predictions_base.csv".into(),
            forecast_sticky: "predictions_sticky.csv".into(),
            forecast_downturn: "predictions_downturn.csv".into(),
        }
    }
}

impl DashboardConfig {
    /// Read the config at `path`, or fall back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using default data locations", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Using config {} (data dir {})", path.display(), config.data_dir.display());
        Ok(config)
    }

    /// Same file names, different directory.
    pub fn with_data_dir(&self, dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            ..self.clone()
        }
    }

    pub fn path_for(&self, scenario: Scenario) -> PathBuf {
        let file = match scenario {
            Scenario::Historic => &self.historic,
            Scenario::Baseline => &self.forecast_base,
            Scenario::StickyInflation => &self.forecast_sticky,
            Scenario::Downturn => &self.forecast_downturn,
        };
        self.data_dir.join(file)
    }
}
