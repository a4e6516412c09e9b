//! Dashboard configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MONARCH_DASH_CONFIG";

/// Config file looked up in the working directory when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "monarch-dash.json";

/// Start-up settings.  Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Sightings file opened at start-up.
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Directory holding the pre-rendered gallery images.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Number of bars in the top towns chart.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Number of region panels in the per-state grid.
    #[serde(default = "default_panel_count")]
    pub panel_count: usize,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_top_n() -> usize {
    10
}

fn default_panel_count() -> usize {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            assets_dir: default_assets_dir(),
            top_n: default_top_n(),
            panel_count: default_panel_count(),
        }
    }
}

impl DashboardConfig {
    /// Load from `$MONARCH_DASH_CONFIG`, else `./monarch-dash.json`, else
    /// defaults.  A file named by the environment variable must exist.
    pub fn discover() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }
        log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.panel_count == 0 {
            bail!("panel_count must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        assert_eq!(
            DashboardConfig::from_json("{}").unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn overrides() {
        let config = DashboardConfig::from_json(
            r#"{"data_path": "sightings.csv", "top_n": 5, "assets_dir": "img"}"#,
        )
        .unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("sightings.csv")));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.assets_dir, PathBuf::from("img"));
        assert_eq!(config.panel_count, 10);
    }

    #[test]
    fn rejects_zero_panels() {
        assert!(DashboardConfig::from_json(r#"{"panel_count": 0}"#).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DashboardConfig::from_json("{top_n: 5").is_err());
    }
}
