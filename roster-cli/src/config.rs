//! Configuration
//!
//! Settings live in a TOML file under the user config directory, with
//! compiled-in defaults matching the original data layout. CLI flags
//! override individual fields.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Baseline headcount the quality check validates against.
const DEFAULT_EXPECTED_TOTAL: usize = 177;
/// Category whose role breakdown is reported separately.
const DEFAULT_FOCUS_CATEGORY: &str = "REPSAM";
/// Period label stamped onto leave records.
const DEFAULT_LEAVE_PERIOD: &str = "ARALIK 2025";

/// Paths or URLs of the four source workbooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub inventory: String,
    pub process: String,
    pub leave: String,
    pub departures: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            inventory: "data/inventory.xlsx".into(),
            process: "data/process.xlsx".into(),
            leave: "data/leaves_2025_12.xlsx".into(),
            departures: "data/departures_2025.xlsx".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: Sources,
    /// Override database location; `None` resolves under the data dir
    pub db_path: Option<PathBuf>,
    pub expected_total: usize,
    pub focus_category: String,
    pub leave_period: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Sources::default(),
            db_path: None,
            expected_total: DEFAULT_EXPECTED_TOTAL,
            focus_category: DEFAULT_FOCUS_CATEGORY.into(),
            leave_period: DEFAULT_LEAVE_PERIOD.into(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        match Self::config_file() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                let config: Config = toml::from_str(&raw)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?;
                log::debug!("config loaded from {}", path.display());
                Ok(config)
            }
            _ => Ok(Self::default()),
        }
    }

    fn config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("roster-cli").join("config.toml"))
    }

    /// Resolved override-database path.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("roster-cli")
                .join("overrides.db")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.expected_total, 177);
        assert_eq!(config.focus_category, "REPSAM");
        assert!(config.sources.inventory.ends_with("inventory.xlsx"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            expected_total = 150

            [sources]
            process = "https://example.test/process.xlsx"
            "#,
        )
        .unwrap();
        assert_eq!(config.expected_total, 150);
        assert_eq!(config.sources.process, "https://example.test/process.xlsx");
        // Unset fields keep their defaults
        assert_eq!(config.sources.inventory, "data/inventory.xlsx");
        assert_eq!(config.focus_category, "REPSAM");
    }
}
