//! Dashboard configuration

use config::{Config, ConfigError, Environment, File};
use risk_features::InputRanges;
use risk_inference::ModelPaths;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::Level;

/// Default config file stem (`dashboard.toml`, `dashboard.yaml`, ...)
pub const DEFAULT_CONFIG_FILE: &str = "dashboard";

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Address the API server binds to
    pub bind_addr: String,

    /// Max log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit JSON log lines instead of plain text
    pub log_json: bool,

    /// Model artifact paths; unset entries use the built-in models
    pub models: ModelPaths,

    /// Accepted input ranges
    pub ranges: InputRanges,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            models: ModelPaths::default(),
            ranges: InputRanges::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from a config file and `DASHBOARD__*` environment variables.
    ///
    /// An explicit `path` must exist; without one, `dashboard.*` in the
    /// working directory is read if present.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("DASHBOARD").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Parsed log level, INFO if unrecognised
    pub fn level(&self) -> Level {
        Level::from_str(self.log_level.trim()).unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.level(), Level::INFO);
        assert!(config.models.heart.is_none());
    }

    #[test]
    fn test_level_parsing() {
        let config = DashboardConfig {
            log_level: "DEBUG".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level(), Level::DEBUG);

        let config = DashboardConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
bind_addr = "127.0.0.1:9000"
log_level = "warn"

[models]
heart = "/opt/models/heart.json"

[ranges]
bmi = [5.0, 80.0]
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = DashboardConfig::load(Some(&path)).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.level(), Level::WARN);
        assert_eq!(
            config.models.heart.as_deref(),
            Some(std::path::Path::new("/opt/models/heart.json"))
        );
        assert!(config.models.diabetes.is_none());
        assert_eq!(config.ranges.bmi, (5.0, 80.0));
        assert_eq!(config.ranges.glucose, InputRanges::default().glucose);
    }

    #[test]
    fn test_missing_explicit_file() {
        assert!(DashboardConfig::load(Some("/nonexistent/dashboard.toml")).is_err());
    }
}
