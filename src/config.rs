use crate::defaults;
use crate::error::{Result, SnipError};
use crate::trim::PredictionPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub trim: TrimConfig,
    pub report: ReportConfig,
}

/// Defaults for the trim window and prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TrimConfig {
    /// Leading duration to cut when `--start` is not given (e.g. "2s").
    pub start: Option<String>,
    /// Trailing duration to cut when `--end` is not given.
    pub end: Option<String>,
    pub prediction: PredictionPolicy,
}

/// Summary report configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown report format '{}' (expected text or json)",
                other
            )),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| SnipError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if it doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - MP3SNIP_PREDICTION → trim.prediction
    /// - MP3SNIP_REPORT_FORMAT → report.format
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(value) = std::env::var(defaults::ENV_PREDICTION)
            && !value.is_empty()
        {
            self.trim.prediction =
                value
                    .parse()
                    .map_err(|message| SnipError::ConfigInvalidValue {
                        key: defaults::ENV_PREDICTION.to_string(),
                        message,
                    })?;
        }

        if let Ok(value) = std::env::var(defaults::ENV_REPORT_FORMAT)
            && !value.is_empty()
        {
            self.report.format =
                value
                    .parse()
                    .map_err(|message| SnipError::ConfigInvalidValue {
                        key: defaults::ENV_REPORT_FORMAT.to_string(),
                        message,
                    })?;
        }

        Ok(self)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SnipError::Other(e.to_string()))
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/mp3snip/config.toml on Linux, or `None` when the
    /// platform has no config directory.
    #[cfg(feature = "cli")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(defaults::APP_NAME).join("config.toml"))
    }
}

/// Resolve which config file to read: an explicit path wins over the default.
#[cfg(feature = "cli")]
pub fn config_path(custom: Option<&Path>) -> Option<PathBuf> {
    custom.map(Path::to_path_buf).or_else(Config::default_path)
}
