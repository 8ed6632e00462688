//! Engine configuration.
//!
//! Everything that would otherwise be a hidden constant (the source option
//! set, the review threshold, the number of sample rows sent to the mapping
//! service) is passed in through [`ImportConfig`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use roster_map::ConfidenceThreshold;
use roster_model::SourceSoftware;
use roster_service::DEFAULT_SAMPLE_ROWS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "roster-import";
const APP_NAME: &str = "Roster Import";
const CONFIG_FILENAME: &str = "config.toml";

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The config parsed but breaks a constraint.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One entry of the closed set of source software choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOption {
    /// Id sent to the mapping service as the source hint.
    pub id: String,
    /// Display label.
    pub label: String,
}

impl SourceOption {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// Where the mapping service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Mapping suggestion endpoint URL.
    pub endpoint: Option<String>,
    /// Request timeout applied by the host (the engine itself never times out).
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 60,
        }
    }
}

/// Configuration for an import engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Source software choices, including `auto`.
    pub source_options: Vec<SourceOption>,
    /// Confidence at or above which a suggestion counts as verified.
    pub review_threshold: ConfidenceThreshold,
    /// Leading rows sent to the mapping service.
    pub sample_rows: usize,
    pub service: ServiceConfig,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_options: vec![
                SourceOption::new(SourceSoftware::AUTO, "Detect automatically"),
                SourceOption::new("my_music_staff", "My Music Staff"),
                SourceOption::new("teachworks", "Teachworks"),
                SourceOption::new("jackrabbit", "Jackrabbit Music"),
                SourceOption::new("opus1", "Opus1"),
                SourceOption::new("duet_partner", "Duet Partner"),
                SourceOption::new("spreadsheet", "Other spreadsheet"),
            ],
            review_threshold: ConfidenceThreshold::default(),
            sample_rows: DEFAULT_SAMPLE_ROWS,
            service: ServiceConfig::default(),
        }
    }
}

impl ImportConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads a config file, falling back to defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::info!("No config file found at {:?}, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Checks threshold range, sample size, and the option set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if ConfidenceThreshold::new(self.review_threshold.value()).is_none() {
            return Err(ConfigError::Invalid(format!(
                "review_threshold must be between 0 and 1, got {}",
                self.review_threshold.value()
            )));
        }
        if self.sample_rows == 0 {
            return Err(ConfigError::Invalid(
                "sample_rows must be at least 1".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for option in &self.source_options {
            if !seen.insert(option.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate source option '{}'",
                    option.id
                )));
            }
        }
        if !seen.contains(SourceSoftware::AUTO) {
            return Err(ConfigError::Invalid(format!(
                "source_options must include '{}'",
                SourceSoftware::AUTO
            )));
        }
        Ok(())
    }

    /// Get the option with the given id.
    pub fn source_option(&self, id: &str) -> Option<&SourceOption> {
        self.source_options.iter().find(|o| o.id == id)
    }
}

/// Get the path to the default config file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}
