//! Observer configuration.
//!
//! Mirrors the observer YAML file shipped next to the simulation config.
//! Every field has a default, so an empty document yields a working setup.
//!
//! Environment variables override YAML values:
//! - `EMERGENCE_LOG_LEVEL` overrides `logging.level`

use std::path::Path;

use serde::Deserialize;

use crate::severity::SeveritySet;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level observer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Timeline engine settings.
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ObserverConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.logging.apply_env_overrides();
        Ok(config)
    }
}

/// Timeline engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineConfig {
    /// Maximum number of events retained in memory; oldest are dropped first.
    #[serde(default = "default_max_events")]
    pub max_events: usize,

    /// Severities enabled when a session starts.
    #[serde(default = "SeveritySet::all")]
    pub default_severities: SeveritySet,

    /// Whether new sessions follow the newest tick group.
    #[serde(default = "default_auto_follow")]
    pub auto_follow: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_events: default_max_events(),
            default_severities: SeveritySet::all(),
            auto_follow: default_auto_follow(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("EMERGENCE_LOG_LEVEL")
            && !val.is_empty()
        {
            self.level = val;
        }
    }
}

const fn default_max_events() -> usize {
    5000
}

const fn default_auto_follow() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    #[test]
    fn default_config_is_valid() {
        let config = ObserverConfig::default();
        assert_eq!(config.timeline.max_events, 5000);
        assert!(config.timeline.auto_follow);
        assert_eq!(config.timeline.default_severities, SeveritySet::all());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_partial_yaml_fills_defaults() {
        let yaml = r"
timeline:
  max_events: 250
  default_severities:
    - critical
    - warning
";
        let config = ObserverConfig::parse(yaml);
        assert!(config.is_ok());
        let Ok(config) = config else { return };
        assert_eq!(config.timeline.max_events, 250);
        assert!(config.timeline.auto_follow);
        assert!(config.timeline.default_severities.contains(Severity::Critical));
        assert!(!config.timeline.default_severities.contains(Severity::Routine));
    }

    #[test]
    fn empty_document_is_default() {
        let config = ObserverConfig::parse("");
        assert!(config.is_ok_and(|c| c.timeline == TimelineConfig::default()));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = ObserverConfig::parse("timeline: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = ObserverConfig::from_file(Path::new("/nonexistent/observer.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
