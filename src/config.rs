//! Run configuration
//!
//! [`RunConfig`] holds the knobs that change how a program runs without
//! changing what it means. It can be built in code or loaded from a TOML file:
//!
//! ```toml
//! max_call_depth = 500
//! newline_after_value = true
//! log_level = "debug"
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default limit on nested calls, `main` included
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Calls nested deeper than this fail with `ResourceExhausted`
    pub max_call_depth: usize,
    /// Whether `print` follows a numeric value with a newline
    pub newline_after_value: bool,
    /// Filter for the command-line tool's log output
    pub log_level: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            newline_after_value: true,
            log_level: "warn".to_string(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_newline_after_value(mut self, newline: bool) -> Self {
        self.newline_after_value = newline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.max_call_depth, 1000);
        assert!(config.newline_after_value);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RunConfig::from_toml_str("max_call_depth = 64").unwrap();
        assert_eq!(config.max_call_depth, 64);
        assert!(config.newline_after_value);
    }

    #[test]
    fn test_full_toml() {
        let config = RunConfig::from_toml_str(
            "max_call_depth = 10\nnewline_after_value = false\nlog_level = \"trace\"\n",
        )
        .unwrap();
        assert_eq!(
            config,
            RunConfig {
                max_call_depth: 10,
                newline_after_value: false,
                log_level: "trace".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RunConfig::from_toml_str("max_depth = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RunConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
