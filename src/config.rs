//! YAML configuration for the matching pipeline.
//!
//! One file carries both stages so an offline replay can be run with exactly
//! the settings a deployment uses:
//!
//! ```yaml
//! version: "1.0"
//! name: "finals night"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: false
//!   min_run: 3
//!   confusables:
//!     - { from: "@d", to: "q" }
//!     - { from: "0", to: "o" }
//!     - { from: "1il7", to: "l" }
//!     - { from: "5", to: "s" }
//!   lookalikes: [["8", "b"], ["0", "o"], ["1", "l"]]
//!
//! matcher:
//!   match_threshold: 0.75
//!   hold_misses: 5
//!   min_token_len: 3
//!   max_token_len: 25
//!   anchor_filter: true
//! ```

use std::fs;
use std::path::Path;

use canonical::CanonicalizeConfig;
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalizeConfig,

    #[serde(default)]
    pub matcher: MatchConfig,
}

impl PipelineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalizeConfig::default(),
            matcher: MatchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
canonical:
  normalize_unicode: true
matcher:
  hold_misses: 3
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("test config"));
        assert!(config.canonical.normalize_unicode);
        assert_eq!(config.canonical.min_run, 3);
        assert_eq!(config.matcher.hold_misses, 3);
        assert_eq!(config.matcher.match_threshold, 0.75);
    }

    #[test]
    fn test_load_from_file() {
        let yaml = "version: \"1.0\"\n";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = PipelineConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_custom_confusables() {
        let yaml = r#"
version: "1"
canonical:
  confusables:
    - { from: "8", to: "b" }
"#;
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.canonical.confusables.len(), 1);
        assert_eq!(config.canonical.confusables[0].to, 'b');
    }

    #[test]
    fn test_unsupported_version() {
        let err = PipelineConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn test_matcher_validation() {
        let yaml = r#"
version: "1.0"
matcher:
  match_threshold: 0
"#;
        let err = PipelineConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }

    #[test]
    fn test_canonical_validation() {
        let yaml = r#"
version: "1.0"
canonical:
  min_run: 1
"#;
        let err = PipelineConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }
}
