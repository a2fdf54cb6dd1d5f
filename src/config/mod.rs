//! Generator configuration.
//!
//! Settings that shape the generated rules live in an optional TOML file
//! passed with `--config`. Every field has a default, so an empty file (or no
//! file at all) is valid.
//!
//! # Example
//!
//! ```toml
//! resource_union = true
//! rule_file_name = "BUCK"
//! processor_rule_file = ".rulegen/processors/BUCK"
//! processor_configurations = ["annotationProcessor", "kapt"]
//! fail_on_empty_processors = true
//!
//! [marker]
//! group = "com.google.auto.value"
//! name_prefix = "auto-value"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::annotation::MarkerCoordinate;
use crate::core::RulegenError;

/// Default name of per-target build files.
pub const DEFAULT_RULE_FILE_NAME: &str = "BUCK";

/// Default location of the shared processor build file, relative to the root.
pub const DEFAULT_PROCESSOR_RULE_FILE: &str = ".rulegen/processors/BUCK";

/// Default processor configuration name.
pub const DEFAULT_PROCESSOR_CONFIGURATION: &str = "annotationProcessor";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Merge resources of dependencies into each `android_resource` rule.
    pub resource_union: bool,

    /// Path of the shared processor build file, relative to the output root.
    pub processor_rule_file: PathBuf,

    /// File name of per-target build files.
    pub rule_file_name: String,

    /// Target configurations that hold annotation processors.
    pub processor_configurations: Vec<String>,

    /// Fail instead of warn when a processor dependency contributes no processors.
    pub fail_on_empty_processors: bool,

    /// Marker family folded into one combined processor scope.
    pub marker: MarkerCoordinate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            resource_union: false,
            processor_rule_file: PathBuf::from(DEFAULT_PROCESSOR_RULE_FILE),
            rule_file_name: DEFAULT_RULE_FILE_NAME.to_string(),
            processor_configurations: vec![DEFAULT_PROCESSOR_CONFIGURATION.to_string()],
            fail_on_empty_processors: false,
            marker: MarkerCoordinate::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration from an optional path, defaulting when none is given.
    ///
    /// An explicitly given path that does not exist is an error.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => Err(RulegenError::ConfigError {
                message: format!("Config file not found: {}", path.display()),
            }
            .into()),
            Some(path) => Self::load_from(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(RulegenError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Matcher for the configured marker family.
    pub fn marker(&self) -> MarkerCoordinate {
        self.marker.clone()
    }

    fn validate(&self) -> Result<(), RulegenError> {
        if self.rule_file_name.is_empty() || self.rule_file_name.contains('/') {
            return Err(RulegenError::ConfigError {
                message: format!("Invalid rule_file_name '{}'", self.rule_file_name),
            });
        }
        if self.processor_rule_file.as_os_str().is_empty()
            || self.processor_rule_file.is_absolute()
        {
            return Err(RulegenError::ConfigError {
                message: format!(
                    "processor_rule_file must be a relative path, got '{}'",
                    self.processor_rule_file.display()
                ),
            });
        }
        if self.marker.group.is_empty() {
            return Err(RulegenError::ConfigError {
                message: "marker.group must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::parse("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(!config.resource_union);
        assert_eq!(config.processor_configurations, ["annotationProcessor"]);
        assert_eq!(config.marker().group, "com.google.auto.value");
    }

    #[test]
    fn test_partial_override() {
        let config = GeneratorConfig::parse(
            r#"
resource_union = true

[marker]
group = "com.example.auto"
name_prefix = "auto-value"
"#,
        )
        .unwrap();
        assert!(config.resource_union);
        assert_eq!(config.rule_file_name, "BUCK");
        assert_eq!(config.marker, MarkerCoordinate::new("com.example.auto", "auto-value"));
    }

    #[test]
    fn test_partial_marker_table() {
        let config = GeneratorConfig::parse(
            r#"
[marker]
group = "com.example.auto"
"#,
        )
        .unwrap();
        assert_eq!(config.marker, MarkerCoordinate::new("com.example.auto", "auto-value"));

        let config = GeneratorConfig::parse("[marker]\nname_prefix = \"dagger\"").unwrap();
        assert_eq!(config.marker, MarkerCoordinate::new("com.google.auto.value", "dagger"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(GeneratorConfig::parse("rule_file_name = \"a/BUCK\"").is_err());
        assert!(GeneratorConfig::parse("processor_rule_file = \"/abs/BUCK\"").is_err());
        assert!(GeneratorConfig::parse("resource_union = \"yes\"").is_err());
    }

    #[tokio::test]
    async fn test_load_with_optional() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");

        let config = GeneratorConfig::load_with_optional(None).await.unwrap();
        assert_eq!(config, GeneratorConfig::default());

        assert!(GeneratorConfig::load_with_optional(Some(path.clone())).await.is_err());

        std::fs::write(&path, "fail_on_empty_processors = true\n").unwrap();
        let config = GeneratorConfig::load_with_optional(Some(path)).await.unwrap();
        assert!(config.fail_on_empty_processors);
    }
}
