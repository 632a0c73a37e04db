//! Project Configuration (verity.toml)
//!
//! Handles project-level configuration stored in `verity.toml` at the project root.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Project configuration from verity.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Test run configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<TestConfig>,
}

/// `[test]` section
///
/// Every field is optional; unset fields fall back to [`TestSettings::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    /// Run test cases in parallel (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// Worker threads for parallel runs (default: one per CPU)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Print one line per test case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Colorize output (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Report format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Default name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Default scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Report output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue {
                field: "test.format".to_string(),
                reason: format!("unknown format '{}' (expected 'pretty' or 'json')", other),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => f.write_str("pretty"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Effective test run settings after defaults are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSettings {
    pub parallel: bool,
    pub threads: Option<usize>,
    pub verbose: bool,
    pub color: bool,
    pub format: OutputFormat,
    pub filter: Option<String>,
    pub scope: Option<String>,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            verbose: false,
            color: true,
            format: OutputFormat::Pretty,
            filter: None,
            scope: None,
        }
    }
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(test) = &self.test {
            if test.threads == Some(0) {
                return Err(ConfigError::InvalidValue {
                    field: "test.threads".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            if test.scope.as_deref().is_some_and(|s| s.ends_with("::")) {
                return Err(ConfigError::InvalidValue {
                    field: "test.scope".to_string(),
                    reason: "scope cannot end with '::'".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The `[test]` section, created empty if missing
    pub fn test_mut(&mut self) -> &mut TestConfig {
        self.test.get_or_insert_with(TestConfig::default)
    }

    /// Resolve the `[test]` section against the defaults
    pub fn settings(&self) -> TestSettings {
        let defaults = TestSettings::default();
        let Some(test) = &self.test else {
            return defaults;
        };
        TestSettings {
            parallel: test.parallel.unwrap_or(defaults.parallel),
            threads: test.threads.or(defaults.threads),
            verbose: test.verbose.unwrap_or(defaults.verbose),
            color: test.color.unwrap_or(defaults.color),
            format: test.format.unwrap_or(defaults.format),
            filter: test.filter.clone(),
            scope: test.scope.clone(),
        }
    }
}
