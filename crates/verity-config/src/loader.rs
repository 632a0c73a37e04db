//! Configuration Loader
//!
//! Handles loading configuration from `verity.toml` and applying environment overrides.

use crate::project::{OutputFormat, ProjectConfig, TestSettings};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "verity.toml";

/// Configuration loader
///
/// Loads configuration and merges it with proper precedence:
/// 1. Project config (./verity.toml) - lowest priority
/// 2. Environment variables (VERITY_*) - overrides project
/// 3. CLI flags - highest priority (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader;

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project configuration, with environment overrides applied
    pub project: ProjectConfig,

    /// Project root directory (where verity.toml was found)
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find verity.toml. A missing file is not
    /// an error: defaults apply.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    ///
    /// Returns (project_root, project_config)
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.is_file() {
                debug!(path = %config_path.display(), "loading project config");
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    debug!(start = %start_dir.display(), "no {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok((None, ProjectConfig::default()));
                }
            }
        }
    }

    /// Apply environment variable overrides to project config
    ///
    /// - `VERITY_FORMAT=pretty|json`
    /// - `VERITY_PARALLEL=true|false`
    /// - `VERITY_THREADS=<n>`
    /// - `VERITY_VERBOSE=true|false`
    /// - `NO_COLOR` (any value) disables color
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if let Ok(format) = env::var("VERITY_FORMAT") {
            let format = format
                .parse::<OutputFormat>()
                .map_err(|e| match e {
                    ConfigError::InvalidValue { reason, .. } => ConfigError::InvalidValue {
                        field: "VERITY_FORMAT".to_string(),
                        reason,
                    },
                    other => other,
                })?;
            config.test_mut().format = Some(format);
        }

        if let Ok(parallel) = env::var("VERITY_PARALLEL") {
            config.test_mut().parallel = Some(parse_bool(&parallel));
        }

        if let Ok(threads) = env::var("VERITY_THREADS") {
            let threads = threads
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "VERITY_THREADS".to_string(),
                    reason: e.to_string(),
                })?;
            config.test_mut().threads = Some(threads);
        }

        if let Ok(verbose) = env::var("VERITY_VERBOSE") {
            config.test_mut().verbose = Some(parse_bool(&verbose));
        }

        if env::var_os("NO_COLOR").is_some() {
            config.test_mut().color = Some(false);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

impl Config {
    /// Effective settings before CLI flags
    pub fn settings(&self) -> TestSettings {
        self.project.settings()
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if this is a project (has verity.toml)
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
