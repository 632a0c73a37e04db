//! Verity Configuration System
//!
//! Provides configuration for test runs:
//! - Project configuration (`verity.toml`, `[test]` section)
//! - Environment variable overrides (`VERITY_*`, `NO_COLOR`)
//! - Resolution into the effective [`TestSettings`]
//!
//! # Configuration Hierarchy
//!
//! Configuration is merged in the following order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Project config (`./verity.toml`, searched upwards)
//! 3. Environment variables (`VERITY_*`)
//! 4. CLI flags (applied by the caller)
//!
//! # Example
//!
//! ```no_run
//! use verity_config::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::new().load_from_directory(Path::new(".")).unwrap();
//! let settings = config.settings();
//! println!("parallel: {}", settings.parallel);
//! ```

pub mod loader;
pub mod project;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use loader::{Config, ConfigLoader, CONFIG_FILE_NAME};
pub use project::{OutputFormat, ProjectConfig, TestConfig, TestSettings};
