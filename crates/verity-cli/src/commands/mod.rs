pub mod list;
pub mod test;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use verity_config::{ConfigLoader, TestSettings};
use verity_core::TestSuite;

/// Load `verity.toml` (searched upwards from `dir`) plus environment overrides
fn load_settings(dir: &Path) -> Result<TestSettings> {
    let config = ConfigLoader::new()
        .load_from_directory(dir)
        .with_context(|| format!("failed to load configuration from {}", dir.display()))?;
    match config.project_root() {
        Some(root) => debug!(root = %root.display(), "using project configuration"),
        None => debug!("no verity.toml found, using defaults"),
    }
    Ok(config.settings())
}

/// Discover the built-in suites and narrow them to `scope` and `pattern`
fn select(scope: Option<&str>, pattern: Option<&str>) -> Result<TestSuite> {
    let mut suite = crate::suites::discover().context("failed to register test suites")?;
    if let Some(scope) = scope {
        suite = suite.in_scope(scope);
    }
    if let Some(pattern) = pattern {
        suite = suite.filter(pattern);
    }
    Ok(suite)
}
