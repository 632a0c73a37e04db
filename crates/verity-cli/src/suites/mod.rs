//! Built-in test suites
//!
//! Every suite registers its cases under its own scope; `discover` collects
//! them into one [`TestSuite`].

use verity_core::{SuiteError, TestSuite};

pub mod app;
pub mod frontend;

/// Register every built-in suite
pub fn discover() -> Result<TestSuite, SuiteError> {
    let mut suite = TestSuite::new();
    app::register(&mut suite)?;
    frontend::register(&mut suite)?;
    Ok(suite)
}
