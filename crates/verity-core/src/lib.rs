//! Verity core - assertion-based test cases and their runner
//!
//! Test cases are named, zero-argument bodies registered in a [`TestSuite`].
//! A body makes assertions through a [`Checker`]; assertions are recorded,
//! never short-circuit the body, and decide the case's [`Outcome`] together
//! with any error or panic the body produces. [`TestRunner::run`] executes a
//! suite and returns a [`TestRunReport`].
//!
//! # Example
//!
//! ```
//! use verity_core::{check_contains, check_eq, check_len, TestRunner, TestSuite};
//!
//! let mut suite = TestSuite::new();
//! suite
//!     .scope("app", |s| {
//!         s.case("sample_test", |t| {
//!             check_eq!(t, 2, 1 + 1, "Basic math should work");
//!             Ok(())
//!         })?;
//!         s.case("slice_contains", |t| {
//!             let slice = vec![1, 2, 3];
//!             check_len!(t, slice, 3);
//!             check_contains!(t, slice, 2);
//!             Ok(())
//!         })
//!     })
//!     .unwrap();
//!
//! let report = TestRunner::new().run(&suite);
//! assert_eq!(report.summary().passed, 2);
//! assert!(report.is_success());
//! ```

pub mod assert;
pub mod case;
pub mod panic;
pub mod report;
pub mod runner;
pub mod suite;

pub use assert::{Assertion, AssertionKind, Checker, SourceLocation};
pub use case::{BoxError, CaseResult, TestCase};
pub use panic::install_quiet_panic_hook;
pub use report::{Outcome, Summary, TestRun, TestRunReport};
pub use runner::TestRunner;
pub use suite::{Scope, SuiteError, TestSuite};
