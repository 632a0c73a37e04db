//! Test reporting for the CLI
//!
//! Discovery and execution live in `verity-core`; this module renders the
//! resulting report for humans or as JSON.

pub mod json;
pub mod reporter;

pub use reporter::TestReporter;
