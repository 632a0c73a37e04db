//! Test run results

use crate::assert::Assertion;
use crate::case::join_name;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// How a single test case ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Every assertion passed (or none were made)
    Passed,
    /// At least one assertion failed
    Failed,
    /// The body returned an error or panicked
    Errored { fault: String },
}

impl Outcome {
    /// A fault wins over failed assertions.
    pub fn resolve(fault: Option<String>, assertions: &[Assertion]) -> Self {
        match fault {
            Some(fault) => Outcome::Errored { fault },
            None if assertions.iter().any(|a| !a.passed) => Outcome::Failed,
            None => Outcome::Passed,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Failed)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Errored { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Passed => "PASS",
            Outcome::Failed => "FAIL",
            Outcome::Errored { .. } => "ERROR",
        }
    }
}

/// A completed test case
#[derive(Debug, Clone, Serialize)]
pub struct TestRun {
    pub name: String,
    pub scope: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub assertions: Vec<Assertion>,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

impl TestRun {
    pub fn full_name(&self) -> String {
        join_name(&self.scope, &self.name)
    }

    pub fn failed_assertions(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions.iter().filter(|a| !a.passed)
    }
}

/// Outcome counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

/// Aggregate of all test cases executed in one run
#[derive(Debug, Clone, Default)]
pub struct TestRunReport {
    /// Runs in suite order
    pub runs: Vec<TestRun>,
    /// Wall-clock time of the whole run
    pub duration: Duration,
}

impl TestRunReport {
    pub fn new(runs: Vec<TestRun>, duration: Duration) -> Self {
        Self { runs, duration }
    }

    pub fn summary(&self) -> Summary {
        self.runs.iter().fold(
            Summary {
                total: self.runs.len(),
                ..Summary::default()
            },
            |mut summary, run| {
                match run.outcome {
                    Outcome::Passed => summary.passed += 1,
                    Outcome::Failed => summary.failed += 1,
                    Outcome::Errored { .. } => summary.errored += 1,
                }
                summary
            },
        )
    }

    /// No failed and no errored test cases
    pub fn is_success(&self) -> bool {
        self.runs.iter().all(|r| r.outcome.is_pass())
    }

    /// Conventional process exit status for this report
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Runs that failed or errored
    pub fn failures(&self) -> impl Iterator<Item = &TestRun> {
        self.runs.iter().filter(|r| !r.outcome.is_pass())
    }

    pub fn get(&self, full_name: &str) -> Option<&TestRun> {
        self.runs.iter().find(|r| r.full_name() == full_name)
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
