//! Test runner - execute registered test cases

use crate::assert::Checker;
use crate::case::TestCase;
use crate::panic as panics;
use crate::report::{Outcome, TestRun, TestRunReport};
use crate::suite::TestSuite;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, warn};

/// Test runner with configuration
#[derive(Debug, Clone)]
pub struct TestRunner {
    /// Whether to run tests in parallel
    parallel: bool,
    /// Size of a dedicated thread pool; `None` uses rayon's global pool
    threads: Option<usize>,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    /// Create a new test runner with default settings
    pub fn new() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }

    /// Set whether to run tests in parallel
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the number of worker threads used in parallel mode
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Run every case in the suite exactly once
    ///
    /// Runs come back in suite order whatever order they executed in.
    pub fn run(&self, suite: &TestSuite) -> TestRunReport {
        let start = Instant::now();
        debug!(tests = suite.len(), parallel = self.parallel, "starting test run");

        let runs = if self.parallel {
            self.run_parallel(suite)
        } else {
            self.run_sequential(suite)
        };

        let report = TestRunReport::new(runs, start.elapsed());
        let summary = report.summary();
        debug!(
            passed = summary.passed,
            failed = summary.failed,
            errored = summary.errored,
            "test run finished"
        );
        report
    }

    /// Run tests sequentially
    fn run_sequential(&self, suite: &TestSuite) -> Vec<TestRun> {
        suite.iter().map(|case| self.run_case(case)).collect()
    }

    /// Run tests in parallel using rayon
    fn run_parallel(&self, suite: &TestSuite) -> Vec<TestRun> {
        let run_all = || -> Vec<TestRun> {
            suite
                .cases()
                .par_iter()
                .map(|case| self.run_case(case))
                .collect()
        };

        match self.threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(run_all),
                Err(e) => {
                    warn!(error = %e, "could not build test thread pool, using the global pool");
                    run_all()
                }
            },
            None => run_all(),
        }
    }

    /// Run a single test case in isolation
    ///
    /// A returned error or a panic marks the case as errored; assertions
    /// recorded before the fault are kept.
    pub fn run_case(&self, case: &TestCase) -> TestRun {
        let start = Instant::now();
        debug!(test = %case.full_name(), "running test case");

        let mut checker = Checker::new();
        let guard = panics::CaseGuard::enter();
        let result = panic::catch_unwind(AssertUnwindSafe(|| case.call(&mut checker)));
        drop(guard);
        let fault = match result {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(payload) => Some(panics::describe(payload)),
        };

        let assertions = checker.into_assertions();
        let outcome = Outcome::resolve(fault, &assertions);
        if let Outcome::Errored { fault } = &outcome {
            warn!(test = %case.full_name(), %fault, "test case errored");
        }

        TestRun {
            name: case.name().to_string(),
            scope: case.scope().to_string(),
            outcome,
            assertions,
            duration: start.elapsed(),
        }
    }
}
