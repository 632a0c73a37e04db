//! Test command - run registered test suites

use crate::testing::{json, TestReporter};
use anyhow::{bail, Result};
use colored::*;
use std::path::PathBuf;
use verity_config::OutputFormat;
use verity_core::{TestRunner, TestSuite};

/// Arguments for the test command
pub struct TestArgs {
    /// Filter tests by name pattern
    pub pattern: Option<String>,
    /// Only run tests in this scope
    pub scope: Option<String>,
    /// Run tests sequentially instead of parallel
    pub sequential: bool,
    /// Worker threads for parallel runs
    pub threads: Option<usize>,
    /// Verbose output (show all test names)
    pub verbose: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Directory to search for verity.toml (defaults to current directory)
    pub dir: PathBuf,
    /// Output in JSON format
    pub json: bool,
}

impl Default for TestArgs {
    fn default() -> Self {
        Self {
            pattern: None,
            scope: None,
            sequential: false,
            threads: None,
            verbose: false,
            no_color: false,
            dir: PathBuf::from("."),
            json: false,
        }
    }
}

/// Run the test command
///
/// Returns the process exit status: 0 if every selected test passed.
pub fn run(args: TestArgs) -> Result<i32> {
    if args.threads == Some(0) {
        bail!("--threads must be at least 1");
    }

    // CLI flags override verity.toml and environment
    let settings = super::load_settings(&args.dir)?;
    let json = args.json || settings.format == OutputFormat::Json;
    let verbose = args.verbose || settings.verbose;
    let parallel = settings.parallel && !args.sequential;
    let threads = args.threads.or(settings.threads);
    let pattern = args.pattern.or(settings.filter);
    let scope = args.scope.or(settings.scope);

    if args.no_color || !settings.color {
        colored::control::set_override(false);
    }

    let suite = super::select(scope.as_deref(), pattern.as_deref())?;
    let runner = TestRunner::new()
        .with_parallel(parallel)
        .with_threads(threads);
    execute(&suite, &runner, json, verbose)
}

/// Run `suite` and print its report
fn execute(suite: &TestSuite, runner: &TestRunner, json: bool, verbose: bool) -> Result<i32> {
    if suite.is_empty() {
        if json {
            println!("{}", json::render_empty());
        } else {
            println!("{}", "No tests found.".yellow());
        }
        return Ok(0);
    }

    if !json {
        println!(
            "Running {} test{}",
            suite.len().to_string().bold(),
            if suite.len() == 1 { "" } else { "s" }
        );
        println!();
    }

    verity_core::install_quiet_panic_hook();
    let report = runner.run(suite);

    if json {
        println!("{}", serde_json::to_string_pretty(&json::render(&report))?);
    } else {
        TestReporter::new(verbose).report(&report)?;
    }

    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use verity_core::{check_eq, check_len, TestCase};

    #[test]
    fn test_command_runs_builtin_suites() {
        let dir = tempdir().unwrap();

        let args = TestArgs {
            dir: dir.path().to_path_buf(),
            verbose: true,
            no_color: true,
            ..Default::default()
        };

        assert_eq!(run(args).unwrap(), 0);
    }

    #[test]
    fn test_command_no_tests_found() {
        let dir = tempdir().unwrap();

        let args = TestArgs {
            dir: dir.path().to_path_buf(),
            pattern: Some("does-not-exist".to_string()),
            no_color: true,
            ..Default::default()
        };

        // Should not fail, just report no tests
        assert_eq!(run(args).unwrap(), 0);
    }

    #[test]
    fn test_command_scope_and_sequential() {
        let dir = tempdir().unwrap();

        let args = TestArgs {
            dir: dir.path().to_path_buf(),
            scope: Some("app".to_string()),
            sequential: true,
            no_color: true,
            json: true,
            ..Default::default()
        };

        assert_eq!(run(args).unwrap(), 0);
    }

    fn suite_with(case: TestCase) -> TestSuite {
        let mut suite = TestSuite::new();
        suite.add(case).unwrap();
        suite
    }

    #[test]
    fn test_execute_failed_case_exits_one() {
        colored::control::set_override(false);
        let suite = suite_with(TestCase::new("math", |t| {
            check_eq!(t, 3, 1 + 1, "Basic math should work");
            Ok(())
        }));

        assert_eq!(execute(&suite, &TestRunner::new(), false, true).unwrap(), 1);
    }

    #[test]
    fn test_execute_errored_case_exits_one() {
        colored::control::set_override(false);
        let suite = suite_with(TestCase::new("broken", |_| Err("no database".into())));

        assert_eq!(execute(&suite, &TestRunner::new(), true, false).unwrap(), 1);
    }

    #[test]
    fn test_execute_passing_case_exits_zero() {
        colored::control::set_override(false);
        let suite = suite_with(TestCase::new("fine", |t| {
            check_len!(t, [1, 2, 3], 3);
            Ok(())
        }));

        assert_eq!(execute(&suite, &TestRunner::new(), false, false).unwrap(), 0);
    }

    #[test]
    fn test_command_rejects_zero_threads() {
        let args = TestArgs {
            threads: Some(0),
            no_color: true,
            ..Default::default()
        };

        assert!(run(args).is_err());
    }

    #[test]
    fn test_command_invalid_config() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("verity.toml"), "[test]\nthreads = 0\n").unwrap();

        let args = TestArgs {
            dir: dir.path().to_path_buf(),
            no_color: true,
            ..Default::default()
        };

        let err = run(args).unwrap_err();
        assert!(format!("{:#}", err).contains("test.threads"), "{:#}", err);
    }
}
