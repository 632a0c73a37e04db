//! Test reporter - display test results

use colored::*;
use std::io::{self, Write};
use verity_core::{Outcome, TestRun, TestRunReport};

/// Test reporter with output configuration
#[derive(Debug, Default)]
pub struct TestReporter {
    /// Show one line per test instead of progress marks
    verbose: bool,
}

impl TestReporter {
    /// Create a new test reporter
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Report test results to stdout
    pub fn report(&self, report: &TestRunReport) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_report(&mut out, report)?;
        out.flush()
    }

    /// Write the full report: per-test marks, summary, then failure details
    pub fn write_report<W: Write>(&self, out: &mut W, report: &TestRunReport) -> io::Result<()> {
        for run in &report.runs {
            self.write_test_result(out, run)?;
        }

        // Newline before summary if not verbose (marks need newline)
        if !self.verbose && !report.runs.is_empty() {
            writeln!(out)?;
        }

        writeln!(out)?;
        self.write_summary(out, report)?;
        self.write_failures(out, report)
    }

    /// Write a single test result
    fn write_test_result<W: Write>(&self, out: &mut W, run: &TestRun) -> io::Result<()> {
        let (mark, label) = match run.outcome {
            Outcome::Passed => (".".green(), "PASS".green().bold()),
            Outcome::Failed => ("F".red().bold(), "FAIL".red().bold()),
            Outcome::Errored { .. } => ("E".yellow().bold(), "ERROR".yellow().bold()),
        };

        if self.verbose {
            writeln!(out, "{} {} ({:.2?})", label, run.full_name(), run.duration)
        } else {
            write!(out, "{}", mark)
        }
    }

    /// Write summary statistics
    fn write_summary<W: Write>(&self, out: &mut W, report: &TestRunReport) -> io::Result<()> {
        let summary = report.summary();

        writeln!(out, "{}", "─".repeat(50))?;

        let status = if report.is_success() {
            "PASSED".green().bold()
        } else {
            "FAILED".red().bold()
        };

        writeln!(
            out,
            "Test result: {} | {} total, {} passed, {} failed, {} errored",
            status,
            summary.total.to_string().bold(),
            summary.passed.to_string().green().bold(),
            if summary.failed > 0 {
                summary.failed.to_string().red().bold()
            } else {
                summary.failed.to_string().normal()
            },
            if summary.errored > 0 {
                summary.errored.to_string().yellow().bold()
            } else {
                summary.errored.to_string().normal()
            }
        )?;
        writeln!(out, "Time: {:.2?}", report.duration)
    }

    /// Write details of failed and errored tests
    fn write_failures<W: Write>(&self, out: &mut W, report: &TestRunReport) -> io::Result<()> {
        let failures: Vec<_> = report.failures().collect();

        if failures.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", "Failures:".red().bold())?;
        writeln!(out)?;

        for run in failures {
            writeln!(out, "  {} {}", "●".red(), run.full_name().bold())?;

            for assertion in run.failed_assertions() {
                writeln!(out, "    at {}", assertion.location.to_string().dimmed())?;
                for line in assertion.to_string().lines() {
                    writeln!(out, "      {}", line)?;
                }
            }

            if let Outcome::Errored { fault } = &run.outcome {
                writeln!(out, "    {} {}", "error:".yellow().bold(), fault)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
