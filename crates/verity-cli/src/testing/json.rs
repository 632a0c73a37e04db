//! JSON report output

use serde_json::{json, Value};
use verity_core::TestRunReport;

/// Render a run as a single JSON document
pub fn render(report: &TestRunReport) -> Value {
    let summary = report.summary();
    json!({
        "tests": summary.total,
        "passed": summary.passed,
        "failed": summary.failed,
        "errored": summary.errored,
        "success": report.is_success(),
        "duration_ms": u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX),
        "results": report.runs,
    })
}

/// Render the document for a run that matched no tests
pub fn render_empty() -> Value {
    json!({
        "tests": 0,
        "passed": 0,
        "failed": 0,
        "errored": 0,
        "success": true,
        "duration_ms": 0,
        "results": [],
        "message": "No tests found",
    })
}
