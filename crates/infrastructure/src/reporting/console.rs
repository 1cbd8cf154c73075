//! Console reporter.

use std::cell::RefCell;
use std::io::{self, Stdout, Write};

use probe_application::Reporter;
use probe_domain::{RunSummary, TestResult};
use tracing::warn;
use url::Url;

const RULE_WIDTH: usize = 60;

/// Writes human-readable progress to a terminal or any `Write` sink.
///
/// Write failures are logged and otherwise ignored; a broken stdout must
/// not change the run's verdict.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: RefCell<W>,
}

impl ConsoleReporter<Stdout> {
    /// Reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Returns the sink, consuming the reporter.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!(error = %e, "failed to write report output");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn run_started(&self, api_root: &Url, _total: usize) {
        self.emit(&format_banner(api_root));
    }

    fn case_finished(&self, result: &TestResult) {
        self.emit(&format_result(result));
    }

    fn run_finished(&self, _results: &[TestResult], summary: &RunSummary) {
        self.emit(&format_summary(summary));
    }
}

/// Banner printed before the first case: the target, then the run header,
/// each under its own rule.
#[must_use]
pub fn format_banner(api_root: &Url) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("🔧 Testing backend at: {api_root}\n{rule}\n🚀 Starting RepoHub Backend API Tests\n{rule}\n")
}

/// One result line, plus a `Details:` line when the result carries details,
/// followed by a blank separator line.
#[must_use]
pub fn format_result(result: &TestResult) -> String {
    let status = if result.success { "✅ PASS" } else { "❌ FAIL" };
    let mut line = format!("{status} {}: {}\n", result.name, result.message);
    if let Some(details) = &result.details {
        line.push_str(&format!("   Details: {details}\n"));
    }
    line.push('\n');
    line
}

/// Summary block printed after the last case.
#[must_use]
pub fn format_summary(summary: &RunSummary) -> String {
    let verdict = if summary.all_passed() {
        "🎉 All backend tests passed! The API is working correctly.".to_string()
    } else {
        format!("⚠️  {} test(s) failed. Check the details above.", summary.failed)
    };
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "{rule}\n📊 TEST SUMMARY\n{rule}\n✅ Passed: {}\n❌ Failed: {}\n📈 Success Rate: {:.1}%\n\n{verdict}\n",
        summary.passed,
        summary.failed,
        summary.success_rate(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TS: &str = "2026-10-19T12:00:00+00:00";

    #[test]
    fn test_format_pass_line() {
        let result = TestResult::pass("API Root", "API is running: RepoHub API is running", TS);
        assert_eq!(
            format_result(&result),
            "✅ PASS API Root: API is running: RepoHub API is running\n\n"
        );
    }

    #[test]
    fn test_format_fail_line_with_details() {
        let result = TestResult::fail("Invalid Route", "Expected 404, got 200", TS)
            .with_details(serde_json::json!({"status": 200}));
        assert_eq!(
            format_result(&result),
            "❌ FAIL Invalid Route: Expected 404, got 200\n   Details: {\"status\":200}\n\n"
        );
    }

    #[test]
    fn test_banner_has_two_ruled_sections() {
        let root = Url::parse("http://localhost:3000/api").unwrap();
        let rule = "=".repeat(RULE_WIDTH);
        assert_eq!(
            format_banner(&root),
            format!(
                "🔧 Testing backend at: http://localhost:3000/api\n{rule}\n🚀 Starting RepoHub Backend API Tests\n{rule}\n"
            )
        );
    }

    #[test]
    fn test_summary_rounds_to_one_decimal() {
        let summary = RunSummary {
            total: 12,
            passed: 11,
            failed: 1,
        };
        let text = format_summary(&summary);
        assert!(text.contains("✅ Passed: 11\n"));
        assert!(text.contains("❌ Failed: 1\n"));
        assert!(text.contains("📈 Success Rate: 91.7%\n"));
        assert!(text.contains("⚠️  1 test(s) failed."));
    }

    #[test]
    fn test_summary_all_passed() {
        let summary = RunSummary {
            total: 12,
            passed: 12,
            failed: 0,
        };
        let text = format_summary(&summary);
        assert!(text.contains("📈 Success Rate: 100.0%"));
        assert!(text.ends_with("🎉 All backend tests passed! The API is working correctly.\n"));
    }

    #[test]
    fn test_reporter_streams_to_sink() {
        let reporter = ConsoleReporter::new(Vec::new());
        let root = Url::parse("http://localhost:3000/api").unwrap();

        reporter.run_started(&root, 1);
        let result = TestResult::pass("API Root", "ok", TS);
        reporter.case_finished(&result);
        reporter.run_finished(&[result.clone()], &RunSummary::from_results(&[result]));

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.starts_with("🔧 Testing backend at: http://localhost:3000/api\n"));
        let rule = "=".repeat(RULE_WIDTH);
        assert!(text.contains(&format!("✅ PASS API Root: ok\n\n{rule}\n📊 TEST SUMMARY\n")));
        assert!(text.contains("📊 TEST SUMMARY"));
    }
}
