//! Test cases, checks and recorded results.
//!
//! A `TestCase` is one request plus the `Check`s its response must satisfy.
//! Running it yields exactly one `TestResult`; a `RunSummary` is derived from
//! the ordered results of a whole run.

use serde::{Deserialize, Serialize};

use crate::request::RequestSpec;

/// Placeholder in a success message replaced by the length of a JSON array body.
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// A single expectation on a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Exact status code.
    Status {
        /// Expected status code.
        expected: u16,
    },
    /// Body deserializes as a JSON array (any length).
    JsonArray,
    /// Top-level JSON field equals a literal value.
    JsonFieldEquals {
        /// Field name.
        field: String,
        /// Expected value.
        expected: serde_json::Value,
    },
    /// Top-level JSON string field contains a literal substring.
    JsonFieldContains {
        /// Field name.
        field: String,
        /// Substring to search for.
        needle: String,
        /// Compare case-insensitively.
        ignore_case: bool,
    },
    /// All named response headers are present.
    HeadersPresent {
        /// Header names (case-insensitive).
        names: Vec<String>,
    },
}

impl Check {
    /// Exact status code check.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::Status { expected }
    }

    /// Field equality check.
    #[must_use]
    pub fn field_equals(field: impl Into<String>, expected: impl Into<serde_json::Value>) -> Self {
        Self::JsonFieldEquals {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Case-sensitive substring check on a field.
    #[must_use]
    pub fn field_contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::JsonFieldContains {
            field: field.into(),
            needle: needle.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive substring check on a field.
    #[must_use]
    pub fn field_contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::JsonFieldContains {
            field: field.into(),
            needle: needle.into(),
            ignore_case: true,
        }
    }

    /// Header presence check.
    #[must_use]
    pub fn headers_present<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::HeadersPresent {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Get a human-readable description of this check.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Status { expected } => format!("Status code = {expected}"),
            Self::JsonArray => "Body is a JSON array".to_string(),
            Self::JsonFieldEquals { field, expected } => format!("JSON {field} equals {expected}"),
            Self::JsonFieldContains {
                field,
                needle,
                ignore_case,
            } => {
                let suffix = if *ignore_case { " (ignoring case)" } else { "" };
                format!("JSON {field} contains '{needle}'{suffix}")
            }
            Self::HeadersPresent { names } => format!("Headers present: {}", names.join(", ")),
        }
    }
}

/// Outcome of evaluating one `Check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The check that was evaluated.
    pub check: Check,
    /// Whether the check passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Failure message.
    pub error: Option<String>,
}

impl CheckOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub const fn pass(check: Check) -> Self {
        Self {
            check,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed outcome with actual value.
    #[must_use]
    pub fn pass_with_value(check: Check, actual: impl Into<String>) -> Self {
        Self {
            check,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn fail(check: Check, error: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed outcome with actual value.
    #[must_use]
    pub fn fail_with_value(check: Check, actual: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// One fixed request/assert operation against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Display name, unique within a suite.
    pub name: String,
    /// The request to send.
    pub request: RequestSpec,
    /// Checks evaluated in order; the first failure decides the verdict.
    pub checks: Vec<Check>,
    /// Message recorded on success. May contain `{count}`.
    pub success_message: String,
}

impl TestCase {
    /// Create a case with no checks.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            name: name.into(),
            request,
            checks: Vec::new(),
            success_message: "OK".to_string(),
        }
    }

    /// Add a check (builder pattern).
    #[must_use]
    pub fn expect(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Set the success message (builder pattern).
    #[must_use]
    pub fn on_success(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    /// Render the success message, substituting the array length reported
    /// by a passed `JsonArray` check.
    #[must_use]
    pub fn render_success(&self, outcomes: &[CheckOutcome]) -> String {
        let count = outcomes
            .iter()
            .find(|o| o.passed && o.check == Check::JsonArray)
            .and_then(|o| o.actual.as_deref());

        match count {
            Some(count) => self.success_message.replace(COUNT_PLACEHOLDER, count),
            None => self.success_message.clone(),
        }
    }
}

/// Recorded outcome of one test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestResult {
    /// Name of the case.
    pub name: String,
    /// Whether the case passed.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Structured context, usually present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// ISO-8601 time at which the result was recorded.
    pub timestamp: String,
}

impl TestResult {
    /// Create a passing result.
    #[must_use]
    pub fn pass(name: impl Into<String>, message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            message: message.into(),
            details: None,
            timestamp: timestamp.into(),
        }
    }

    /// Create a failing result.
    #[must_use]
    pub fn fail(name: impl Into<String>, message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            message: message.into(),
            details: None,
            timestamp: timestamp.into(),
        }
    }

    /// Attach structured details (builder pattern).
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Aggregate counts over one run. Derived, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of results.
    pub total: usize,
    /// Number of passed results.
    pub passed: usize,
    /// Number of failed results.
    pub failed: usize,
}

impl RunSummary {
    /// Derive the summary from an ordered result sequence.
    #[must_use]
    pub fn from_results(results: &[TestResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Check if all cases passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Success rate as a percentage; an empty run counts as 100%.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TS: &str = "2026-01-01T00:00:00+00:00";

    #[test]
    fn test_check_description() {
        assert_eq!(Check::status(401).description(), "Status code = 401");
        assert_eq!(
            Check::field_contains_ignore_case("error", "not found").description(),
            "JSON error contains 'not found' (ignoring case)"
        );
        assert_eq!(
            Check::headers_present(["A", "B"]).description(),
            "Headers present: A, B"
        );
    }

    #[test]
    fn test_render_success_substitutes_count() {
        let case = TestCase::new("Submissions GET", RequestSpec::get("/submissions"))
            .expect(Check::status(200))
            .expect(Check::JsonArray)
            .on_success("Retrieved {count} submissions");

        let outcomes = vec![
            CheckOutcome::pass_with_value(Check::status(200), "200"),
            CheckOutcome::pass_with_value(Check::JsonArray, "3"),
        ];
        assert_eq!(case.render_success(&outcomes), "Retrieved 3 submissions");
        assert_eq!(case.render_success(&[]), "Retrieved {count} submissions");
    }

    #[test]
    fn test_run_summary() {
        let results = vec![
            TestResult::pass("a", "ok", TS),
            TestResult::fail("b", "Expected 401, got 500", TS),
            TestResult::pass("c", "ok", TS),
            TestResult::pass("d", "ok", TS),
        ];

        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_passed());
        assert!((summary.success_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_summary_passes() {
        let summary = RunSummary::from_results(&[]);
        assert!(summary.all_passed());
        assert!((summary.success_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_result_serialization_omits_empty_details() {
        let result = TestResult::pass("API Root", "API root endpoint working correctly", TS);
        let json = serde_json::to_value(&result).unwrap_or_default();
        assert!(json.get("details").is_none());
        assert_eq!(json["success"], serde_json::json!(true));

        let result = result.with_details(serde_json::json!({"status": 200}));
        assert_eq!(result.details, Some(serde_json::json!({"status": 200})));
    }
}
