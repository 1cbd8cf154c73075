//! Check evaluation.
//!
//! Evaluates `Check`s against a `ResponseSpec`. Failure messages are the
//! ones recorded on the case's `TestResult`.

use probe_domain::{Check, CheckOutcome, ResponseSpec, StatusCode};
use serde_json::Value;

/// Evaluate checks in order, stopping after the first failure.
///
/// The returned vector always ends with the deciding outcome: the first
/// failure, or the last check if everything passed.
#[must_use]
pub fn evaluate_all(checks: &[Check], response: &ResponseSpec) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::with_capacity(checks.len());
    for check in checks {
        let outcome = evaluate(check, response);
        let failed = !outcome.passed;
        outcomes.push(outcome);
        if failed {
            break;
        }
    }
    outcomes
}

/// Evaluate a single check against a response.
#[must_use]
pub fn evaluate(check: &Check, response: &ResponseSpec) -> CheckOutcome {
    match check {
        Check::Status { expected } => check_status(check, response, *expected),
        Check::JsonArray => check_json_array(check, response),
        Check::JsonFieldEquals { field, expected } => {
            check_field_equals(check, response, field, expected)
        }
        Check::JsonFieldContains {
            field,
            needle,
            ignore_case,
        } => check_field_contains(check, response, field, needle, *ignore_case),
        Check::HeadersPresent { names } => check_headers_present(check, response, names),
    }
}

/// Name of a JSON value's type, for messages.
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_status(check: &Check, response: &ResponseSpec, expected: u16) -> CheckOutcome {
    let actual = response.status;
    if actual == expected {
        return CheckOutcome::pass_with_value(check.clone(), actual.to_string());
    }

    let message = if StatusCode::new(expected).is_success() {
        format!("HTTP {actual}: {}", response.body)
    } else {
        format!("Expected {expected}, got {actual}")
    };
    CheckOutcome::fail_with_value(check.clone(), actual.to_string(), message)
}

fn check_json_array(check: &Check, response: &ResponseSpec) -> CheckOutcome {
    match response.json() {
        Ok(Value::Array(items)) => CheckOutcome::pass_with_value(check.clone(), items.len().to_string()),
        Ok(other) => CheckOutcome::fail_with_value(
            check.clone(),
            json_kind(&other),
            format!("Expected array, got: {}", json_kind(&other)),
        ),
        Err(e) => invalid_json(check, &e),
    }
}

fn check_field_equals(
    check: &Check,
    response: &ResponseSpec,
    field: &str,
    expected: &Value,
) -> CheckOutcome {
    let json = match response.json() {
        Ok(json) => json,
        Err(e) => return invalid_json(check, &e),
    };

    match json.get(field) {
        Some(actual) if actual == expected => {
            CheckOutcome::pass_with_value(check.clone(), actual.to_string())
        }
        Some(actual) => CheckOutcome::fail_with_value(
            check.clone(),
            actual.to_string(),
            format!("Expected {field} = {expected}, got: {json}"),
        ),
        None => CheckOutcome::fail(
            check.clone(),
            format!("Expected {field} = {expected}, got: {json}"),
        ),
    }
}

fn check_field_contains(
    check: &Check,
    response: &ResponseSpec,
    field: &str,
    needle: &str,
    ignore_case: bool,
) -> CheckOutcome {
    let json = match response.json() {
        Ok(json) => json,
        Err(e) => return invalid_json(check, &e),
    };

    // A missing or non-string field searches the empty string.
    let haystack = json.get(field).and_then(Value::as_str).unwrap_or_default();
    let contains = if ignore_case {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    };

    if contains {
        CheckOutcome::pass_with_value(check.clone(), haystack)
    } else {
        CheckOutcome::fail_with_value(
            check.clone(),
            haystack,
            format!("Expected {field} containing '{needle}', got: {json}"),
        )
    }
}

fn check_headers_present(check: &Check, response: &ResponseSpec, names: &[String]) -> CheckOutcome {
    let missing: Vec<&str> = names
        .iter()
        .filter(|name| !response.has_header(name))
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        CheckOutcome::pass(check.clone())
    } else {
        CheckOutcome::fail_with_value(
            check.clone(),
            missing.join(", "),
            format!("Missing headers: {}", missing.join(", ")),
        )
    }
}

fn invalid_json(check: &Check, error: &serde_json::Error) -> CheckOutcome {
    CheckOutcome::fail(check.clone(), format!("Response is not valid JSON: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(status, HashMap::new(), body.as_bytes(), Duration::from_millis(5))
    }

    fn response_with_headers(headers: &[(&str, &str)]) -> ResponseSpec {
        let headers = headers
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ResponseSpec::new(200, headers, b"", Duration::ZERO)
    }

    #[test]
    fn test_status_exact() {
        let outcome = evaluate(&Check::status(401), &response(401, ""));
        assert!(outcome.passed);
        assert_eq!(outcome.actual.as_deref(), Some("401"));

        let outcome = evaluate(&Check::status(401), &response(200, "[]"));
        assert!(!outcome.passed);
        assert_eq!(outcome.error.as_deref(), Some("Expected 401, got 200"));
    }

    #[test]
    fn test_status_success_expectation_reports_body() {
        let outcome = evaluate(&Check::status(200), &response(500, "boom"));
        assert_eq!(outcome.error.as_deref(), Some("HTTP 500: boom"));
    }

    #[test]
    fn test_json_array() {
        let outcome = evaluate(&Check::JsonArray, &response(200, "[]"));
        assert!(outcome.passed);
        assert_eq!(outcome.actual.as_deref(), Some("0"));

        let outcome = evaluate(&Check::JsonArray, &response(200, r#"[{"id": 1}, {"id": 2}]"#));
        assert_eq!(outcome.actual.as_deref(), Some("2"));

        let outcome = evaluate(&Check::JsonArray, &response(200, r#"{"items": []}"#));
        assert!(!outcome.passed);
        assert_eq!(outcome.error.as_deref(), Some("Expected array, got: object"));
    }

    #[test]
    fn test_field_equals() {
        let check = Check::field_equals("error", "Unauthorized");

        assert!(evaluate(&check, &response(401, r#"{"error": "Unauthorized"}"#)).passed);

        let outcome = evaluate(&check, &response(401, r#"{"error": "Forbidden"}"#));
        assert!(!outcome.passed);
        assert_eq!(
            outcome.error.as_deref(),
            Some(r#"Expected error = "Unauthorized", got: {"error":"Forbidden"}"#)
        );

        assert!(!evaluate(&check, &response(401, r#"{"message": "Unauthorized"}"#)).passed);
    }

    #[test]
    fn test_field_contains() {
        let check = Check::field_contains("error", "repoId or repoUrl is required");
        assert!(evaluate(&check, &response(400, r#"{"error": "repoId or repoUrl is required"}"#)).passed);
        assert!(!evaluate(&check, &response(400, r#"{"error": "Bad Request"}"#)).passed);
        assert!(!evaluate(&check, &response(400, "{}")).passed);
    }

    #[test]
    fn test_field_contains_ignore_case() {
        let check = Check::field_contains_ignore_case("error", "not found");
        assert!(evaluate(&check, &response(404, r#"{"error": "Route Not Found"}"#)).passed);

        let strict = Check::field_contains("error", "not found");
        assert!(!evaluate(&strict, &response(404, r#"{"error": "Route Not Found"}"#)).passed);
    }

    #[test]
    fn test_non_json_body_fails_json_checks() {
        let outcome = evaluate(&Check::JsonArray, &response(200, "<html></html>"));
        assert!(!outcome.passed);
        assert!(
            outcome
                .error
                .as_deref()
                .is_some_and(|e| e.starts_with("Response is not valid JSON"))
        );
    }

    #[test]
    fn test_headers_present_lists_missing() {
        let check = Check::headers_present([
            "Access-Control-Allow-Origin",
            "Access-Control-Allow-Methods",
            "Access-Control-Allow-Headers",
        ]);

        let all = response_with_headers(&[
            ("access-control-allow-origin", "*"),
            ("access-control-allow-methods", "GET, POST"),
            ("access-control-allow-headers", "Content-Type"),
        ]);
        assert!(evaluate(&check, &all).passed);

        let partial = response_with_headers(&[
            ("access-control-allow-origin", "*"),
            ("access-control-allow-methods", "GET, POST"),
        ]);
        let outcome = evaluate(&check, &partial);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Missing headers: Access-Control-Allow-Headers")
        );
    }

    #[test]
    fn test_evaluate_all_stops_on_first_failure() {
        let checks = vec![Check::status(401), Check::field_equals("error", "Unauthorized")];

        let outcomes = evaluate_all(&checks, &response(500, "not json"));
        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].passed);

        let outcomes = evaluate_all(&checks, &response(401, r#"{"error": "Unauthorized"}"#));
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.passed));
    }
}
