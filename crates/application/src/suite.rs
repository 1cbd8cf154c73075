//! The fixed RepoHub API suite.
//!
//! Twelve independent checks against the submissions and comments
//! endpoints. Every "create"/"update"/"delete" case goes out without
//! credentials and expects a 401, so a passing run persists nothing.

use probe_domain::{Check, RequestSpec, TestCase};
use serde_json::json;
use uuid::Uuid;

/// Greeting returned by `GET /api`.
pub const ROOT_GREETING: &str = "RepoHub API is running";
/// Error body of every unauthenticated write.
pub const UNAUTHORIZED: &str = "Unauthorized";
/// Phrase in the error when comment listing has no filter.
pub const MISSING_FILTER_PHRASE: &str = "repoId or repoUrl is required";
/// Phrase (any case) in the error for unknown routes.
pub const NOT_FOUND_PHRASE: &str = "not found";
/// Repository URL used to filter comment listings.
pub const SAMPLE_REPO_URL: &str = "https://github.com/test/sample-repo";
/// CORS headers the preflight response must carry.
pub const CORS_HEADERS: [&str; 3] = [
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Headers",
];

const REJECTED_UNAUTHORIZED: &str = "Correctly rejected unauthorized request";

/// Builds the suite in execution order.
///
/// Repository and comment identifiers are fresh v4 UUIDs on every call.
#[must_use]
pub fn repohub_suite() -> Vec<TestCase> {
    vec![
        TestCase::new("API Root", RequestSpec::get(""))
            .expect(Check::status(200))
            .expect(Check::field_equals("message", ROOT_GREETING))
            .on_success("API root endpoint working correctly"),
        // The listing only succeeds when the backing store answers.
        TestCase::new("Database Connection", RequestSpec::get("/submissions"))
            .expect(Check::status(200))
            .on_success("Database connection working (via submissions endpoint)"),
        TestCase::new("CORS Headers", RequestSpec::options(""))
            .expect(Check::status(200))
            .expect(Check::headers_present(CORS_HEADERS))
            .on_success("All required CORS headers present"),
        TestCase::new("Submissions GET", RequestSpec::get("/submissions"))
            .expect(Check::status(200))
            .expect(Check::JsonArray)
            .on_success("Retrieved {count} submissions"),
        TestCase::new(
            "Submissions POST (Unauth)",
            RequestSpec::post_json("/submissions", submission_body()),
        )
        .expect(Check::status(401))
        .expect(Check::field_equals("error", UNAUTHORIZED))
        .on_success(REJECTED_UNAUTHORIZED),
        TestCase::new("Comments GET (No Params)", RequestSpec::get("/comments"))
            .expect(Check::status(400))
            .expect(Check::field_contains("error", MISSING_FILTER_PHRASE))
            .on_success("Correctly rejected request without parameters"),
        TestCase::new(
            "Comments GET (RepoURL)",
            RequestSpec::get("/comments").with_query("repoUrl", SAMPLE_REPO_URL),
        )
        .expect(Check::status(200))
        .expect(Check::JsonArray)
        .on_success("Retrieved {count} comments for repo URL"),
        TestCase::new(
            "Comments GET (RepoID)",
            RequestSpec::get("/comments").with_query("repoId", Uuid::new_v4().to_string()),
        )
        .expect(Check::status(200))
        .expect(Check::JsonArray)
        .on_success("Retrieved {count} comments for repo ID"),
        TestCase::new(
            "Comments POST (Unauth)",
            RequestSpec::post_json("/comments", comment_body()),
        )
        .expect(Check::status(401))
        .expect(Check::field_equals("error", UNAUTHORIZED))
        .on_success(REJECTED_UNAUTHORIZED),
        TestCase::new(
            "Comments PUT (Unauth)",
            RequestSpec::put_json(
                format!("/comments/{}", Uuid::new_v4()),
                json!({ "text": "Updated comment text" }),
            ),
        )
        .expect(Check::status(401))
        .expect(Check::field_equals("error", UNAUTHORIZED))
        .on_success(REJECTED_UNAUTHORIZED),
        TestCase::new(
            "Comments DELETE (Unauth)",
            RequestSpec::delete(format!("/comments/{}", Uuid::new_v4())),
        )
        .expect(Check::status(401))
        .expect(Check::field_equals("error", UNAUTHORIZED))
        .on_success(REJECTED_UNAUTHORIZED),
        TestCase::new("Invalid Route", RequestSpec::get("/invalid-endpoint"))
            .expect(Check::status(404))
            .expect(Check::field_contains_ignore_case("error", NOT_FOUND_PHRASE))
            .on_success("Correctly returned 404 for invalid route"),
    ]
}

fn submission_body() -> serde_json::Value {
    json!({
        "url": "https://github.com/test/repo",
        "title": "Test Repository",
        "description": "A test repository for API testing",
        "tags": ["javascript", "testing"],
        "platform": "github",
        "username": "testuser",
        "language": "JavaScript",
        "stars": 42
    })
}

fn comment_body() -> serde_json::Value {
    json!({
        "repoUrl": "https://github.com/test/repo",
        "text": "This is a test comment",
        "username": "testuser"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use probe_domain::HttpMethod;
    use std::collections::HashSet;

    #[test]
    fn test_suite_order_and_size() {
        let names: Vec<String> = repohub_suite().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "API Root",
                "Database Connection",
                "CORS Headers",
                "Submissions GET",
                "Submissions POST (Unauth)",
                "Comments GET (No Params)",
                "Comments GET (RepoURL)",
                "Comments GET (RepoID)",
                "Comments POST (Unauth)",
                "Comments PUT (Unauth)",
                "Comments DELETE (Unauth)",
                "Invalid Route",
            ]
        );
    }

    #[test]
    fn test_case_names_are_unique() {
        let suite = repohub_suite();
        let names: HashSet<&str> = suite.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), suite.len());
    }

    #[test]
    fn test_identifiers_are_fresh_per_build() {
        let first = repohub_suite();
        let second = repohub_suite();
        assert_ne!(first[7].request.query, second[7].request.query);
        assert_ne!(first[9].request.path, second[9].request.path);
        assert_ne!(first[9].request.path, first[10].request.path);
    }

    #[test]
    fn test_writes_send_json_without_credentials() {
        for case in repohub_suite() {
            assert!(!case.request.headers.contains("Authorization"), "{}", case.name);
            if case.request.method.has_body() {
                assert_eq!(
                    case.request.headers.get("Content-Type"),
                    Some("application/json"),
                    "{}",
                    case.name
                );
            }
        }
    }

    #[test]
    fn test_every_case_checks_status_first() {
        for case in repohub_suite() {
            assert!(
                matches!(case.checks.first(), Some(Check::Status { .. })),
                "{}",
                case.name
            );
        }
        let preflight = &repohub_suite()[2];
        assert_eq!(preflight.request.method, HttpMethod::Options);
    }
}
