//! The test runner.
//!
//! Executes every registered case in order against one API root, records
//! exactly one `TestResult` per case, and never lets a single case abort the
//! run.

use std::sync::Arc;

use probe_domain::{RequestSpec, ResponseSpec, RunSummary, TestCase, TestResult};
use serde_json::{Value, json};
use tracing::{debug, error};
use url::Url;

use super::evaluator::evaluate_all;
use crate::error::ApplicationResult;
use crate::ports::{Clock, HttpClient, Reporter};

/// Runs a fixed, ordered list of test cases against a live server.
pub struct TestRunner<C: HttpClient, K: Clock> {
    client: Arc<C>,
    clock: Arc<K>,
    api_root: Url,
    cases: Vec<TestCase>,
    results: Vec<TestResult>,
}

impl<C: HttpClient, K: Clock> TestRunner<C, K> {
    /// Creates a runner for `cases`, sent below `api_root`.
    pub fn new(client: Arc<C>, clock: Arc<K>, api_root: Url, cases: Vec<TestCase>) -> Self {
        Self {
            client,
            clock,
            api_root,
            cases,
            results: Vec::new(),
        }
    }

    /// The API root every request path is resolved against.
    pub const fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Results of the last run, in execution order.
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Summary of the last run.
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }

    /// Executes every registered case in order and reports as it goes.
    ///
    /// Results from a previous run are discarded first. Returns true if
    /// every case passed.
    pub async fn run_all_tests(&mut self, reporter: &dyn Reporter) -> bool {
        self.results.clear();
        reporter.run_started(&self.api_root, self.cases.len());

        for case in &self.cases {
            let result = match self.run_case(case).await {
                Ok(result) => result,
                Err(e) => {
                    error!(case = %case.name, error = %e, "test case crashed");
                    TestResult::fail(&case.name, format!("Test crashed: {e}"), self.timestamp())
                }
            };

            if !result.success {
                debug!(case = %result.name, message = %result.message, "test case failed");
            }
            reporter.case_finished(&result);
            self.results.push(result);
        }

        let summary = self.summary();
        reporter.run_finished(&self.results, &summary);
        summary.all_passed()
    }

    /// Runs one case. Transport failures and failed checks come back as a
    /// failed result; only unexpected errors are returned as `Err`.
    async fn run_case(&self, case: &TestCase) -> ApplicationResult<TestResult> {
        let url = case.request.resolve_url(&self.api_root)?;
        debug!(case = %case.name, method = %case.request.method, %url, "sending request");

        let response = match self.client.execute(&case.request, &url).await {
            Ok(response) => response,
            Err(e) => {
                return Ok(TestResult::fail(&case.name, format!("Request failed: {e}"), self.timestamp())
                    .with_details(json!({ "request": request_details(&case.request, &url) })));
            }
        };
        debug!(
            case = %case.name,
            status = response.status,
            elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "received response"
        );

        let outcomes = evaluate_all(&case.checks, &response);
        let result = match outcomes.iter().find(|o| !o.passed) {
            None => TestResult::pass(&case.name, case.render_success(&outcomes), self.timestamp()),
            Some(failed) => {
                let message = failed
                    .error
                    .clone()
                    .unwrap_or_else(|| failed.check.description());
                TestResult::fail(&case.name, message, self.timestamp()).with_details(json!({
                    "request": request_details(&case.request, &url),
                    "check": failed.check.description(),
                    "status": response.status,
                    "body": response_body(&response),
                }))
            }
        };
        Ok(result)
    }

    fn timestamp(&self) -> String {
        self.clock.now().to_rfc3339()
    }
}

fn request_details(request: &RequestSpec, url: &Url) -> Value {
    json!({ "method": request.method.as_str(), "url": url.as_str() })
}

/// The parsed body when it is JSON, the raw text otherwise.
fn response_body(response: &ResponseSpec) -> Value {
    response
        .body_as_json()
        .unwrap_or_else(|| Value::String(response.body.clone()))
}
