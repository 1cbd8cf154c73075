//! Reporter port

use probe_domain::{RunSummary, TestResult};
use url::Url;

/// Receives progress from the runner as the run proceeds.
pub trait Reporter {
    /// Called once before the first case runs.
    fn run_started(&self, api_root: &Url, total: usize);

    /// Called once per case, in execution order.
    fn case_finished(&self, result: &TestResult);

    /// Called once after the last case.
    fn run_finished(&self, results: &[TestResult], summary: &RunSummary);
}
