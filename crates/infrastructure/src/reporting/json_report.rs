//! JSON run report.

use std::path::{Path, PathBuf};

use probe_domain::{RunSummary, TestResult};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;
use url::Url;

/// Error type for report writing.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The report file could not be written.
    #[error("failed to write report to {}: {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Everything a CI job needs to archive one run.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    /// When the report was produced (ISO-8601).
    pub generated_at: String,
    /// API root the suite ran against.
    pub api_root: &'a Url,
    /// Aggregate counts.
    pub summary: RunSummary,
    /// Success rate in percent.
    pub success_rate: f64,
    /// Results in execution order.
    pub results: &'a [TestResult],
}

impl<'a> JsonReport<'a> {
    /// Builds a report over a finished run.
    #[must_use]
    pub fn new(generated_at: impl Into<String>, api_root: &'a Url, results: &'a [TestResult]) -> Self {
        let summary = RunSummary::from_results(results);
        Self {
            generated_at: generated_at.into(),
            api_root,
            summary,
            success_rate: summary.success_rate(),
            results,
        }
    }

    /// Renders the report as 2-space indented JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, ReportError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"  ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}

/// Writes the report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn write_json_report(path: &Path, report: &JsonReport<'_>) -> Result<(), ReportError> {
    let bytes = report.to_pretty_json()?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "report written");
    Ok(())
}
