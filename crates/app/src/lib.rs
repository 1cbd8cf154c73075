//! RepoHub probe - command-line wiring
//!
//! Parses the command line, loads settings, and drives the RepoHub suite
//! against the resolved API root. The binary is a thin shell over
//! [`execute`] so the whole flow can be exercised from tests.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use probe_application::{Clock, HttpClientError, TestRunner, repohub_suite};
use probe_infrastructure::{
    ConfigError, ConsoleReporter, JsonReport, ReportError, ReqwestHttpClient, SettingsLoader,
    SystemClock, resolve_api_root, write_json_report,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(name = "repohub-probe", version, about = "Black-box HTTP probe for the RepoHub API")]
pub struct Cli {
    /// Server base URL; `/api` is appended. Overrides the settings file.
    #[arg(long, env = "PROBE_BASE_URL")]
    pub base_url: Option<String>,

    /// Settings file with `KEY=value` lines.
    #[arg(long, env = "PROBE_ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,

    /// Write results and summary as JSON to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the case names in execution order and exit.
    #[arg(long)]
    pub list: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Errors that stop the probe before or after the run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Settings could not be loaded or yield no target.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] HttpClientError),

    /// The JSON report could not be written.
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

/// Initializes logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Runs the probe, writing the console report to `out`.
///
/// Returns whether every case passed. `--list` prints the case names and
/// returns `true` without loading settings.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded, the client cannot be
/// built, or the JSON report cannot be written.
pub async fn execute<W: Write>(cli: &Cli, mut out: W) -> Result<bool, AppError> {
    let cases = repohub_suite();

    if cli.list {
        for case in &cases {
            if let Err(e) = writeln!(out, "{}", case.name) {
                tracing::warn!(error = %e, "failed to write case list");
            }
        }
        return Ok(true);
    }

    let settings = SettingsLoader::load(&cli.env_file)?;
    let api_root = resolve_api_root(&settings, cli.base_url.as_deref())?;
    info!(%api_root, cases = cases.len(), "starting run");

    let client = ReqwestHttpClient::with_timeout(cli.timeout_secs.map(Duration::from_secs))?;
    let clock = Arc::new(SystemClock);
    let mut runner = TestRunner::new(Arc::new(client), Arc::clone(&clock), api_root, cases);

    let reporter = ConsoleReporter::new(out);
    let all_passed = runner.run_all_tests(&reporter).await;

    if let Some(path) = &cli.report {
        let generated_at = clock.now().to_rfc3339();
        let report = JsonReport::new(generated_at, runner.api_root(), runner.results());
        write_json_report(path, &report).await?;
    }

    Ok(all_passed)
}
