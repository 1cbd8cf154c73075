//! RepoHub probe - entry point
//!
//! Exit code 0 when every case passed, 1 otherwise or on a configuration
//! failure.

use std::process::ExitCode;

use clap::Parser;
use repohub_probe::{Cli, execute, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli, std::io::stdout()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "probe aborted");
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
