//! Probe Application - Ports and the test runner
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP client, clock, reporter)
//! - The fixed RepoHub suite and the runner that executes it
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod suite;
pub mod testing;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, HttpClient, HttpClientError, Reporter};
pub use suite::repohub_suite;
pub use testing::{TestRunner, evaluate, evaluate_all};
