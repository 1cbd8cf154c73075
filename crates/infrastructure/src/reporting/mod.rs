//! Run reporting
//!
//! The console reporter streams progress as cases finish; the JSON report
//! is written once, after the run, for archival.

mod console;
mod json_report;

pub use console::ConsoleReporter;
pub use json_report::{JsonReport, ReportError, write_json_report};
