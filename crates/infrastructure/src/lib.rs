//! Probe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus settings-file loading.

pub mod adapters;
pub mod config;
pub mod reporting;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{ConfigError, SettingsLoader, resolve_api_root};
pub use reporting::{ConsoleReporter, JsonReport, ReportError, write_json_report};
