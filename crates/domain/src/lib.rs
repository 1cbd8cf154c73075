//! Probe Domain - Core types for the RepoHub API probe
//!
//! This crate defines the request, response and test-result model used
//! by the probe. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use settings::{Settings, api_root, parse_base_url};
pub use testing::{Check, CheckOutcome, RunSummary, TestCase, TestResult};
