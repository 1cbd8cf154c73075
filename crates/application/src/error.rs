//! Application error types

use probe_domain::DomainError;
use thiserror::Error;

/// Errors raised while running a single case.
///
/// These never abort a run: the runner records them as a failed result.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
