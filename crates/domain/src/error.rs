//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No base URL could be found among the known settings keys.
    #[error("missing setting: none of [{}] is set", .0.join(", "))]
    MissingSetting(Vec<String>),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
