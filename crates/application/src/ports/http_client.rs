//! HTTP Client port

use std::future::Future;

use probe_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;
use url::Url;

/// Transport-level failures. Any HTTP status, including 4xx and 5xx, is a
/// response rather than an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The host name could not be resolved.
    #[error("could not resolve {host}: {message}")]
    DnsError {
        /// Target host.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    Body(String),

    /// Anything else reported by the client library.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Implementations keep one connection pool for the whole run.
pub trait HttpClient: Send + Sync {
    /// Sends `request` to the already-resolved `url`.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures; every status code is
    /// returned as a `ResponseSpec`.
    fn execute(
        &self,
        request: &RequestSpec,
        url: &Url,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}
