//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. One `reqwest::Client` is
//! shared by every case of a run, so connections are pooled.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use probe_application::{HttpClient, HttpClientError};
use probe_domain::{HttpMethod, RequestBody, RequestSpec, ResponseSpec};
use reqwest::{Client, Method};
use tracing::trace;
use url::Url;

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestHttpClient {
    /// Creates a client with reqwest's defaults and no request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_timeout(None)
    }

    /// Creates a client with an optional per-request timeout.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "repohub-probe/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, HttpClientError> {
        let mut builder = Client::builder()
            .user_agent(concat!("repohub-probe/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Serializes the request body.
    fn encode_body(body: &RequestBody) -> Result<Option<Vec<u8>>, HttpClientError> {
        match body {
            RequestBody::None => Ok(None),
            RequestBody::Json(value) => serde_json::to_vec(value)
                .map(Some)
                .map_err(|e| HttpClientError::InvalidBody(e.to_string())),
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    ///
    /// reqwest's own message is generic ("error sending request"); the cause
    /// is in the source chain, so classification looks at the full chain.
    fn map_error(&self, error: &reqwest::Error) -> HttpClientError {
        let message = error_chain(error);

        if error.is_timeout() {
            let timeout_ms = self
                .timeout
                .map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            let lowered = message.to_lowercase();
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(message)
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec, url: &Url) -> Result<ResponseSpec, HttpClientError> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url.clone());
        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }
        if let Some(bytes) = Self::encode_body(&request.body)? {
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Body(error_chain(&e)))?;
        let duration = start.elapsed();
        trace!(%url, status, bytes = body.len(), "response body read");

        Ok(ResponseSpec::new(status, headers, &body, duration))
    }
}

/// Joins an error and its sources into one line.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
