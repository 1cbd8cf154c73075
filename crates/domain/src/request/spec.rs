//! Request specification type

use url::Url;

use super::{Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Complete specification for one HTTP call against the API.
///
/// The `path` is relative to the API root (for example `/comments`), so the
/// same spec can be sent to any configured server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Path below the API root; empty for the root itself
    pub path: String,
    /// Query parameters appended to the URL
    pub query: QueryParams,
    /// HTTP headers
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a request with no query, headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: Headers::new(),
            body: RequestBody::None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request carrying a JSON body.
    #[must_use]
    pub fn post_json(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(RequestBody::json(body))
    }

    /// Creates a PUT request carrying a JSON body.
    #[must_use]
    pub fn put_json(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(HttpMethod::Put, path).with_body(RequestBody::json(body))
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Creates an OPTIONS (preflight) request.
    #[must_use]
    pub fn options(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Options, path)
    }

    /// Appends a query parameter (builder pattern).
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Sets a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(Header::new(name, value));
        self
    }

    /// Sets the body (builder pattern).
    ///
    /// A JSON body also sets `Content-Type` unless one is already present.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        if let Some(content_type) = body.content_type() {
            if !self.headers.contains("Content-Type") {
                self.headers.insert(Header::new("Content-Type", content_type));
            }
        }
        self.body = body;
        self
    }

    /// Resolves the absolute URL of this request below `api_root`.
    ///
    /// Query values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the joined URL does not parse or
    /// is not an `http`/`https` URL.
    pub fn resolve_url(&self, api_root: &Url) -> DomainResult<Url> {
        let root = api_root.as_str().trim_end_matches('/');
        let joined = if self.path.is_empty() || self.path.starts_with('/') {
            format!("{root}{}", self.path)
        } else {
            format!("{root}/{}", self.path)
        };

        let mut url = Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!("not an HTTP URL: {joined}")));
        }
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in self.query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }
        Ok(url)
    }
}
