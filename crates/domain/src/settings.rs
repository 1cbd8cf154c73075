//! Probe settings
//!
//! Key/value configuration loaded from a settings file. Only the server's
//! base address is consulted; every other key is kept but ignored.

use std::collections::BTreeMap;

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Keys that may hold the server base URL, in lookup order.
pub const BASE_URL_KEYS: [&str; 2] = ["PROBE_BASE_URL", "NEXT_PUBLIC_BASE_URL"];

/// Path segment under which the API is mounted.
pub const API_PREFIX: &str = "api";

/// Loaded key/value settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Creates empty settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Sets a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Gets a value by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no keys were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the first non-empty base URL among `BASE_URL_KEYS`.
    ///
    /// # Errors
    ///
    /// Returns `MissingSetting` if none is set, or `InvalidUrl` if the value
    /// is not an absolute `http`/`https` URL.
    pub fn base_url(&self) -> DomainResult<Url> {
        let raw = BASE_URL_KEYS
            .iter()
            .find_map(|key| self.get(key).map(str::trim).filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                DomainError::MissingSetting(BASE_URL_KEYS.iter().map(ToString::to_string).collect())
            })?;
        parse_base_url(raw)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut settings = Self::new();
        for (key, value) in iter {
            settings.set(key, value);
        }
        settings
    }
}

/// Parses a server base URL, accepting only `http` and `https`.
///
/// # Errors
///
/// Returns `InvalidUrl` for malformed URLs or other schemes.
pub fn parse_base_url(raw: &str) -> DomainResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DomainError::InvalidUrl(format!(
            "unsupported scheme '{other}': {raw}"
        ))),
    }
}

/// Builds the API root (`<base>/api`) from a server base URL.
///
/// Trailing slashes on the base are ignored; a base that already ends in
/// `/api` is used as is.
///
/// # Errors
///
/// Returns `InvalidUrl` if the joined URL does not parse.
pub fn api_root(base: &Url) -> DomainResult<Url> {
    let trimmed = base.as_str().trim_end_matches('/');
    if trimmed.ends_with(&format!("/{API_PREFIX}")) {
        return Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(e.to_string()));
    }
    let joined = format!("{trimmed}/{API_PREFIX}");
    Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))
}
