//! Settings loader built on `dotenvy` iterators.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use probe_domain::{DomainError, Settings, api_root, parse_base_url};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Errors raised while loading settings or resolving the target.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file does not exist.
    #[error("settings file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The settings file exists but could not be read.
    #[error("failed to read {}: {message}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O message.
        message: String,
    },

    /// The settings do not yield a usable base URL.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Loads `Settings` from dotenv-style sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsLoader;

impl SettingsLoader {
    /// Loads settings from a file.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing file and `Read` for other I/O
    /// failures. Lines the parser rejects are skipped with a warning.
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        debug!(path = %path.display(), "loading settings file");
        let iter = dotenvy::from_path_iter(path).map_err(|e| map_error(e, path))?;
        let settings = collect(iter, path)?;
        debug!(keys = settings.len(), "settings loaded");
        Ok(settings)
    }

    /// Parses settings from any reader.
    ///
    /// # Errors
    ///
    /// Returns `Read` for I/O failures. Lines the parser rejects are
    /// skipped with a warning.
    pub fn parse<R: Read>(reader: R) -> Result<Settings, ConfigError> {
        collect(dotenvy::from_read_iter(reader), Path::new("<input>"))
    }
}

fn collect<R: Read>(iter: dotenvy::Iter<R>, path: &Path) -> Result<Settings, ConfigError> {
    let mut settings = Settings::new();
    for item in iter {
        match item {
            Ok((key, value)) => settings.set(key, value),
            // Unrelated keys may use any syntax; a broken base URL line
            // surfaces later as a missing setting.
            Err(dotenvy::Error::LineParse(content, position)) => {
                warn!(path = %path.display(), %content, position, "skipping malformed settings line");
            }
            Err(e) => return Err(map_error(e, path)),
        }
    }
    Ok(settings)
}

fn map_error(error: dotenvy::Error, path: &Path) -> ConfigError {
    match error {
        dotenvy::Error::Io(e) if e.kind() == io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        dotenvy::Error::Io(e) => ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
        other => ConfigError::Read {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

/// Resolves the API root from settings and an optional override.
///
/// The override wins when present; otherwise the first configured base
/// URL key is used. `/api` is appended to the base.
///
/// # Errors
///
/// Returns `Invalid` if no base URL is configured or it is not an
/// `http`/`https` URL.
pub fn resolve_api_root(settings: &Settings, base_url_override: Option<&str>) -> Result<Url, ConfigError> {
    let base = match base_url_override.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => parse_base_url(raw)?,
        None => settings.base_url()?,
    };
    Ok(api_root(&base)?)
}
