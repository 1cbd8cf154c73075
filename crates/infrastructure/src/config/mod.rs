//! Settings-file loading
//!
//! The probe reads its target from a dotenv-style file: one `KEY=value`
//! per line, `#` comments, optional quotes. Parsing is delegated to
//! `dotenvy`; values never leak into the process environment. Lines the
//! parser rejects are skipped with a warning.

mod settings_loader;

pub use settings_loader::{ConfigError, SettingsLoader, resolve_api_root};
