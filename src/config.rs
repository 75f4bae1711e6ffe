//! Runtime configuration: reference secret and countdown lengths.
//!
//! Read once at startup from an optional JSON file and never mutated
//! afterwards. Every field has a default, so an absent file or an empty
//! object both yield a usable configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Secret accepted when no configuration overrides it.
pub const DEFAULT_SECRET: &str = "password";

/// Seconds the entry screen waits for input before giving up.
pub const DEFAULT_ENTRY_TIMEOUT_SECS: u32 = 100;

/// Seconds the success screen stays up before exiting.
pub const DEFAULT_EXIT_COUNTDOWN_SECS: u32 = 3;

/// Directory name under the platform config dir.
const APP_DIR: &str = "passgate";

/// File name inside [`APP_DIR`].
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// TYPES
// ============================================================================

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The password the entry screen accepts.
    pub secret: String,
    /// Inactivity timeout on the entry screen, in seconds.
    pub entry_timeout_secs: u32,
    /// Countdown shown after a successful load, in seconds.
    pub exit_countdown_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            entry_timeout_secs: DEFAULT_ENTRY_TIMEOUT_SECS,
            exit_countdown_secs: DEFAULT_EXIT_COUNTDOWN_SECS,
        }
    }
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A secret must contain at least one character.
    #[error("config secret must not be empty")]
    EmptySecret,
}

// ============================================================================
// LOADING
// ============================================================================

/// Default config location: `<config_dir>/passgate/config.json`.
///
/// None when the platform has no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Parse configuration from JSON text.
pub fn parse(text: &str, origin: &Path) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Read configuration from a file that must exist.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, path)
}

/// Resolve configuration for this run.
///
/// An explicit path must exist. Otherwise the default location is used
/// if present, falling back to built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_file(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_file(&path),
        _ => Ok(Config::default()),
    }
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = Config::default();
        assert_eq!(config.secret, "password");
        assert_eq!(config.entry_timeout_secs, 100);
        assert_eq!(config.exit_countdown_secs, 3);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = parse("{}", Path::new("inline")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_object_overrides_only_given_fields() {
        let config = parse(r#"{"secret": "hunter2"}"#, Path::new("inline")).unwrap();
        assert_eq!(config.secret, "hunter2");
        assert_eq!(config.entry_timeout_secs, DEFAULT_ENTRY_TIMEOUT_SECS);
        assert_eq!(config.exit_countdown_secs, DEFAULT_EXIT_COUNTDOWN_SECS);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = parse(r#"{"secret": ""}"#, Path::new("inline")).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySecret));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse(r#"{"secrte": "typo"}"#, Path::new("inline")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn malformed_json_reports_origin() {
        let err = parse("{not json", Path::new("/etc/passgate.json")).unwrap_err();
        assert!(err.to_string().contains("/etc/passgate.json"));
    }

    #[test]
    fn load_file_reads_json_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"secret": "open sesame", "entry_timeout_secs": 30, "exit_countdown_secs": 1}}"#
        )
        .unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(
            config,
            Config {
                secret: "open sesame".into(),
                entry_timeout_secs: 30,
                exit_countdown_secs: 1,
            }
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn default_path_ends_with_app_file() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("passgate/config.json"));
        }
    }
}
