//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every fatal load, validation, and retrieval failure.
//!
//! Does NOT handle:
//! - Non-fatal conditions (missing file, unset env key with a fallback); those
//!   are logged and never surfaced.
//!
//! Invariants:
//! - All error variants include context for debugging (field names, env keys, paths).
//! - Errors for secret fields never include the offending raw value.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::coerce::CoercionError;

/// Errors that can occur during configuration loading and retrieval.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", .path.display())]
    FileDecode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// `field` is the env tag (or identifier); `key` is the variable that held the value.
    #[error("Invalid value for {field} ({key}): {source}")]
    Coercion {
        field: String,
        key: String,
        #[source]
        source: CoercionError,
    },

    #[error("required field '{field}' is missing or empty{}", env_hint(.env_key.as_deref()))]
    MissingRequiredField {
        field: String,
        env_key: Option<String>,
    },

    #[error("Config not initialized. Call init first.")]
    NotInitialized,

    #[error("Invalid config type: requested {requested}, initialized with {installed}")]
    TypeMismatch {
        requested: &'static str,
        installed: &'static str,
    },

    #[error("Failed to render config snapshot: {0}")]
    Render(#[from] serde_json::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

fn env_hint(env_key: Option<&str>) -> String {
    env_key
        .map(|key| format!(" (set {key})"))
        .unwrap_or_default()
}

impl ConfigError {
    pub(crate) fn missing(field: &str, env_key: Option<String>) -> Self {
        ConfigError::MissingRequiredField {
            field: field.to_string(),
            env_key,
        }
    }
}
