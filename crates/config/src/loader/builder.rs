//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges the file layer and the
//!   environment layer into one record.
//! - Decide between hybrid and environment-only mode.
//! - Run required-field validation on the merged record.
//!
//! Does NOT handle:
//! - Environment key construction and list probing (delegated to env.rs).
//! - File discovery and decoding (delegated to file.rs).
//! - Process-wide storage of the loaded record (see global.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values, field by field.
//! - Defaults are applied before required-field validation in every mode.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::fmt;
use std::path::{Path, PathBuf};

use super::env::{EnvSource, ProcessEnv, apply_env, join_key};
use super::error::ConfigError;
use super::file::{FileFormat, load_file};
use super::validate::validate;
use crate::constants::{CONFIG_TYPE_SUFFIX, DOTENV_DISABLED_VAR, ENV_ONLY_MODE};
use crate::schema::{Settings, normalize_segment};

/// Which sources a load consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// File first, then environment overrides.
    Hybrid,
    /// Environment only; required fields fail as soon as they resolve to zero.
    EnvOnly,
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Hybrid => f.write_str("hybrid"),
            SourceMode::EnvOnly => f.write_str("env"),
        }
    }
}

/// Configuration loader that builds a record from a file and the environment.
pub struct ConfigLoader {
    app_name: String,
    base_path: Option<PathBuf>,
    format: FileFormat,
    mode: Option<SourceMode>,
    env: Box<dyn EnvSource>,
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("app_name", &self.app_name)
            .field("base_path", &self.base_path)
            .field("format", &self.format)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl ConfigLoader {
    /// Create a loader for `app_name`, reading the process environment.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            base_path: None,
            format: FileFormat::default(),
            mode: None,
            env: Box::new(ProcessEnv),
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Search for the config file next to `path` only.
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    /// Force a source mode instead of reading `<APP>_CONFIG_TYPE`.
    pub fn with_mode(mut self, mode: SourceMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Read environment values from `env` instead of the process environment.
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Root of every environment key: the normalized app name.
    pub fn env_prefix(&self) -> String {
        normalize_segment(&self.app_name)
    }

    /// The mode a load will run in.
    pub fn source_mode(&self) -> SourceMode {
        if let Some(mode) = self.mode {
            return mode;
        }
        let key = join_key(&self.env_prefix(), CONFIG_TYPE_SUFFIX);
        match self.env.var(&key) {
            Some(value) if value.trim().eq_ignore_ascii_case(ENV_ONLY_MODE) => SourceMode::EnvOnly,
            _ => SourceMode::Hybrid,
        }
    }

    /// Load, merge, and validate a `T`.
    pub fn load<T: Settings>(&self) -> Result<T, ConfigError> {
        let mode = self.source_mode();
        let prefix = self.env_prefix();

        let mut record = match mode {
            SourceMode::Hybrid => {
                load_file::<T>(&self.app_name, self.format, self.base_path.as_deref())?
            }
            SourceMode::EnvOnly => {
                tracing::debug!(
                    app = %self.app_name,
                    "Environment-only mode, skipping config file"
                );
                T::default()
            }
        };

        let strict = mode == SourceMode::EnvOnly;
        let observed = apply_env(&mut record, self.env.as_ref(), &prefix, strict)?;
        tracing::info!(
            app = %self.app_name,
            mode = %mode,
            overrides = observed,
            "Environment layer applied"
        );

        if let Err(e) = validate(&record) {
            tracing::warn!(app = %self.app_name, error = %e, "Config validation failed");
            return Err(e);
        }
        Ok(record)
    }
}
