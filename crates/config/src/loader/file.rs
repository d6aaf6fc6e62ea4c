//! Structured file source for configuration.
//!
//! Responsibilities:
//! - Locate `<app>.<ext>` in the explicit base directory, or else the working
//!   directory, the executable's directory, and the user config directory.
//! - Decode the first match into the target record with the configured format.
//!
//! Does NOT handle:
//! - Environment overrides (see env.rs).
//! - Required-field validation (see validate.rs).
//!
//! Invariants:
//! - No candidate file is not an error: the record's default value is returned.
//! - A file that exists but cannot be read or decoded is fatal.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::DeserializeOwned;

use super::error::ConfigError;
use crate::schema::Settings;

/// Structured file format, selecting both the extension and the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Toml,
    Json,
    Yaml,
}

impl FileFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Toml => "toml",
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
        }
    }

    /// File name for `app_name` in this format.
    pub fn file_name(self, app_name: &str) -> String {
        format!("{app_name}.{}", self.extension())
    }

    fn decode<T: DeserializeOwned>(
        self,
        content: &str,
    ) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            FileFormat::Toml => toml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Yaml => serde_yaml::from_str(content)?,
        })
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toml" => Ok(FileFormat::Toml),
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            other => Err(format!(
                "unsupported config format '{other}' (expected toml, json or yaml)"
            )),
        }
    }
}

/// Directories searched for the config file, in priority order.
///
/// An explicit `base` replaces the default search: a directory is used as is,
/// a file path contributes its parent directory.
pub fn candidate_dirs(app_name: &str, base: Option<&Path>) -> Vec<PathBuf> {
    if let Some(base) = base {
        let dir = if base.is_file() {
            base.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            base.to_path_buf()
        };
        return vec![dir];
    }

    let mut dirs = Vec::new();
    match std::env::current_dir() {
        Ok(cwd) => dirs.push(cwd),
        Err(e) => tracing::warn!(error = %e, "Unable to determine working directory"),
    }
    match std::env::current_exe() {
        Ok(exe) => {
            if let Some(parent) = exe.parent() {
                dirs.push(parent.to_path_buf());
            }
        }
        Err(e) => tracing::warn!(error = %e, "Unable to determine executable path"),
    }
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", app_name) {
        dirs.push(proj_dirs.config_dir().to_path_buf());
    }
    dirs
}

/// Path of the first existing config file for `app_name`, if any.
pub fn locate(app_name: &str, format: FileFormat, base: Option<&Path>) -> Option<PathBuf> {
    let file_name = format.file_name(app_name);
    candidate_dirs(app_name, base)
        .into_iter()
        .map(|dir| dir.join(&file_name))
        .find(|path| {
            tracing::debug!(path = %path.display(), "Probing config file");
            path.is_file()
        })
}

/// Load the file layer for `T`, or `T::default()` when no file exists.
pub(crate) fn load_file<T: Settings>(
    app_name: &str,
    format: FileFormat,
    base: Option<&Path>,
) -> Result<T, ConfigError> {
    let Some(path) = locate(app_name, format, base) else {
        tracing::debug!(app = app_name, "No config file found, continuing without file layer");
        return Ok(T::default());
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Config file disappeared before read");
            return Ok(T::default());
        }
        Err(source) => return Err(ConfigError::FileRead { path, source }),
    };

    let record = format
        .decode(&content)
        .map_err(|source| ConfigError::FileDecode {
            path: path.clone(),
            source,
        })?;
    tracing::info!(path = %path.display(), "Config file loaded");
    Ok(record)
}
