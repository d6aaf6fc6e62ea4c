//! Configuration loader for structured files and environment variables.
//!
//! Responsibilities:
//! - Load a record from `<app>.<ext>` and overlay environment variables.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce required fields after the merge.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Storing the loaded record process-wide (see `global.rs`).
//! - Rendering display snapshots (see `mask.rs`).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values.
//! - A missing file is not an error; an undecodable one is.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod file;
mod validate;

#[cfg(test)]
pub(crate) mod tests;

pub use builder::{ConfigLoader, SourceMode};
pub use env::{EnvBinding, EnvSource, ProcessEnv, env_bindings, env_var_or_none};
pub use error::ConfigError;
pub use file::{FileFormat, candidate_dirs, locate};
pub use validate::validate;
