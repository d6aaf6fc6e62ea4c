//! Tests for the layered configuration loader.
//!
//! Responsibilities:
//! - Test file and environment precedence, preservation, and defaulting.
//! - Test list-of-record reconstruction from indexed variables.
//! - Test source-mode selection and environment-only failures.
//! - Test required-field and coercion errors, file formats, and dotenv loading.
//!
//! Does NOT handle:
//! - Coercion rules in isolation (tested in coerce.rs).
//! - Masking (tested in mask.rs).
//!
//! Invariants:
//! - Loader tests inject environment values through a `HashMap` source; only
//!   tests touching the process environment or cwd take `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub mod basic_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Build an in-memory environment from key/value pairs.
pub fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Write `content` to `dir/name` and return the path.
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write config fixture");
    path
}
