//! Process-wide configuration handle.
//!
//! Responsibilities:
//! - Hold at most one loaded record for the whole process.
//! - Provide the guarded entry points (`init*`, first success wins) and the
//!   unguarded `reload` path that always performs a fresh load.
//! - Retrieve the record by type and print a masked snapshot.
//!
//! Does NOT handle:
//! - Loading logic itself (see `loader`); `ConfigLoader::load` remains the
//!   primary API and this module only wraps it.
//!
//! Invariants:
//! - The installed record is immutable; callers share it through `Arc`.
//! - Guarded initialization holds the write lock for the whole load, so
//!   concurrent `init` calls load exactly once.
//! - A failed load never replaces an installed record.

use std::any::{Any, type_name};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::loader::{ConfigError, ConfigLoader};
use crate::mask::mask;
use crate::schema::Settings;
use crate::value::Value;

struct Installed {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    snapshot: Value,
}

impl Installed {
    fn new<T: Settings>(record: Arc<T>) -> Self {
        Self {
            snapshot: mask(record.as_ref()),
            type_name: type_name::<T>(),
            value: record,
        }
    }
}

static CURRENT: RwLock<Option<Installed>> = RwLock::new(None);

fn read() -> RwLockReadGuard<'static, Option<Installed>> {
    CURRENT.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Option<Installed>> {
    CURRENT.write().unwrap_or_else(PoisonError::into_inner)
}

fn guarded_init<T: Settings>(loader: ConfigLoader) -> Result<(), ConfigError> {
    let mut current = write();
    if current.is_some() {
        tracing::debug!(app = loader.app_name(), "Config already initialized, skipping load");
        return Ok(());
    }
    let record = loader.load::<T>()?;
    *current = Some(Installed::new(Arc::new(record)));
    Ok(())
}

/// Load `T` for `app_name` unless a config is already installed.
pub fn try_init<T: Settings>(app_name: &str) -> Result<(), ConfigError> {
    guarded_init::<T>(ConfigLoader::new(app_name))
}

/// Like [`try_init`], searching for the file next to `path` only.
pub fn try_init_with_path<T: Settings>(
    app_name: &str,
    path: impl AsRef<Path>,
) -> Result<(), ConfigError> {
    guarded_init::<T>(ConfigLoader::new(app_name).with_base_path(path.as_ref()))
}

/// Load `T` for `app_name` unless a config is already installed.
///
/// # Panics
///
/// Panics if the load fails.
pub fn init<T: Settings>(app_name: &str) {
    if let Err(e) = try_init::<T>(app_name) {
        panic!("Config load failed: {e}");
    }
}

/// Like [`init`], searching for the file next to `path` only.
///
/// # Panics
///
/// Panics if the load fails.
pub fn init_with_path<T: Settings>(app_name: &str, path: impl AsRef<Path>) {
    if let Err(e) = try_init_with_path::<T>(app_name, path) {
        panic!("Config load failed: {e}");
    }
}

/// Always load through `loader` and replace the installed config on success.
///
/// Concurrent callers race on which result stays installed.
pub fn reload<T: Settings>(loader: &ConfigLoader) -> Result<Arc<T>, ConfigError> {
    let record = Arc::new(loader.load::<T>()?);
    *write() = Some(Installed::new(Arc::clone(&record)));
    Ok(record)
}

/// The installed config as `T`.
pub fn try_get<T: Settings>() -> Result<Arc<T>, ConfigError> {
    let current = read();
    let installed = current.as_ref().ok_or(ConfigError::NotInitialized)?;
    Arc::clone(&installed.value)
        .downcast::<T>()
        .map_err(|_| ConfigError::TypeMismatch {
            requested: type_name::<T>(),
            installed: installed.type_name,
        })
}

/// The installed config as `T`.
///
/// # Panics
///
/// Panics if nothing is installed or the installed config is not a `T`.
pub fn get<T: Settings>() -> Arc<T> {
    match try_get::<T>() {
        Ok(config) => config,
        Err(e) => panic!("{e}"),
    }
}

/// Masked snapshot of the installed config.
pub fn snapshot() -> Result<Value, ConfigError> {
    read()
        .as_ref()
        .map(|installed| installed.snapshot.clone())
        .ok_or(ConfigError::NotInitialized)
}

/// Pretty JSON of the masked snapshot.
pub fn render() -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(&snapshot()?)?)
}

/// Print the masked snapshot to stdout.
pub fn print_config() {
    match render() {
        Ok(text) => println!("config:\n{text}"),
        Err(e) => tracing::warn!(error = %e, "Failed to print config"),
    }
}

#[cfg(test)]
pub(crate) fn reset() {
    *write() = None;
}
