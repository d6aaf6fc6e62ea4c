//! Layered configuration loading.
//!
//! A record type declares its fields with `#[derive(Settings)]`; `ConfigLoader`
//! decodes `<app>.<ext>` into it, overlays `<APP>_...` environment variables,
//! applies declared defaults, and enforces required fields. `mask` produces a
//! display-safe snapshot with secret leaves redacted.
//!
//! ```ignore
//! #[derive(Debug, Default, serde::Deserialize, layerconf::Settings)]
//! #[serde(default)]
//! struct Server {
//!     #[setting(env = "HOST", required)]
//!     host: String,
//!     #[setting(default = "8080")]
//!     port: u16,
//! }
//!
//! let server: Server = layerconf::ConfigLoader::new("myapp").load()?;
//! ```

extern crate self as layerconf;

pub mod coerce;
pub mod constants;
pub mod global;
mod loader;
pub mod mask;
pub mod schema;
pub mod value;

pub use coerce::{CoercionError, coerce};
pub use global::{
    get, init, init_with_path, print_config, reload, try_get, try_init, try_init_with_path,
};
pub use layerconf_derive::Settings;
pub use loader::{
    ConfigError, ConfigLoader, EnvBinding, EnvSource, FileFormat, ProcessEnv, SourceMode,
    candidate_dirs, env_bindings, env_var_or_none, locate, validate,
};
pub use mask::{mask, render};
pub use schema::{
    FieldDescriptor, FieldKind, FieldMut, FieldRef, Record, RecordList, ScalarField, ScalarKind,
    Schema, Settings, Slot, schema_of,
};
pub use value::{MASK, Value};
