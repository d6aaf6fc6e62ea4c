//! Schema descriptors and the per-type schema cache.
//!
//! Responsibilities:
//! - Describe each declared field of a record type (`FieldDescriptor`).
//! - Memoize one `Schema` per record type for the lifetime of the process.
//! - Expose the traversal traits (`Record`, `Slot`, `RecordList`) that loaders,
//!   the validator, and the masker share.
//!
//! Does NOT handle:
//! - Generating descriptors from struct definitions (see the `layerconf-derive` crate).
//! - Reading values from any source (see `loader`).
//!
//! Invariants:
//! - Field order in a `Schema` is declaration order.
//! - A type's `Schema` is computed at most once; concurrent first requests
//!   receive the same `Arc`.

mod record;
mod slot;
pub mod visit;

use std::any::{TypeId, type_name};
use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

pub use record::{FieldMut, FieldRef, Record, RecordList, Settings};
pub use slot::{ScalarField, Slot};

/// Kind of a scalar leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Bool,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "boolean",
        };
        f.write_str(name)
    }
}

/// Semantic type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    List(ScalarKind),
    Record,
    Records,
}

impl FieldKind {
    /// True for kinds that hold a single leaf value read from one env key.
    pub fn is_leaf(self) -> bool {
        matches!(self, FieldKind::Scalar(_) | FieldKind::List(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(kind) => write!(f, "{kind}"),
            FieldKind::List(kind) => write!(f, "list of {kind}"),
            FieldKind::Record => f.write_str("record"),
            FieldKind::Records => f.write_str("list of records"),
        }
    }
}

/// Binding metadata for one declared field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: FieldKind,
    env: Option<&'static str>,
    default: Option<&'static str>,
    required: bool,
    secret: bool,
    nested: Option<fn() -> Arc<Schema>>,
}

impl FieldDescriptor {
    /// Descriptor for a scalar or list-of-scalar field.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            env: None,
            default: None,
            required: false,
            secret: false,
            nested: None,
        }
    }

    /// Descriptor for a nested record field.
    pub const fn record(name: &'static str, schema: fn() -> Arc<Schema>) -> Self {
        let mut descriptor = Self::new(name, FieldKind::Record);
        descriptor.nested = Some(schema);
        descriptor
    }

    /// Descriptor for a list-of-records field; `schema` describes one element.
    pub const fn records(name: &'static str, schema: fn() -> Arc<Schema>) -> Self {
        let mut descriptor = Self::new(name, FieldKind::Records);
        descriptor.nested = Some(schema);
        descriptor
    }

    /// Set the environment key fragment for this field.
    pub const fn env(mut self, tag: &'static str) -> Self {
        self.env = Some(tag);
        self
    }

    /// Set the textual default applied when no source provides a value.
    pub const fn default_value(mut self, text: &'static str) -> Self {
        self.default = Some(text);
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn env_tag(&self) -> Option<&'static str> {
        self.env
    }

    pub fn default_text(&self) -> Option<&'static str> {
        self.default
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Schema of the nested record (or list element) for record kinds.
    pub fn nested_schema(&self) -> Option<Arc<Schema>> {
        self.nested.map(|schema| schema())
    }

    /// Name used in error messages: the env tag if declared, else the identifier.
    pub fn display_name(&self) -> &'static str {
        self.env.unwrap_or(self.name)
    }

    /// Key fragment used when building environment variable names.
    pub fn env_segment(&self) -> String {
        normalize_segment(self.env.unwrap_or(self.name))
    }
}

/// Uppercase a key fragment and replace hyphens with underscores.
pub fn normalize_segment(segment: &str) -> String {
    segment.to_uppercase().replace('-', "_")
}

/// Ordered field descriptors of one record type.
#[derive(Debug)]
pub struct Schema {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(type_name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { type_name, fields }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

static SCHEMAS: LazyLock<DashMap<TypeId, Arc<Schema>>> = LazyLock::new(DashMap::new);

/// Return the cached schema for `T`, computing it on first use.
pub fn schema_of<T: Settings>() -> Arc<Schema> {
    let id = TypeId::of::<T>();
    if let Some(schema) = SCHEMAS.get(&id) {
        return Arc::clone(schema.value());
    }

    // The shard stays write-locked while `fields()` runs, so racing callers
    // wait for this entry instead of building their own.
    let entry = SCHEMAS.entry(id).or_insert_with(|| {
        tracing::debug!(record = type_name::<T>(), "Building schema");
        Arc::new(Schema::new(type_name::<T>(), T::fields()))
    });
    Arc::clone(entry.value())
}
