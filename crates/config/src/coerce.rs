//! String-to-value coercion for scalar and list fields.
//!
//! Responsibilities:
//! - Convert one raw string (from the environment or a declared default) into a
//!   `Value` of the requested `FieldKind`.
//!
//! Does NOT handle:
//! - Deciding whether a value is present (callers skip coercion for absent keys).
//! - Narrowing to the concrete Rust type (see `schema/slot.rs`).
//!
//! Invariants:
//! - Empty input yields the kind's zero value, never an error.
//! - List elements are trimmed; elements empty after trimming are dropped.
//! - Booleans accept only `true`/`false`, case-insensitive.

use thiserror::Error;

use crate::schema::{FieldKind, ScalarKind};
use crate::value::Value;

/// A raw string could not be converted to the target kind.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot convert '{raw}' to {target}")]
pub struct CoercionError {
    raw: String,
    target: FieldKind,
}

impl CoercionError {
    pub fn new(raw: impl Into<String>, target: FieldKind) -> Self {
        Self {
            raw: raw.into(),
            target,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn target(&self) -> FieldKind {
        self.target
    }

    /// Copy of this error with the raw text replaced by the mask token.
    pub fn redacted(&self) -> Self {
        Self::new(crate::value::MASK, self.target)
    }
}

/// Coerce `raw` into a value of `target` kind.
pub fn coerce(raw: &str, target: FieldKind) -> Result<Value, CoercionError> {
    match target {
        FieldKind::Scalar(kind) => {
            coerce_scalar(raw, kind).ok_or_else(|| CoercionError::new(raw, target))
        }
        FieldKind::List(kind) => raw
            .split(',')
            .map(str::trim)
            .filter(|element| !element.is_empty())
            .map(|element| coerce_scalar(element, kind))
            .collect::<Option<Vec<_>>>()
            .map(Value::List)
            .ok_or_else(|| CoercionError::new(raw, target)),
        FieldKind::Record | FieldKind::Records => Err(CoercionError::new(raw, target)),
    }
}

fn coerce_scalar(raw: &str, kind: ScalarKind) -> Option<Value> {
    if raw.is_empty() {
        return Some(zero_value(kind));
    }
    match kind {
        ScalarKind::String => Some(Value::String(raw.to_string())),
        ScalarKind::Integer => {
            let text = raw.trim();
            text.parse()
                .map(Value::Integer)
                .or_else(|_| text.parse().map(Value::Unsigned))
                .ok()
        }
        ScalarKind::Float => raw.trim().parse().ok().map(Value::Float),
        ScalarKind::Bool => {
            let text = raw.trim();
            if text.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
    }
}

/// The zero value of a scalar kind.
pub fn zero_value(kind: ScalarKind) -> Value {
    match kind {
        ScalarKind::String => Value::String(String::new()),
        ScalarKind::Integer => Value::Integer(0),
        ScalarKind::Float => Value::Float(0.0),
        ScalarKind::Bool => Value::Bool(false),
    }
}
