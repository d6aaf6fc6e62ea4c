//! Generic value tree used for coerced leaves and masked snapshots.
//!
//! Responsibilities:
//! - Represent a coerced scalar or list value independent of the target Rust type.
//! - Represent a display snapshot of a whole record (ordered map of children).
//! - Define the zero-value policy shared by defaulting and required-field checks.
//!
//! Does NOT handle:
//! - Parsing raw strings into values (see `coerce.rs`).
//! - Walking records (see `schema/visit.rs` and `mask.rs`).
//!
//! Invariants:
//! - `Map` entries keep the declaration order of the record they were built from.
//! - Serialization of `Map` preserves that order.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Placeholder emitted in place of secret leaves.
pub const MASK: &str = "****";

/// A tagged value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    /// Integers above `i64::MAX`; anything smaller is an `Integer`.
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    /// The mask token as a string leaf.
    pub fn masked() -> Self {
        Value::String(MASK.to_string())
    }

    /// Returns true if this value is the zero value of its kind.
    ///
    /// Strings and lists are zero when empty, numbers when equal to zero,
    /// booleans when false, and maps when every child is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::String(s) => s.is_empty(),
            Value::Integer(n) => *n == 0,
            Value::Unsigned(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Bool(b) => !b,
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.iter().all(|(_, v)| v.is_zero()),
        }
    }

    /// Look up a direct child of a map value by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Follow a dotted path (`"server.host"`, `"users.0.name"`) through maps and lists.
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(self, |current, segment| match current {
            Value::Map(_) => current.get(segment),
            Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Unsigned(n) => serializer.serialize_u64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::Map(vec![
            (
                "server".to_string(),
                Value::Map(vec![
                    ("host".to_string(), Value::String("localhost".to_string())),
                    ("port".to_string(), Value::Integer(8000)),
                ]),
            ),
            (
                "users".to_string(),
                Value::List(vec![Value::Map(vec![(
                    "name".to_string(),
                    Value::String("alice".to_string()),
                )])]),
            ),
        ])
    }

    #[test]
    fn test_zero_policy() {
        assert!(Value::String(String::new()).is_zero());
        assert!(Value::Integer(0).is_zero());
        assert!(Value::Float(0.0).is_zero());
        assert!(Value::Bool(false).is_zero());
        assert!(Value::List(vec![]).is_zero());
        assert!(Value::Map(vec![("a".into(), Value::Integer(0))]).is_zero());

        assert!(!Value::String("x".into()).is_zero());
        assert!(!Value::Float(0.5).is_zero());
        assert!(!Value::Bool(true).is_zero());
        assert!(!Value::List(vec![Value::Integer(0)]).is_zero());
        assert!(!Value::Map(vec![("a".into(), Value::Integer(1))]).is_zero());
    }

    #[test]
    fn test_pointer_walks_maps_and_lists() {
        let value = sample();
        assert_eq!(
            value.pointer("server.host").and_then(Value::as_str),
            Some("localhost")
        );
        assert_eq!(value.pointer("server.port"), Some(&Value::Integer(8000)));
        assert_eq!(
            value.pointer("users.0.name").and_then(Value::as_str),
            Some("alice")
        );
        assert!(value.pointer("users.1.name").is_none());
        assert!(value.pointer("server.host.extra").is_none());
    }

    #[test]
    fn test_serialize_preserves_declaration_order() {
        let value = Value::Map(vec![
            ("zeta".to_string(), Value::Integer(1)),
            ("alpha".to_string(), Value::Bool(true)),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":true}"#);
    }
}
