//! Display-safe snapshots of loaded records.
//!
//! Responsibilities:
//! - Convert a record into an ordered `Value` tree keyed by field name.
//! - Replace every `secret` leaf with the mask token.
//!
//! Does NOT handle:
//! - Text rendering beyond pretty JSON (`render`); callers may serialize the
//!   `Value` with any serde format.
//!
//! Invariants:
//! - The snapshot has the same shape as the record: one map entry per field,
//!   one list item per element.
//! - Masking is display-only; the record itself is never modified.

use std::convert::Infallible;

use crate::loader::ConfigError;
use crate::schema::visit::{Visitor, walk};
use crate::schema::{FieldDescriptor, Record, RecordList, Slot};
use crate::value::Value;

#[derive(Default)]
struct Masker {
    entries: Vec<(String, Value)>,
}

impl Masker {
    fn finish(self) -> Value {
        Value::Map(self.entries)
    }
}

impl Visitor for Masker {
    type Error = Infallible;

    fn scalar(&mut self, field: &FieldDescriptor, slot: &dyn Slot) -> Result<(), Infallible> {
        let value = if field.is_secret() {
            Value::masked()
        } else {
            slot.snapshot()
        };
        self.entries.push((field.name().to_string(), value));
        Ok(())
    }

    fn record(&mut self, field: &FieldDescriptor, record: &dyn Record) -> Result<(), Infallible> {
        self.entries.push((field.name().to_string(), mask(record)));
        Ok(())
    }

    fn records(
        &mut self,
        field: &FieldDescriptor,
        list: &dyn RecordList,
    ) -> Result<(), Infallible> {
        let items = (0..list.len())
            .filter_map(|index| list.element(index))
            .map(mask)
            .collect();
        self.entries.push((field.name().to_string(), Value::List(items)));
        Ok(())
    }
}

/// Snapshot `record` with secret leaves replaced by `****`.
pub fn mask(record: &dyn Record) -> Value {
    let mut masker = Masker::default();
    match walk(record, &mut masker) {
        Ok(()) => masker.finish(),
        Err(never) => match never {},
    }
}

/// Pretty JSON rendering of a masked snapshot.
pub fn render(record: &dyn Record) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(&mask(record))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::fixtures::{Database, Server, TestConfig, User};

    fn sample() -> TestConfig {
        TestConfig {
            server: Server {
                host: "localhost".to_string(),
                port: 8000,
                debug: true,
                allowed_origins: vec!["https://a.example".to_string()],
            },
            database: Database {
                user: "admin".to_string(),
                password: "hunter2".to_string(),
                max_conns: 10,
                timeout: 2.5,
            },
            users: vec![
                User {
                    name: "alice".to_string(),
                    role: "admin".to_string(),
                    token: "tok-a".to_string(),
                },
                User {
                    name: "bob".to_string(),
                    role: "user".to_string(),
                    token: String::new(),
                },
            ],
        }
    }

    #[test]
    fn test_mask_redacts_only_secret_leaves() {
        let config = sample();
        let snapshot = mask(&config);

        assert_eq!(snapshot.pointer("server.host").and_then(Value::as_str), Some("localhost"));
        assert_eq!(snapshot.pointer("server.port"), Some(&Value::Integer(8000)));
        assert_eq!(snapshot.pointer("database.password"), Some(&Value::masked()));
        assert_eq!(snapshot.pointer("users.0.token"), Some(&Value::masked()));
        // Empty secrets are masked too, so emptiness is not revealed.
        assert_eq!(snapshot.pointer("users.1.token"), Some(&Value::masked()));
        assert_eq!(snapshot.pointer("users.1.name").and_then(Value::as_str), Some("bob"));

        // The record itself is untouched.
        assert_eq!(config.database.password, "hunter2");
    }

    #[test]
    fn test_mask_preserves_shape_and_order() {
        let snapshot = mask(&sample());

        let Value::Map(top) = &snapshot else {
            panic!("snapshot root must be a map");
        };
        let keys: Vec<_> = top.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["server", "database", "users"]);

        let Some(Value::Map(database)) = snapshot.get("database") else {
            panic!("database must be a map");
        };
        let keys: Vec<_> = database.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["user", "password", "max_conns", "timeout"]);

        assert!(matches!(snapshot.get("users"), Some(Value::List(items)) if items.len() == 2));
    }

    #[test]
    fn test_mask_is_deterministic() {
        let config = sample();
        assert_eq!(mask(&config), mask(&config));
    }

    #[test]
    fn test_render_is_pretty_json_without_secrets() {
        let text = render(&sample()).unwrap();
        assert!(text.contains("\"host\": \"localhost\""), "{text}");
        assert!(text.contains("\"password\": \"****\""), "{text}");
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("tok-a"));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["users"][0]["name"], "alice");
        assert_eq!(parsed["database"]["timeout"], 2.5);
    }
}
