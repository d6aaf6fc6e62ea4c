//! Environment variable source for configuration.
//!
//! Responsibilities:
//! - Abstract key lookup behind `EnvSource` so the process environment can be
//!   swapped for an in-memory map.
//! - Walk a record's schema, build env keys from the prefix chain, and overwrite,
//!   keep, or default each leaf.
//! - Rebuild lists of records from contiguous `<KEY>_<i>_<FIELD>` variables.
//! - Enumerate the variables a schema binds (`env_bindings`).
//!
//! Does NOT handle:
//! - Reading the structured file (see file.rs).
//! - Post-merge required-field checks in hybrid mode (see validate.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - A present environment value always overwrites the current field value.
//! - An absent key leaves a non-zero field untouched; a zero field takes the
//!   declared default, if any.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - A list of records is replaced wholesale only when index 0 has at least one
//!   present key; probing stops at the first index with none.

use std::collections::HashMap;
use std::hash::BuildHasher;

use super::error::ConfigError;
use super::validate::validate;
use crate::schema::visit::{VisitorMut, walk_mut};
use crate::schema::{FieldDescriptor, FieldKind, Record, RecordList, Schema, Settings, Slot};

/// A provider of raw environment values.
pub trait EnvSource {
    /// Raw value for `key`, or `None` if unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    present(ProcessEnv.var(key))
}

fn present(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Join a key prefix and a normalized segment with `_`.
pub(crate) fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}_{segment}")
    }
}

/// Apply environment values to `record`, using `prefix` as the key root.
///
/// With `strict` set, a required leaf that is still zero after env and default
/// resolution fails immediately instead of waiting for post-merge validation.
pub(crate) fn apply_env(
    record: &mut dyn Record,
    env: &dyn EnvSource,
    prefix: &str,
    strict: bool,
) -> Result<bool, ConfigError> {
    let mut pass = EnvPass::new(Some(env), prefix.to_string(), strict);
    walk_mut(record, &mut pass)?;
    Ok(pass.observed)
}

struct EnvPass<'a> {
    /// `None` fills declared defaults without reading any variable.
    env: Option<&'a dyn EnvSource>,
    prefix: String,
    strict: bool,
    /// Whether any key under `prefix` was present.
    observed: bool,
}

impl<'a> EnvPass<'a> {
    fn new(env: Option<&'a dyn EnvSource>, prefix: String, strict: bool) -> Self {
        Self {
            env,
            prefix,
            strict,
            observed: false,
        }
    }

    fn key_for(&self, field: &FieldDescriptor) -> String {
        join_key(&self.prefix, &field.env_segment())
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.env.and_then(|env| present(env.var(key)))
    }
}

fn assign(
    field: &FieldDescriptor,
    key: &str,
    slot: &mut dyn Slot,
    raw: &str,
) -> Result<(), ConfigError> {
    slot.assign(raw).map_err(|source| ConfigError::Coercion {
        field: field.display_name().to_string(),
        key: key.to_string(),
        source: if field.is_secret() {
            source.redacted()
        } else {
            source
        },
    })
}

impl VisitorMut for EnvPass<'_> {
    type Error = ConfigError;

    fn scalar(&mut self, field: &FieldDescriptor, slot: &mut dyn Slot) -> Result<(), ConfigError> {
        let key = self.key_for(field);

        if let Some(raw) = self.lookup(&key) {
            tracing::debug!(key = %key, "Applying environment override");
            self.observed = true;
            assign(field, &key, slot, &raw)?;
        } else if slot.is_zero()
            && let Some(default) = field.default_text()
        {
            tracing::debug!(key = %key, "Applying declared default");
            assign(field, &key, slot, default)?;
        }

        if self.strict && field.is_required() && slot.is_zero() {
            return Err(ConfigError::missing(field.display_name(), Some(key)));
        }
        Ok(())
    }

    fn record(
        &mut self,
        field: &FieldDescriptor,
        record: &mut dyn Record,
    ) -> Result<(), ConfigError> {
        let mut child = EnvPass::new(self.env, self.key_for(field), self.strict);
        walk_mut(record, &mut child)?;
        self.observed |= child.observed;
        Ok(())
    }

    fn records(
        &mut self,
        field: &FieldDescriptor,
        list: &mut dyn RecordList,
    ) -> Result<(), ConfigError> {
        let key = self.key_for(field);

        if let Some(env) = self.env {
            let existing = list.len();
            let mut built = 0usize;

            loop {
                let element = list.push_default();
                let mut pass = EnvPass::new(Some(env), format!("{key}_{built}"), false);
                walk_mut(element, &mut pass)?;
                if !pass.observed {
                    list.pop();
                    break;
                }
                if self.strict {
                    validate(element)?;
                }
                built += 1;
            }

            if built > 0 {
                tracing::debug!(key = %key, count = built, "Replacing list from environment");
                list.remove_front(existing);
                self.observed = true;
                return Ok(());
            }
        }

        // Elements kept from the file only receive declared defaults.
        for index in 0..list.len() {
            if let Some(element) = list.element_mut(index) {
                let mut pass = EnvPass::new(None, format!("{key}_{index}"), false);
                walk_mut(element, &mut pass)?;
            }
        }
        Ok(())
    }
}

/// One environment variable bound by a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    /// Full variable name; list indices appear as `<N>`.
    pub key: String,
    pub kind: FieldKind,
    pub default: Option<&'static str>,
    pub required: bool,
    pub secret: bool,
}

/// List every environment variable `T` reads when loaded under `app_name`.
pub fn env_bindings<T: Settings>(app_name: &str) -> Vec<EnvBinding> {
    let mut bindings = Vec::new();
    collect_bindings(&T::schema(), &crate::schema::normalize_segment(app_name), &mut bindings);
    bindings
}

fn collect_bindings(schema: &Schema, prefix: &str, out: &mut Vec<EnvBinding>) {
    for field in schema.fields() {
        let key = join_key(prefix, &field.env_segment());
        match (field.kind(), field.nested_schema()) {
            (FieldKind::Record, Some(child)) => collect_bindings(&child, &key, out),
            (FieldKind::Records, Some(child)) => {
                collect_bindings(&child, &format!("{key}_<N>"), out)
            }
            (kind, _) => out.push(EnvBinding {
                key,
                kind,
                default: field.default_text(),
                required: field.is_required(),
                secret: field.is_secret(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        // Test 1: Unset env var returns None
        let key1 = "_LAYERCONF_TEST_UNSET_VAR";
        let result1 = env_var_or_none(key1);
        assert!(result1.is_none(), "Unset env var should return None");

        // Test 2: Empty string env var returns None
        temp_env::with_vars([(key1, Some(""))], || {
            let result2 = env_var_or_none(key1);
            assert!(result2.is_none(), "Empty string env var should return None");
        });

        // Test 3: Whitespace-only string env var returns None
        temp_env::with_vars([(key1, Some("   "))], || {
            let result3 = env_var_or_none(key1);
            assert!(
                result3.is_none(),
                "Whitespace-only env var should return None"
            );
        });

        // Test 4: Non-empty string env var returns Some(trimmed value)
        let key2 = "_LAYERCONF_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            let result4 = env_var_or_none(key2);
            assert_eq!(
                result4,
                Some("test-value".to_string()),
                "Non-empty env var should return Some(trimmed value)"
            );
        });
    }

    #[test]
    fn test_join_key() {
        assert_eq!(join_key("APP", "SERVER"), "APP_SERVER");
        assert_eq!(join_key("", "SERVER"), "SERVER");
        assert_eq!(join_key("APP_USERS_0", "NAME"), "APP_USERS_0_NAME");
    }

    #[test]
    fn test_map_source_returns_raw_values() {
        let env = HashMap::from([("A".to_string(), " padded ".to_string())]);
        assert_eq!(env.var("A").as_deref(), Some(" padded "));
        assert_eq!(present(env.var("A")).as_deref(), Some("padded"));
        assert!(env.var("B").is_none());
    }

    #[test]
    fn test_env_bindings_enumerate_nested_and_indexed_keys() {
        use crate::loader::tests::fixtures::TestConfig;

        let bindings = env_bindings::<TestConfig>("my-app");
        let keys: Vec<_> = bindings.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(
            keys,
            [
                "MY_APP_SERVER_HOST",
                "MY_APP_SERVER_PORT",
                "MY_APP_SERVER_DEBUG",
                "MY_APP_SERVER_ALLOWED_ORIGINS",
                "MY_APP_DATABASE_USER",
                "MY_APP_DATABASE_PASSWORD",
                "MY_APP_DATABASE_MAX_CONNS",
                "MY_APP_DATABASE_TIMEOUT",
                "MY_APP_USERS_<N>_NAME",
                "MY_APP_USERS_<N>_ROLE",
                "MY_APP_USERS_<N>_TOKEN",
            ]
        );

        let port = &bindings[1];
        assert_eq!(port.default, Some("8080"));
        assert!(!port.required);
        assert!(bindings[0].required);
        assert!(bindings[5].secret);
    }
}

