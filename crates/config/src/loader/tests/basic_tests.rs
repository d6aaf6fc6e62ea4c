//! Basic merge tests for the configuration loader.
//!
//! Responsibilities:
//! - Test the file-then-environment round trip.
//! - Test precedence, preservation, and default resolution.
//! - Test prefix normalization and file-name tags distinct from env tags.

use tempfile::TempDir;

use super::fixtures::TestConfig;
use super::{env_map, write_config};
use crate::loader::builder::ConfigLoader;

const BASE_FILE: &str = r#"
[server]
host = "localhost"
port = 8000

[database]
user = "admin"
max_connections = 50
"#;

fn loader(dir: &TempDir, pairs: &[(&str, &str)]) -> ConfigLoader {
    ConfigLoader::new("app")
        .with_base_path(dir.path())
        .with_env(env_map(pairs))
}

#[test]
fn test_file_values_load_without_overrides() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "app.toml", BASE_FILE);

    let config: TestConfig = loader(&temp_dir, &[]).load().unwrap();
    assert_eq!(config.server.host, "localhost");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.database.user, "admin");
    assert_eq!(config.database.max_conns, 50);
}

#[test]
fn test_env_overrides_file_value() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "app.toml", BASE_FILE);

    let config: TestConfig = loader(&temp_dir, &[("APP_SERVER_HOST", "override")])
        .load()
        .unwrap();
    assert_eq!(config.server.host, "override");
    // Fields without an override keep their file values.
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.database.user, "admin");
}

#[test]
fn test_env_overrides_field_renamed_in_file() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "app.toml", BASE_FILE);

    let config: TestConfig = loader(&temp_dir, &[("APP_DATABASE_MAX_CONNS", "75")])
        .load()
        .unwrap();
    assert_eq!(config.database.max_conns, 75);
}

#[test]
fn test_env_only_values_fill_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let config: TestConfig = loader(
        &temp_dir,
        &[
            ("APP_SERVER_HOST", "env-host"),
            ("APP_SERVER_DEBUG", "TRUE"),
            ("APP_SERVER_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("APP_DATABASE_USER", "svc"),
            ("APP_DATABASE_TIMEOUT", "0.75"),
        ],
    )
    .load()
    .unwrap();

    assert_eq!(config.server.host, "env-host");
    assert!(config.server.debug);
    assert_eq!(
        config.server.allowed_origins,
        vec!["https://a.example", "https://b.example"]
    );
    assert_eq!(config.database.user, "svc");
    assert!((config.database.timeout - 0.75).abs() < f64::EPSILON);
}

#[test]
fn test_defaults_apply_when_both_sources_are_silent() {
    let temp_dir = TempDir::new().unwrap();

    let config: TestConfig = loader(
        &temp_dir,
        &[("APP_SERVER_HOST", "h"), ("APP_DATABASE_USER", "u")],
    )
    .load()
    .unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.max_conns, 10);
    assert!((config.database.timeout - 2.5).abs() < f64::EPSILON);
    // No default declared: zero value.
    assert!(!config.server.debug);
    assert!(config.server.allowed_origins.is_empty());
    assert!(config.database.password.is_empty());
    assert!(config.users.is_empty());
}

#[test]
fn test_zero_file_value_takes_default() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        "app.toml",
        "[server]\nhost = \"h\"\nport = 0\n[database]\nuser = \"u\"\n",
    );

    let config: TestConfig = loader(&temp_dir, &[]).load().unwrap();
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_whitespace_env_value_counts_as_unset() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "app.toml", BASE_FILE);

    let config: TestConfig = loader(
        &temp_dir,
        &[("APP_SERVER_HOST", "   "), ("APP_SERVER_PORT", " 9000 ")],
    )
    .load()
    .unwrap();
    assert_eq!(config.server.host, "localhost");
    assert_eq!(config.server.port, 9000);
}

#[test]
fn test_app_name_hyphens_normalize_in_prefix() {
    let temp_dir = TempDir::new().unwrap();

    let loader = ConfigLoader::new("my-app")
        .with_base_path(temp_dir.path())
        .with_env(env_map(&[
            ("MY_APP_SERVER_HOST", "h"),
            ("MY_APP_DATABASE_USER", "u"),
        ]));
    assert_eq!(loader.env_prefix(), "MY_APP");

    let config: TestConfig = loader.load().unwrap();
    assert_eq!(config.server.host, "h");
}
