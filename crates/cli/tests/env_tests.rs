//! Integration tests for `layerconf env`.

mod common;

use common::layerconf_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_env_table_lists_bindings() {
    let temp_dir = TempDir::new().unwrap();

    layerconf_cmd(temp_dir.path())
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("DEMO_SERVICE_NAME"))
        .stdout(predicate::str::contains("DEMO_SERVERS_<N>_PORT"))
        .stdout(predicate::str::contains("DEMO_SECURITY_JWT_SECRET"))
        .stdout(predicate::str::contains("required,secret"));
}

#[test]
fn test_env_dotenv_template_uses_app_prefix() {
    let temp_dir = TempDir::new().unwrap();

    layerconf_cmd(temp_dir.path())
        .args(["--app", "my-svc", "env", "--dotenv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MY_SVC_SERVICE_NAME="))
        .stdout(predicate::str::contains("# MY_SVC_MONITORING_METRICS=/metrics"));
}
