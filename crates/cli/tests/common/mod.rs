//! Shared test utilities for layerconf CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write config file fixtures for the demo schema.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - The demo app is always `demo`, so every variable it reads starts with `DEMO_`.

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// App name used by every CLI test.
pub const APP: &str = "demo";

/// Returns a hermetic `layerconf` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `DEMO_*` and `LAYERCONF_*` variables from the host are cleared.
/// - The command runs inside `cwd`, so no stray config file is picked up.
pub fn layerconf_cmd(cwd: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("layerconf");
    cmd.current_dir(cwd);

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    for (key, _) in std::env::vars() {
        if key.starts_with("DEMO_") || key.starts_with("LAYERCONF_") {
            cmd.env_remove(&key);
        }
    }

    cmd.args(["--app", APP]);
    cmd
}

/// Minimal valid config for the demo schema.
#[allow(dead_code)]
pub const VALID_TOML: &str = r#"
[service]
name = "orders"
port = 9000

[security]
jwt_secret = "file-jwt-secret"

[[servers]]
name = "primary"
url = "http://10.0.0.1"
port = 8081
"#;

/// Write `content` to `dir/demo.<ext>`.
#[allow(dead_code)]
pub fn write_config(dir: &Path, ext: &str, content: &str) -> PathBuf {
    let path = dir.join(format!("{APP}.{ext}"));
    std::fs::write(&path, content).expect("Failed to write config fixture");
    path
}
