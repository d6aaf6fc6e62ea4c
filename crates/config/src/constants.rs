//! Centralized constants for layered configuration loading.

/// Key suffix (after the app prefix) of the variable selecting the source mode.
pub const CONFIG_TYPE_SUFFIX: &str = "CONFIG_TYPE";

/// `<APP>_CONFIG_TYPE` value selecting environment-only mode.
pub const ENV_ONLY_MODE: &str = "env";

/// Variable that disables `.env` loading when set to `true` or `1`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
