//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//! - Build the `ConfigLoader` the global options describe.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not decide precedence between config sources (see `layerconf`).

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use layerconf::{ConfigLoader, FileFormat, SourceMode};

#[derive(Parser)]
#[command(name = "layerconf")]
#[command(about = "Inspect layered file + environment configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  layerconf show\n  layerconf --app myservice --config-dir /etc/myservice check\n  layerconf --env-only show --output yaml\n  layerconf env --dotenv > .env.example\n"
)]
pub struct Cli {
    /// Application name: selects `<app>.<ext>` and the `<APP>_` variable prefix
    #[arg(long, global = true, env = "LAYERCONF_APP", default_value = "layerconf")]
    pub app: String,

    /// Directory (or a file inside it) to search for the config file.
    ///
    /// Replaces the default search of the working directory, the executable's
    /// directory, and the user config directory.
    #[arg(long, global = true, env = "LAYERCONF_CONFIG_DIR", value_name = "PATH")]
    pub config_dir: Option<PathBuf>,

    /// Config file format (toml, json, yaml)
    #[arg(long, global = true, default_value = "toml")]
    pub format: FileFormat,

    /// Skip the config file and read environment variables only
    #[arg(long, global = true)]
    pub env_only: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the configuration and print it with secrets masked
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = SnapshotFormat::Json)]
        output: SnapshotFormat,
    },

    /// Load and validate the configuration without printing values
    Check,

    /// List the environment variables the configuration reads
    Env {
        /// Print as a `.env` template instead of a table
        #[arg(long)]
        dotenv: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

/// Returns true if the path is empty or contains only whitespace.
pub(crate) fn path_is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

impl Cli {
    /// Loader for the global options.
    ///
    /// A blank `--config-dir` (for example an empty `LAYERCONF_CONFIG_DIR`) is
    /// ignored so it cannot clobber the default search.
    pub fn loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new(&self.app).with_format(self.format);
        if let Some(dir) = self.config_dir.as_deref().filter(|p| !path_is_blank(p)) {
            loader = loader.with_base_path(dir);
        }
        if self.env_only {
            loader = loader.with_mode(SourceMode::EnvOnly);
        }
        loader
    }
}
