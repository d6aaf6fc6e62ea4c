//! Validate the configuration without printing values.

use anyhow::{Context, Result};
use layerconf::ConfigLoader;

use crate::schema::ServiceConfig;

pub fn run(loader: &ConfigLoader) -> Result<()> {
    let config: ServiceConfig = loader
        .load()
        .context("Failed to load configuration")?;

    let file = layerconf::locate(loader.app_name(), loader.format(), loader.base_path())
        .filter(|_| loader.source_mode() == layerconf::SourceMode::Hybrid)
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "none".to_string());

    println!(
        "Configuration for '{}' is valid (mode: {}, file: {})",
        loader.app_name(),
        loader.source_mode(),
        file
    );
    println!(
        "Service '{}' v{} on port {} with {} upstream server(s)",
        config.service.name,
        config.service.version,
        config.service.port,
        config.servers.len()
    );
    Ok(())
}
