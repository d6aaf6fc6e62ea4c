//! Print the loaded configuration with secrets masked.

use anyhow::{Context, Result};
use layerconf::ConfigLoader;

use crate::args::SnapshotFormat;
use crate::schema::ServiceConfig;

pub fn run(loader: &ConfigLoader, output: SnapshotFormat) -> Result<()> {
    layerconf::reload::<ServiceConfig>(loader).context("Failed to load configuration")?;

    match output {
        SnapshotFormat::Json => println!("{}", layerconf::global::render()?),
        SnapshotFormat::Yaml => {
            let snapshot = layerconf::global::snapshot()?;
            print!("{}", serde_yaml::to_string(&snapshot)?);
        }
    }
    Ok(())
}
