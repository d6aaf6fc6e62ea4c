//! Demo service schema inspected by the CLI.
//!
//! Exercises every field kind: nested records, a list of records, lists of
//! scalars, defaults, required leaves, and secrets.

use layerconf::Settings;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Settings)]
#[serde(default)]
pub struct ServiceConfig {
    pub service: Service,
    pub api: Api,
    pub servers: Vec<Upstream>,
    pub ports: Vec<u16>,
    pub features: Vec<String>,
    pub monitoring: Monitoring,
    pub security: Security,
}

#[derive(Debug, Default, Deserialize, Settings)]
#[serde(default)]
pub struct Service {
    #[setting(env = "NAME", required)]
    pub name: String,
    #[setting(env = "VERSION", default = "1.0.0")]
    pub version: String,
    #[setting(env = "PORT", default = "8080")]
    pub port: u16,
}

#[derive(Debug, Default, Deserialize, Settings)]
#[serde(default)]
pub struct Api {
    #[setting(default = "v1")]
    pub version: String,
    pub rate_limit: RateLimit,
}

#[derive(Debug, Default, Deserialize, Settings)]
#[serde(default)]
pub struct RateLimit {
    #[setting(default = "100")]
    pub requests: u32,
    #[setting(default = "60")]
    pub window: u32,
}

#[derive(Debug, Default, Deserialize, Settings)]
#[serde(default)]
pub struct Upstream {
    #[setting(required)]
    pub name: String,
    pub url: String,
    pub port: u16,
}

#[derive(Debug, Default, Deserialize, Settings)]
#[serde(default)]
pub struct Monitoring {
    #[setting(default = "true")]
    pub enabled: bool,
    #[setting(default = "/metrics")]
    pub metrics: String,
    #[setting(default = "/health")]
    pub health: String,
}

#[derive(Debug, Default, Deserialize, Settings)]
#[serde(default)]
pub struct Security {
    #[setting(env = "jwt-secret", required, secret)]
    pub jwt_secret: String,
    #[setting(env = "api-key", secret)]
    pub api_key: String,
}
