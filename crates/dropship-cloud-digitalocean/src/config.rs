//! Provider configuration

use crate::error::{DigitalOceanError, Result};

/// Configuration for the DigitalOcean provider
#[derive(Debug, Clone)]
pub struct DigitalOceanConfig {
    /// Bearer token, opaque to this crate
    pub api_token: String,

    /// Default region slug, if the deployment pins one
    pub region: Option<String>,
}

impl DigitalOceanConfig {
    /// Create DigitalOceanConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("DIGITALOCEAN_ACCESS_TOKEN").map_err(|_| {
            DigitalOceanError::MissingEnvVar("DIGITALOCEAN_ACCESS_TOKEN".to_string())
        })?;
        let region = std::env::var("DIGITALOCEAN_REGION").ok();

        Ok(Self { api_token, region })
    }
}
