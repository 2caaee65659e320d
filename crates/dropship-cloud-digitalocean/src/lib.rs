//! DigitalOcean provider for Dropship
//!
//! Provisions droplets for the Dropship orchestrator over the DigitalOcean
//! HTTP API: account and region metadata, SSH key registration, droplet
//! lifecycle, and the provisioning retry behaviour for freshly created
//! accounts still inside their validation window.
//!
//! # Requirements
//!
//! - `DIGITALOCEAN_ACCESS_TOKEN` env var (or a token passed in directly)
//!
//! # Example
//!
//! ```ignore
//! use dropship_cloud_digitalocean::{DigitalOceanConfig, DigitalOceanProvider};
//!
//! let config = DigitalOceanConfig::from_env()?;
//! let provider = DigitalOceanProvider::from_config(&config, key_generator);
//!
//! // one call: register a key, create the droplet, absorb the
//! // "account finalizing" window
//! let droplet = provider.create_server("fra1", "EU Proxy #1").await?;
//!
//! // poll until networking is allocated
//! let droplet = provider
//!     .session()
//!     .wait_until_active(droplet.id, std::time::Duration::from_secs(5), 60)
//!     .await?;
//! println!("proxy up at {:?}", droplet.public_ipv4());
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod provider;
pub mod session;
pub mod transport;

mod provision;
#[cfg(test)]
mod testing;

pub use api::{Account, Droplet, DropletSpec, NetworkAddress, Networks, Region};
pub use config::DigitalOceanConfig;
pub use error::{DigitalOceanError, Result};
pub use provider::DigitalOceanProvider;
pub use session::DigitalOceanSession;
pub use transport::{ApiTransport, HttpTransport, DIGITALOCEAN_API_BASE};
