//! DigitalOcean API wire model
//!
//! Read-only snapshots of provider state. Nothing here is cached; every
//! read operation re-fetches from the API.

use serde::{Deserialize, Serialize};

/// Account snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub email: String,
    pub uuid: String,
    pub email_verified: bool,
    pub status: String,
}

/// Region snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub available: bool,
    #[serde(default)]
    pub features: Vec<String>,
}

/// A provisioned droplet
///
/// Identity is the provider-assigned integer id, assigned exactly once.
/// The provider mutates status (`new` → `active`) and fills in networking;
/// this crate never mutates a droplet locally.
#[derive(Debug, Clone, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub region: DropletRegion,
    pub size: DropletSize,
    #[serde(default)]
    pub networks: Networks,
}

impl Droplet {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Public IPv4 address, absent until the provider finishes allocating
    /// networking
    pub fn public_ipv4(&self) -> Option<&str> {
        self.networks
            .v4
            .iter()
            .find(|n| n.kind == "public")
            .map(|n| n.ip_address.as_str())
    }
}

/// Region reference embedded in a droplet
#[derive(Debug, Clone, Deserialize)]
pub struct DropletRegion {
    pub slug: String,
}

/// Size descriptor embedded in a droplet
#[derive(Debug, Clone, Deserialize)]
pub struct DropletSize {
    pub transfer: f64,
    pub price_monthly: f64,
}

/// Network assignments, empty while the droplet status is still `new`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub v4: Vec<NetworkAddress>,
    #[serde(default)]
    pub v6: Vec<NetworkAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkAddress {
    pub ip_address: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Caller-supplied droplet specification
///
/// Fully specified by the caller; the session and provisioning flow never
/// default any of these fields.
#[derive(Debug, Clone)]
pub struct DropletSpec {
    /// Cloud-init bootstrap script run on first boot
    pub user_data: String,

    /// Size slug, e.g. `s-1vcpu-1gb`
    pub size: String,

    /// Image slug, e.g. `ubuntu-24-04-x64`
    pub image: String,

    /// Tags to attach at creation
    pub tags: Vec<String>,
}

// ============ Response envelopes ============

#[derive(Debug, Deserialize)]
pub(crate) struct AccountEnvelope {
    pub account: Account,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegionsEnvelope {
    pub regions: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DropletEnvelope {
    pub droplet: Droplet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DropletsEnvelope {
    pub droplets: Vec<Droplet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SshKeyEnvelope {
    pub ssh_key: SshKey,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SshKey {
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterKeyRequest {
    pub name: String,
    pub public_key: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDropletRequest {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    pub ssh_keys: Vec<u64>,
    pub ipv6: bool,
    pub user_data: String,
    pub tags: Vec<String>,
}
