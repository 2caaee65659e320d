//! Authenticated session against the DigitalOcean API
//!
//! One long-lived bearer token, created once by the caller and immutable
//! afterwards. The token is opaque: never parsed, validated or logged.

use crate::api::{
    Account, AccountEnvelope, Droplet, DropletEnvelope, DropletsEnvelope, Region, RegionsEnvelope,
    RegisterKeyRequest, SshKeyEnvelope,
};
use crate::error::Result;
use crate::transport::{ApiTransport, HttpTransport};
use dropship_cloud::RetryConfig;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;

/// Attempts and spacing for the post-signup "finalizing" window
fn finalizing_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 10,
        delay: Duration::from_millis(5000),
    }
}

/// DigitalOcean API session
pub struct DigitalOceanSession {
    transport: Arc<dyn ApiTransport>,
    retry: RetryConfig,
}

impl DigitalOceanSession {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(api_token)))
    }

    /// Build a session over a custom transport
    pub fn with_transport(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport,
            retry: finalizing_retry(),
        }
    }

    /// Override the creation retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub(crate) fn transport(&self) -> &dyn ApiTransport {
        self.transport.as_ref()
    }

    pub(crate) fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Fetch the account snapshot
    pub async fn account(&self) -> Result<Account> {
        let value = self.transport.request(Method::GET, "account", None).await?;
        let envelope: AccountEnvelope = serde_json::from_value(value)?;
        Ok(envelope.account)
    }

    /// Fetch all known regions
    pub async fn regions(&self) -> Result<Vec<Region>> {
        let value = self.transport.request(Method::GET, "regions", None).await?;
        let envelope: RegionsEnvelope = serde_json::from_value(value)?;
        Ok(envelope.regions)
    }

    /// Fetch a single droplet by id
    pub async fn droplet(&self, id: u64) -> Result<Droplet> {
        let value = self
            .transport
            .request(Method::GET, &format!("droplets/{}", id), None)
            .await?;
        let envelope: DropletEnvelope = serde_json::from_value(value)?;
        Ok(envelope.droplet)
    }

    /// Fetch all droplets owned by the credential
    pub async fn droplets(&self) -> Result<Vec<Droplet>> {
        let value = self.transport.request(Method::GET, "droplets", None).await?;
        let envelope: DropletsEnvelope = serde_json::from_value(value)?;
        Ok(envelope.droplets)
    }

    /// Fetch droplets filtered server-side by exact tag match
    pub async fn droplets_by_tag(&self, tag: &str) -> Result<Vec<Droplet>> {
        let encoded = utf8_percent_encode(tag, NON_ALPHANUMERIC);
        let value = self
            .transport
            .request(Method::GET, &format!("droplets?tag_name={}", encoded), None)
            .await?;
        let envelope: DropletsEnvelope = serde_json::from_value(value)?;
        Ok(envelope.droplets)
    }

    /// Tags of a droplet, projected from the full snapshot (the API has no
    /// dedicated tags endpoint)
    pub async fn droplet_tags(&self, id: u64) -> Result<Vec<String>> {
        Ok(self.droplet(id).await?.tags)
    }

    /// Destroy a droplet; the API answers 204 with no body
    pub async fn delete_droplet(&self, id: u64) -> Result<()> {
        self.transport
            .request(Method::DELETE, &format!("droplets/{}", id), None)
            .await?;
        Ok(())
    }

    /// Register an SSH public key, returning the provider-assigned key id
    ///
    /// The name is sanitized first: the API rejects names derived from
    /// free-form display names.
    pub async fn register_ssh_key(&self, name: &str, public_key: &str) -> Result<u64> {
        let request = RegisterKeyRequest {
            name: sanitize_name(name),
            public_key: public_key.to_string(),
        };
        let value = self
            .transport
            .request(
                Method::POST,
                "account/keys",
                Some(serde_json::to_value(&request)?),
            )
            .await?;
        let envelope: SshKeyEnvelope = serde_json::from_value(value)?;
        tracing::debug!("Registered SSH key {} as id {}", request.name, envelope.ssh_key.id);
        Ok(envelope.ssh_key.id)
    }
}

/// Strip everything outside ASCII letters, digits and hyphen, preserving
/// order and case of the rest
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}
