//! Cloud provider trait definition

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cloud provider abstraction trait
///
/// Each provider (DigitalOcean today, others later) implements this trait
/// to give the orchestrator a uniform way to obtain and dispose of servers.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Returns the provider name (e.g., "digitalocean")
    fn name(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// Check if the provider is properly configured and authenticated
    async fn check_auth(&self) -> Result<AuthStatus>;

    /// Provision a new server in the given region
    async fn create_server(&self, region: &str, display_name: &str) -> Result<ServerInfo>;

    /// List all servers owned by the credential
    async fn list_servers(&self) -> Result<Vec<ServerInfo>>;

    /// Destroy a specific server
    async fn destroy(&self, server_id: &str) -> Result<()>;
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether authentication is valid
    pub authenticated: bool,

    /// Account/user information if available
    pub account_info: Option<String>,

    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}

/// Provider-neutral view of a provisioned server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Provider-assigned identifier
    pub id: String,

    /// Server name
    pub name: String,

    /// Whether the server is up and serving
    pub is_running: bool,

    /// Public IPv4 address, once networking is allocated
    pub ip_address: Option<String>,

    /// Provider-side labels attached to the server
    pub tags: Vec<String>,
}

/// Retry configuration for provider operations
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (first try included)
    pub max_attempts: u32,

    /// Delay between attempts
    pub delay: std::time::Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: std::time::Duration::from_secs(1),
        }
    }
}
