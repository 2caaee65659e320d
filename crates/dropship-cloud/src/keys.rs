//! SSH key pair collaborator interface
//!
//! Key material is generated outside this crate. Providers only forward
//! the public half to the cloud API and never inspect key contents.

use crate::error::Result;

/// An SSH key pair in a provider-accepted encoding
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Public key, e.g. an `ssh-ed25519 ...` authorized-keys line
    pub public: String,

    /// Private key in PEM or OpenSSH format
    pub private: String,
}

/// Source of fresh SSH key pairs
///
/// Implemented by the orchestrator; providers call it once per server.
pub trait KeyPairGenerator: Send + Sync {
    fn generate(&self) -> Result<KeyPair>;
}
