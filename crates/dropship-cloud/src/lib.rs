//! Dropship Cloud Infrastructure
//!
//! This crate provides the cloud provider abstraction for Dropship,
//! the layer the orchestrator talks to when it needs a fresh server
//! to deploy proxy software onto.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               Dropship orchestrator              │
//! │            (deploys proxy servers)               │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               dropship-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Provider Abstraction             │   │
//! │  │  trait CloudProvider { ... }              │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  KeyPair     │  │  RetryConfig │            │
//! │  │  generation  │  │              │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼────────────────┐
//! │ digitalocean provider  │
//! └────────────────────────┘
//! ```

pub mod error;
pub mod keys;
pub mod provider;

// Re-exports
pub use error::{CloudError, Result};
pub use keys::{KeyPair, KeyPairGenerator};
pub use provider::{AuthStatus, CloudProvider, RetryConfig, ServerInfo};
