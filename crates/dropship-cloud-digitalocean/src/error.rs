//! DigitalOcean provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigitalOceanError {
    /// HTTP 401 or a transport-level failure (DNS, reset, timeout).
    ///
    /// Carries no message: the API gives no usable diagnostic on this
    /// class of failure, and callers match on the kind to decide
    /// "re-check credentials or connectivity".
    #[error("DigitalOcean authentication or network failure")]
    AuthOrNetwork,

    /// Any other non-2xx response, with the provider's error fields verbatim
    #[error("DigitalOcean API error: {id}: {message}")]
    Api { id: String, message: String },

    #[error("Droplet {0} did not become active in time")]
    ActivationTimeout(u64),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cloud error: {0}")]
    Cloud(#[from] dropship_cloud::CloudError),
}

impl DigitalOceanError {
    /// Retry predicate for the post-signup account validation window.
    ///
    /// The API reports no dedicated error code while an account is being
    /// validated; the message substring is the only available signal.
    pub fn is_finalizing(&self) -> bool {
        match self {
            DigitalOceanError::Api { message, .. } => {
                message.to_lowercase().contains("finalizing")
            }
            _ => false,
        }
    }
}

impl From<DigitalOceanError> for dropship_cloud::CloudError {
    fn from(err: DigitalOceanError) -> Self {
        match err {
            DigitalOceanError::AuthOrNetwork => dropship_cloud::CloudError::AuthenticationFailed,
            DigitalOceanError::Cloud(e) => e,
            other => dropship_cloud::CloudError::ApiError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DigitalOceanError>;
