//! HTTP transport to the DigitalOcean API
//!
//! Bearer token authentication, JSON bodies both directions. Every issued
//! request settles in either a value or an error.

use crate::error::{DigitalOceanError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

pub const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

/// Request issuer abstraction, so the session can be exercised without
/// a live API behind it
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issue a request for a relative action path and return the parsed
    /// JSON response body
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value>;
}

/// Transport over a real HTTPS client
pub struct HttpTransport {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl HttpTransport {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token: api_token.into(),
            base_url: DIGITALOCEAN_API_BASE.to_string(),
        }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("DigitalOcean API request: {} {}", method, path);

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        // DNS failures, resets and timeouts land here; the client never
        // learns more than "auth or network", and must never hang
        let response = request.send().await.map_err(|e| {
            tracing::debug!("DigitalOcean transport failure: {}", e);
            DigitalOceanError::AuthOrNetwork
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|_| DigitalOceanError::AuthOrNetwork)?;

        interpret_response(status, &text)
    }
}

/// Error body shape reported by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default = "unknown")]
    id: String,
    #[serde(default = "unknown")]
    message: String,
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Map an HTTP status and raw body to a result
///
/// 2xx parses the body (empty body means an empty object, e.g. 204 on
/// delete); 401 is an auth/network failure regardless of body; anything
/// else carries the provider's error id and message verbatim.
pub(crate) fn interpret_response(status: StatusCode, body: &str) -> Result<Value> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(DigitalOceanError::AuthOrNetwork);
    }

    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        return Ok(serde_json::from_str(body)?);
    }

    let error: ApiErrorBody = serde_json::from_str(body).unwrap_or_else(|_| ApiErrorBody {
        id: unknown(),
        message: unknown(),
    });
    Err(DigitalOceanError::Api {
        id: error.id,
        message: error.message,
    })
}
