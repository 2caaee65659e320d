//! Droplet provisioning flow
//!
//! A freshly signed-up account may reject droplet creation for a short
//! window while DigitalOcean finishes validating it; such failures carry
//! a "finalizing" message and are retried here instead of surfacing to
//! the orchestrator.

use crate::api::{CreateDropletRequest, Droplet, DropletEnvelope, DropletSpec};
use crate::error::{DigitalOceanError, Result};
use crate::session::{sanitize_name, DigitalOceanSession};
use reqwest::Method;
use std::time::Duration;

impl DigitalOceanSession {
    /// Register the public key and create a droplet from the spec
    ///
    /// Key registration failures propagate immediately. Creation failures
    /// inside the finalizing window are retried with a fixed delay, same
    /// key id each time; any other failure, or exhaustion of attempts,
    /// propagates the last error verbatim.
    pub async fn create_droplet(
        &self,
        display_name: &str,
        region: &str,
        public_key: &str,
        spec: &DropletSpec,
    ) -> Result<Droplet> {
        let name = sanitize_name(display_name);
        let key_id = self.register_ssh_key(&name, public_key).await?;

        let request = CreateDropletRequest {
            name: name.clone(),
            region: region.to_string(),
            size: spec.size.clone(),
            image: spec.image.clone(),
            ssh_keys: vec![key_id],
            ipv6: true,
            user_data: spec.user_data.clone(),
            tags: spec.tags.clone(),
        };
        let body = serde_json::to_value(&request)?;
        let retry = self.retry().clone();

        // One counter across the whole sequence, not per error kind
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self
                .transport()
                .request(Method::POST, "droplets", Some(body.clone()))
                .await
            {
                Ok(value) => {
                    let envelope: DropletEnvelope = serde_json::from_value(value)?;
                    tracing::info!(
                        "Created droplet {} ({}) in {}",
                        envelope.droplet.name,
                        envelope.droplet.id,
                        region
                    );
                    return Ok(envelope.droplet);
                }
                Err(e) if e.is_finalizing() && attempt < retry.max_attempts => {
                    tracing::warn!(
                        "Account still finalizing, retrying droplet creation \
                         (attempt {}/{})",
                        attempt,
                        retry.max_attempts
                    );
                    tokio::time::sleep(retry.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Poll a droplet until its status reaches `active`
    ///
    /// Plain poll-and-diff over [`DigitalOceanSession::droplet`]; no
    /// background watcher is involved.
    pub async fn wait_until_active(
        &self,
        id: u64,
        poll_interval: Duration,
        max_polls: u32,
    ) -> Result<Droplet> {
        for poll in 1..=max_polls {
            let droplet = self.droplet(id).await?;
            if droplet.is_active() {
                return Ok(droplet);
            }
            tracing::debug!(
                "Droplet {} still {} (poll {}/{})",
                id,
                droplet.status,
                poll,
                max_polls
            );
            if poll < max_polls {
                tokio::time::sleep(poll_interval).await;
            }
        }
        Err(DigitalOceanError::ActivationTimeout(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{droplet_json, FakeTransport};
    use dropship_cloud::RetryConfig;
    use std::sync::Arc;
    use tokio::time::Instant;

    fn spec() -> DropletSpec {
        DropletSpec {
            user_data: "#!/bin/bash\napt-get install -y squid".to_string(),
            size: "s-1vcpu-1gb".to_string(),
            image: "ubuntu-24-04-x64".to_string(),
            tags: vec!["dropship".to_string(), "proxy".to_string()],
        }
    }

    fn session(transport: Arc<FakeTransport>) -> DigitalOceanSession {
        DigitalOceanSession::with_transport(transport)
    }

    fn push_key(transport: &FakeTransport) {
        transport.push_ok(serde_json::json!({"ssh_key": {"id": 77}}));
    }

    fn push_created(transport: &FakeTransport) {
        transport.push_ok(serde_json::json!({"droplet": droplet_json(9001, "node-1", "new")}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finalizing_failures_are_retried_with_delay() {
        let transport = FakeTransport::new();
        push_key(&transport);
        for _ in 0..3 {
            transport.push_api_err("unprocessable_entity", "Account is Finalizing");
        }
        push_created(&transport);
        let started = Instant::now();

        let droplet = session(transport.clone())
            .create_droplet("Node 1!", "nyc3", "ssh-ed25519 AAAA", &spec())
            .await
            .unwrap();

        assert_eq!(droplet.id, 9001);
        let calls = transport.calls();
        // one key registration, then exactly 4 creation attempts
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0].path, "account/keys");
        assert!(calls[1..].iter().all(|c| c.path == "droplets"));
        // 3 waits of 5 s each between the 4 attempts
        assert_eq!(started.elapsed(), Duration::from_millis(15000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_exhaust_after_max_attempts() {
        let transport = FakeTransport::new();
        push_key(&transport);
        for i in 0..10 {
            transport.push_api_err(
                "unprocessable_entity",
                &format!("finalizing (rejection {})", i + 1),
            );
        }

        let err = session(transport.clone())
            .create_droplet("node", "nyc3", "ssh-ed25519 AAAA", &spec())
            .await
            .unwrap_err();

        // 10 creation attempts, then the 10th error verbatim
        assert_eq!(transport.calls().len(), 11);
        assert!(err.to_string().contains("rejection 10"));
    }

    #[tokio::test]
    async fn test_non_finalizing_failure_is_not_retried() {
        let transport = FakeTransport::new();
        push_key(&transport);
        transport.push_api_err("unprocessable_entity", "size is not available in region");

        let err = session(transport.clone())
            .create_droplet("node", "nyc3", "ssh-ed25519 AAAA", &spec())
            .await
            .unwrap_err();

        assert_eq!(transport.calls().len(), 2);
        assert!(err.to_string().contains("size is not available"));
    }

    #[tokio::test]
    async fn test_key_registration_failure_propagates_immediately() {
        let transport = FakeTransport::new();
        transport.push_api_err("unprocessable_entity", "key is finalizing");

        let err = session(transport.clone())
            .create_droplet("node", "nyc3", "ssh-ed25519 AAAA", &spec())
            .await
            .unwrap_err();

        // never reaches droplet creation, finalizing or not
        assert_eq!(transport.calls().len(), 1);
        assert!(err.to_string().contains("key is finalizing"));
    }

    #[tokio::test]
    async fn test_creation_request_shape() {
        let transport = FakeTransport::new();
        push_key(&transport);
        push_created(&transport);

        session(transport.clone())
            .create_droplet("My Node! #1", "fra1", "ssh-ed25519 AAAA", &spec())
            .await
            .unwrap();

        let body = transport.calls()[1].body.clone().unwrap();
        assert_eq!(body["name"], "MyNode1");
        assert_eq!(body["region"], "fra1");
        assert_eq!(body["ssh_keys"], serde_json::json!([77]));
        assert_eq!(body["ipv6"], true);
        assert_eq!(body["tags"], serde_json::json!(["dropship", "proxy"]));
        assert!(body["user_data"].as_str().unwrap().contains("squid"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_active_polls() {
        let transport = FakeTransport::new();
        for status in ["new", "new", "active"] {
            transport.push_ok(serde_json::json!({"droplet": droplet_json(5, "n", status)}));
        }

        let droplet = session(transport.clone())
            .wait_until_active(5, Duration::from_secs(2), 5)
            .await
            .unwrap();

        assert!(droplet.is_active());
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_active_times_out() {
        let transport = FakeTransport::new();
        for _ in 0..3 {
            transport.push_ok(serde_json::json!({"droplet": droplet_json(5, "n", "new")}));
        }

        let err = session(transport.clone())
            .wait_until_active(5, Duration::from_secs(2), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, DigitalOceanError::ActivationTimeout(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_retry_policy_is_honoured() {
        let transport = FakeTransport::new();
        push_key(&transport);
        transport.push_api_err("unprocessable_entity", "finalizing");
        transport.push_api_err("unprocessable_entity", "finalizing");

        let session = DigitalOceanSession::with_transport(transport.clone()).with_retry(
            RetryConfig {
                max_attempts: 2,
                delay: Duration::from_millis(10),
            },
        );
        let err = session
            .create_droplet("node", "nyc3", "ssh-ed25519 AAAA", &spec())
            .await
            .unwrap_err();

        assert_eq!(transport.calls().len(), 3);
        assert!(err.is_finalizing());
    }
}
