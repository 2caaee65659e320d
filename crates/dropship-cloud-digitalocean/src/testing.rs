//! Test support: a scripted transport standing in for the live API

use crate::error::{DigitalOceanError, Result};
use crate::transport::ApiTransport;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Replays a queue of canned responses and records every request
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn push_ok(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    pub fn push_err(&self, error: DigitalOceanError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn push_api_err(&self, id: &str, message: &str) {
        self.push_err(DigitalOceanError::Api {
            id: id.to_string(),
            message: message.to_string(),
        });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {}", path))
    }
}

pub(crate) fn droplet_json(id: u64, name: &str, status: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "status": status,
        "tags": ["dropship"],
        "region": {"slug": "nyc3"},
        "size": {"transfer": 1.0, "price_monthly": 6.0},
        "networks": {"v4": [], "v6": []}
    })
}
