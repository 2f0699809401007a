use crate::error::ChatError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// One request/response exchange with a chat backend. The session talks to
/// this seam so tests can substitute a canned backend.
pub trait Backend {
    fn send_message(&self, message: &str) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs,
        }
    }
}

impl Backend for HttpBackend {
    fn send_message(&self, message: &str) -> Result<Value> {
        let payload = serde_json::json!({ "message": message });

        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;
        let response = client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .with_context(|| format!("failed to reach chat backend at {}", self.endpoint))?;
        if !response.status().is_success() {
            return Err(ChatError::BackendUnavailable(format!(
                "status {} from {}",
                response.status(),
                self.endpoint
            ))
            .into());
        }

        let body: Value = response
            .json()
            .context("chat backend returned a non-JSON body")?;
        Ok(body)
    }
}
