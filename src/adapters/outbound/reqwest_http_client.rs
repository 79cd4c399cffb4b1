//! Reqwest HTTP Client
//!
//! Implements HttpClient using reqwest.

use crate::domain::errors::LocationError;
use crate::domain::ports::HttpClient;
use async_trait::async_trait;
use std::time::Duration;

const USER_AGENT: &str = concat!("crisis-locator/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed JSON client.
///
/// Callers enforce per-step timeouts; the client-level timeout is only a
/// backstop for callers that forget to.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a client whose requests never outlive `backstop`.
    pub fn new(backstop: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(backstop)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, LocationError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LocationError::Transport(format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LocationError::Transport(format!(
                "unexpected status: {}",
                status
            )));
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| LocationError::Malformed(format!("invalid JSON body: {}", e)))
    }
}
