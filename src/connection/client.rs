//! HTTP client for the command relay

use anyhow::{Context, Result};
use async_trait::async_trait;
use rover_relay_shared::{HeartbeatAck, NextCommand};
use std::time::Duration;

/// Where the rover gets its next command from
#[async_trait]
pub trait CommandSource: Send + Sync {
    async fn next_command(&self) -> Result<NextCommand>;
}

/// Talks to the relay server over HTTP/JSON
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    /// Create a client; every request is bounded by `request_timeout`
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Tell the relay the rover is still operating
    pub async fn heartbeat(&self) -> Result<HeartbeatAck> {
        let ack = self
            .http
            .post(self.url("/heartbeat"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(ack)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CommandSource for RelayClient {
    async fn next_command(&self) -> Result<NextCommand> {
        let next = self
            .http
            .get(self.url("/next-command"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(next)
    }
}
