//! Relay API client

use anyhow::{bail, Context, Result};

use storybell::domain::entities::OutgoingMessage;

/// Thin client for a running Storybell relay
pub struct RelayClient {
    base_url: String,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// POST a raw payload to the hook endpoint and return the message
    /// the relay answered with.
    pub async fn send_hook(&self, payload: &str, channel: Option<&str>) -> Result<OutgoingMessage> {
        let mut url = format!("{}/hooks/clubhouse", self.base_url);
        if let Some(channel) = channel {
            url.push_str(&format!("?channel={}", channel));
        }

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(payload.to_string())
            .send()
            .await
            .context("Failed to reach the relay")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Relay returned {status}: {detail}");
        }

        response
            .json::<OutgoingMessage>()
            .await
            .context("Relay answered with an unexpected body")
    }
}
