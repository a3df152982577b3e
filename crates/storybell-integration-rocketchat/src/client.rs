//! Rocket.Chat webhook client

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error};

use storybell::domain::entities::OutgoingMessage;
use storybell::domain::errors::DomainError;

use crate::config::RocketChatConfig;

/// HTTP client for a Rocket.Chat incoming webhook
pub struct RocketChatClient {
    client: Client,
    config: RocketChatConfig,
}

impl RocketChatClient {
    /// Create a new client
    pub fn new(config: RocketChatConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("storybell/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::ExternalService(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Post a formatted message to the webhook.
    ///
    /// One attempt, no retries; delivery failure is the caller's to log.
    pub async fn post_message(&self, message: &OutgoingMessage) -> Result<(), DomainError> {
        let body = webhook_body(&self.config, message);
        debug!(
            channel = body["channel"].as_str().unwrap_or("<default>"),
            text_len = message.content.text.len(),
            "Posting message to Rocket.Chat"
        );

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Rocket.Chat request failed"))
            .map_err(|e| DomainError::ExternalService(format!("Rocket.Chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(status = %status, "Rocket.Chat rejected the message");
            return Err(DomainError::ExternalService(format!(
                "Rocket.Chat returned {status}: {detail}"
            )));
        }

        Ok(())
    }

    /// Whether the webhook endpoint answers at all.
    pub async fn verify_endpoint(&self) -> bool {
        self.client
            .head(&self.config.webhook_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|resp| resp.status().is_success() || resp.status().as_u16() == 405)
            .unwrap_or(false)
    }
}

/// Build the webhook POST body from a formatted message.
///
/// Rocket.Chat incoming webhooks take the message fields at the top level;
/// config-level username and channel apply only where the message itself
/// has none.
fn webhook_body(config: &RocketChatConfig, message: &OutgoingMessage) -> serde_json::Value {
    let content = &message.content;
    let username = config.username.as_deref().unwrap_or(&content.username);
    let channel = content
        .channel
        .as_deref()
        .or(config.default_channel.as_deref());

    let mut body = serde_json::json!({
        "username": username,
        "text": content.text,
        "attachments": content.attachments,
    });
    if let Some(channel) = channel {
        body["channel"] = serde_json::Value::String(channel.to_string());
    }
    body
}
