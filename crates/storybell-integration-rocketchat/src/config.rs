//! Rocket.Chat configuration

use serde::{Deserialize, Serialize};

/// Configuration for Rocket.Chat delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketChatConfig {
    /// Incoming webhook URL on the Rocket.Chat server
    pub webhook_url: String,
    /// Username override; falls back to the message's own username
    pub username: Option<String>,
    /// Channel to post to when the message carries no override
    pub default_channel: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RocketChatConfig {
    /// Create a new configuration with just a webhook URL
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            username: None,
            default_channel: None,
            timeout_secs: 10,
        }
    }

    /// Set the posting username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the default channel
    pub fn with_default_channel(mut self, channel: impl Into<String>) -> Self {
        self.default_channel = Some(channel.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for RocketChatConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            username: None,
            default_channel: None,
            timeout_secs: 10,
        }
    }
}
