//! ChatIntegration implementation for Rocket.Chat

use async_trait::async_trait;

use storybell::domain::entities::OutgoingMessage;
use storybell::domain::errors::DomainError;
use storybell::ports::ChatIntegration;

use crate::client::RocketChatClient;
use crate::config::RocketChatConfig;

/// Rocket.Chat delivery backend for the relay
pub struct RocketChatIntegration {
    client: RocketChatClient,
}

impl RocketChatIntegration {
    pub fn new(config: RocketChatConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: RocketChatClient::new(config)?,
        })
    }
}

#[async_trait]
impl ChatIntegration for RocketChatIntegration {
    async fn post_message(&self, message: &OutgoingMessage) -> Result<(), DomainError> {
        self.client.post_message(message).await
    }

    fn name(&self) -> &str {
        "rocketchat"
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(self.client.verify_endpoint().await)
    }
}
