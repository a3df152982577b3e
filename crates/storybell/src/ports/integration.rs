//! Chat Platform Integration Port
//!
//! Abstract interface for delivering formatted messages to a chat
//! platform such as Rocket.Chat, Slack, or Discord.
//!
//! Implementations of this trait should live in separate crates
//! (e.g., storybell-integration-rocketchat).

use async_trait::async_trait;

use crate::domain::entities::OutgoingMessage;
use crate::domain::errors::DomainError;

/// Chat delivery interface
///
/// The relay core never performs I/O itself; when direct delivery is
/// configured the host hands the formatted message to an implementation
/// of this trait.
#[async_trait]
pub trait ChatIntegration: Send + Sync {
    /// Post a formatted message to the platform
    async fn post_message(&self, message: &OutgoingMessage) -> Result<(), DomainError>;

    /// Get the integration name (e.g., "rocketchat")
    fn name(&self) -> &str;

    /// Check if the integration is connected and healthy
    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
