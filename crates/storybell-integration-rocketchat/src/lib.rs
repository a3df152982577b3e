//! Rocket.Chat Integration for Storybell
//!
//! Delivers formatted relay messages to a Rocket.Chat incoming webhook.
//!
//! # Usage
//!
//! ```rust,ignore
//! use storybell_integration_rocketchat::{RocketChatConfig, RocketChatIntegration};
//!
//! let config = RocketChatConfig::new("https://chat.example.com/hooks/abc/def");
//! let integration = RocketChatIntegration::new(config);
//! integration.post_message(&message).await?;
//! ```

mod client;
mod config;
mod integration;

pub use client::RocketChatClient;
pub use config::RocketChatConfig;
pub use integration::RocketChatIntegration;
