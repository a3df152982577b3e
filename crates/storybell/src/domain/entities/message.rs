//! Outgoing chat message
//!
//! The structured message object returned to the chat platform. The shape
//! follows the Rocket.Chat integration-script contract: a `content` object
//! carrying the bot username, the rendered text, an optional channel
//! override, and attachments.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Username the relay posts under
pub const BOT_USERNAME: &str = "Clubhouse Bot";

/// Structured message returned for posting into a chat channel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OutgoingMessage {
    pub content: MessageContent,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageContent {
    pub username: String,
    pub text: String,
    /// Channel override, `#`-prefixed; omitted when the webhook URL
    /// carried no channel parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub attachments: Vec<Attachment>,
}

/// One message attachment referencing the originating entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Attachment {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_link: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub color: String,
}

impl OutgoingMessage {
    /// Build a message with the relay's bot username and no channel override.
    pub fn new(text: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            content: MessageContent {
                username: BOT_USERNAME.to_string(),
                text: text.into(),
                channel: None,
                attachments,
            },
        }
    }

    /// Fixed-shape diagnostic message for payloads that could not be parsed.
    ///
    /// The caller always receives a well-formed message object; the error
    /// is echoed in an attachment instead of being surfaced as a failure.
    /// The `Stack:` line is part of the wire contract and stays empty here.
    pub fn parse_failure(error: &dyn std::fmt::Display) -> Self {
        Self {
            content: MessageContent {
                username: BOT_USERNAME.to_string(),
                text: "Error occured parsing the request.".to_string(),
                channel: None,
                attachments: vec![Attachment {
                    text: format!("Error: '{error}', \nMessage: '{error}', \nStack: ''"),
                    ..Attachment::default()
                }],
            },
        }
    }
}
