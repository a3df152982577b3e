//! Domain Entities

pub mod event;
pub mod message;

pub use event::{EventAction, WebhookEvent};
pub use message::{Attachment, MessageContent, OutgoingMessage};
