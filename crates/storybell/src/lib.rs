//! Storybell Domain Library
//!
//! Core domain types and the event formatter for the Storybell relay,
//! which turns Clubhouse webhook events into chat messages.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and value types
//!   - `entities/`: Incoming webhook events and outgoing chat messages
//!   - `value_objects/`: Immutable value types (ActionKind, EntityType,
//!     ChangeRecord, MemberDirectory)
//!   - `errors/`: Domain-specific error types
//!
//! - **Formatter** (`formatter/`): The pure transformation from a webhook
//!   event to a chat message. No I/O, no shared state; every invocation
//!   is independent.
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits) for chat platform
//!   delivery. Implementations live in separate crates
//!   (e.g., storybell-integration-rocketchat).

pub mod domain;
pub mod formatter;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ActionKind, Attachment, ChangeRecord, DomainError, EntityType, EventAction, MemberDirectory,
    MessageContent, OutgoingMessage, WebhookEvent,
};
pub use formatter::{EventFormatter, FormatterConfig};
pub use ports::ChatIntegration;
