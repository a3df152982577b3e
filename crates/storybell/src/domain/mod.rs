//! Domain Layer
//!
//! Pure entities and value types for the Clubhouse-to-chat transformation.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Attachment, EventAction, MessageContent, OutgoingMessage, WebhookEvent};
pub use errors::DomainError;
pub use value_objects::{ActionKind, ChangeRecord, EntityType, MemberDirectory};
