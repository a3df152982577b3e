//! Value Objects
//!
//! Immutable value types used across the transformation.

pub mod action_kind;
pub mod change;
pub mod entity_type;
pub mod member_directory;

pub use action_kind::ActionKind;
pub use change::ChangeRecord;
pub use entity_type::EntityType;
pub use member_directory::MemberDirectory;
