//! Incoming Clubhouse webhook events
//!
//! Shapes for the POST body Clubhouse sends when entities change.
//! Fields the formatter does not consume are left out on purpose;
//! serde ignores the rest of the payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::value_objects::{ActionKind, EntityType};

/// One webhook delivery from Clubhouse.
///
/// A delivery can batch several actions; only the first one is
/// rendered (see `EventFormatter`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookEvent {
    /// UUID of the member who triggered the event
    #[serde(default)]
    pub member_id: String,
    /// Actions contained in this delivery
    #[serde(default)]
    pub actions: Vec<EventAction>,
}

/// One discrete change event on an entity (story, task, comment).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventAction {
    /// Action kind: create, update, or anything else upstream invents
    #[schema(value_type = String)]
    pub action: ActionKind,
    /// Entity the action applies to
    #[schema(value_type = String)]
    pub entity_type: EntityType,
    /// Entity identifier; numeric for stories, string for some others
    #[serde(default)]
    #[schema(value_type = Object)]
    pub id: serde_json::Value,
    /// Display name of the entity
    #[serde(default)]
    pub name: String,
    /// Per-field change records, in payload order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub changes: Option<serde_json::Map<String, serde_json::Value>>,
}
