//! EntityType - Kind of entity an action applies to

use serde::{Deserialize, Serialize};

/// Entity kind as reported by Clubhouse.
///
/// `slug()` yields the path segment for deep links back into the
/// workspace; comments and tasks have no page of their own and link
/// to their parent story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Story,
    StoryComment,
    StoryTask,
    Other(String),
}

impl EntityType {
    /// Path segment used when building an entity link.
    pub fn slug(&self) -> &str {
        match self {
            EntityType::Story | EntityType::StoryComment | EntityType::StoryTask => "story",
            EntityType::Other(s) => s,
        }
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "story" => EntityType::Story,
            "story-comment" => EntityType::StoryComment,
            "story-task" => EntityType::StoryTask,
            _ => EntityType::Other(s),
        }
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        entity_type.to_string()
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Story => write!(f, "story"),
            EntityType::StoryComment => write!(f, "story-comment"),
            EntityType::StoryTask => write!(f, "story-task"),
            EntityType::Other(s) => write!(f, "{}", s),
        }
    }
}
