//! ActionKind - Classification of a webhook action

use serde::{Deserialize, Serialize};

/// Kind of change an action describes.
///
/// Clubhouse sends free-form strings; anything other than `create` or
/// `update` is carried through as `Other` and rendered generically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Create,
    Update,
    Other(String),
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "create" => ActionKind::Create,
            "update" => ActionKind::Update,
            _ => ActionKind::Other(s),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.to_string()
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Create => write!(f, "create"),
            ActionKind::Update => write!(f, "update"),
            ActionKind::Other(s) => write!(f, "{}", s),
        }
    }
}
