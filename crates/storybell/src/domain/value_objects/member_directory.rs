//! MemberDirectory - Clubhouse member UUIDs to chat display names

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static table translating Clubhouse member identifiers into chat
/// display names. Consulted read-only; unknown UUIDs pass through
/// verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberDirectory(HashMap<String, String>);

impl MemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one member mapping.
    pub fn insert(&mut self, member_id: impl Into<String>, name: impl Into<String>) {
        self.0.insert(member_id.into(), name.into());
    }

    /// Look up the display name for a member UUID.
    pub fn display_name(&self, member_id: &str) -> Option<&str> {
        self.0.get(member_id).map(String::as_str)
    }

    /// Mention string for a member: `@name` when known, the raw
    /// identifier otherwise.
    pub fn mention(&self, member_id: &str) -> String {
        match self.display_name(member_id) {
            Some(name) => format!("@{}", name),
            None => member_id.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, String)> for MemberDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
