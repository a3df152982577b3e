//! Event Formatter
//!
//! The pure transformation from a Clubhouse webhook event to a chat
//! message. Stateless end-to-end: every invocation is independent and
//! the formatter performs no I/O.

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::{Attachment, EventAction, OutgoingMessage, WebhookEvent};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::change::{display_value, ChangeRecord};
use crate::domain::value_objects::{ActionKind, EntityType, MemberDirectory};

/// Attachment accent color for entity links
const BRAND_COLOR: &str = "#764FA5";

/// Change keys that never produce a bullet line. `workflow_state_id`
/// duplicates the human-readable workflow state change.
const IGNORED_KEYS: &[&str] = &["workflow_state_id"];

/// Static configuration for the formatter.
///
/// Passed in at construction; the formatter holds no mutable state.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Clubhouse workspace name, used to build entity links
    pub workspace_name: String,
    /// Member UUID to display name directory
    pub members: MemberDirectory,
    /// Whether @all mentions are permitted. Declared for hosts that
    /// enforce mention policy; the transformation itself never emits @all.
    pub mention_all_allowed: bool,
}

impl FormatterConfig {
    pub fn new(workspace_name: impl Into<String>) -> Self {
        Self {
            workspace_name: workspace_name.into(),
            members: MemberDirectory::default(),
            mention_all_allowed: false,
        }
    }

    pub fn with_members(mut self, members: MemberDirectory) -> Self {
        self.members = members;
        self
    }

    pub fn with_mention_all(mut self, allowed: bool) -> Self {
        self.mention_all_allowed = allowed;
        self
    }

    /// Base URL for deep links into the workspace.
    pub fn base_url(&self) -> String {
        format!("https://app.clubhouse.io/{}", self.workspace_name)
    }
}

/// Turns webhook events into chat messages.
pub struct EventFormatter {
    config: FormatterConfig,
}

impl EventFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Transform one webhook event into a chat message.
    ///
    /// Total: malformed events degrade into the fixed diagnostic message
    /// instead of failing. The channel override from the webhook query
    /// string is applied only on the normal path.
    pub fn process(&self, event: &WebhookEvent, channel: Option<&str>) -> OutgoingMessage {
        match self.render(event) {
            Ok(mut message) => {
                if let Some(channel) = channel {
                    message.content.channel = Some(format!("#{}", channel));
                }
                message
            }
            Err(e) => {
                warn!(error = %e, "event could not be rendered");
                OutgoingMessage::parse_failure(&e)
            }
        }
    }

    fn render(&self, event: &WebhookEvent) -> Result<OutgoingMessage, DomainError> {
        // A delivery can batch several actions; only the first is rendered.
        let action = event
            .actions
            .first()
            .ok_or_else(|| DomainError::Validation("event carries no actions".to_string()))?;

        let user = self.user_tag(&event.member_id);
        let text = self.render_text(action, &user);

        Ok(OutgoingMessage::new(text, vec![self.attachment(action)]))
    }

    /// User tag policy: known member becomes `@name`, an unmapped id
    /// passes through verbatim, and a missing id reads `unknown user`.
    fn user_tag(&self, member_id: &str) -> String {
        if member_id.is_empty() {
            return "unknown user".to_string();
        }
        self.config.members.mention(member_id)
    }

    fn render_text(&self, action: &EventAction, user: &str) -> String {
        match &action.action {
            ActionKind::Create => self.render_create(action, user),
            ActionKind::Update => self.render_update(action, user),
            ActionKind::Other(_) => self.header(action, user),
        }
    }

    fn render_create(&self, action: &EventAction, user: &str) -> String {
        match &action.entity_type {
            EntityType::Story => format!("{} created a story: \"{}\"", user, action.name),
            EntityType::StoryComment => {
                format!("{} commented on the story: {}", user, action.name)
            }
            other => format!("{} created a {}: \"{}\".", user, other, action.name),
        }
    }

    fn render_update(&self, action: &EventAction, user: &str) -> String {
        if action.entity_type == EntityType::Story && story_completed(action) {
            return format!("{} completed the story \"{}\" \u{1f64c}", user, action.name);
        }

        let mut text = self.header(action, user);
        text.push_str("\n\nChanges:\n");

        if let Some(changes) = &action.changes {
            match self.render_changes(changes) {
                Some(bullets) => text.push_str(&bullets),
                // Crude upstream contract: a malformed record turns the
                // whole text into the literal "Parse Error".
                None => return "Parse Error".to_string(),
            }
        }

        text
    }

    fn header(&self, action: &EventAction, user: &str) -> String {
        format!(
            "{} action by {} on {} \"{}\".",
            action.action, user, action.entity_type, action.name
        )
    }

    /// Render one bullet line per changed field, in payload order.
    /// Returns `None` when a record is malformed.
    fn render_changes(&self, changes: &serde_json::Map<String, Value>) -> Option<String> {
        let mut bullets = String::new();

        for (key, value) in changes {
            if IGNORED_KEYS.contains(&key.as_str()) {
                continue;
            }

            match ChangeRecord::classify(value) {
                ChangeRecord::Invalid => return None,
                ChangeRecord::Replaced { old, new } => {
                    // Upstream echoes unchanged fields (e.g. completed_at
                    // from 0 to 0 on done); skip the no-ops.
                    if old == new {
                        continue;
                    }
                    let old = old.as_ref().map(display_value).unwrap_or_else(|| "null".to_string());
                    let new = new.as_ref().map(display_value).unwrap_or_else(|| "null".to_string());
                    bullets.push_str(&format!("- *{}* from *{}* to *{}*\n", key, old, new));
                }
                ChangeRecord::Added(values) => {
                    bullets.push_str(&format!(
                        "- added *{}* {}\n",
                        key,
                        self.join_values(key, &values)
                    ));
                }
                ChangeRecord::Removed(values) => {
                    bullets.push_str(&format!(
                        "- removed *{}* {}\n",
                        key,
                        self.join_values(key, &values)
                    ));
                }
                ChangeRecord::Unknown(keys) => {
                    debug!(key = %key, "unhandled change record shape");
                    bullets.push_str(&format!("- Key(s) not implemented: {}\n", keys.join(",")));
                }
            }
        }

        Some(bullets)
    }

    /// Join change values with a comma-space; `owner_ids` entries are
    /// resolved through the member directory.
    fn join_values(&self, key: &str, values: &[Value]) -> String {
        values
            .iter()
            .map(|value| match value {
                Value::String(id) if key == "owner_ids" => self.config.members.mention(id),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn attachment(&self, action: &EventAction) -> Attachment {
        let id = display_value(&action.id);
        Attachment {
            title: format!("{} [{}]", action.name, id),
            title_link: format!(
                "{}/{}/{}",
                self.config.base_url(),
                action.entity_type.slug(),
                id
            ),
            text: String::new(),
            image_url: String::new(),
            color: BRAND_COLOR.to_string(),
        }
    }
}

/// A story update completing the story: `changes.completed` transitioning
/// false to true.
fn story_completed(action: &EventAction) -> bool {
    let Some(record) = action.changes.as_ref().and_then(|changes| changes.get("completed")) else {
        return false;
    };
    matches!(
        ChangeRecord::classify(record),
        ChangeRecord::Replaced {
            old: Some(Value::Bool(false)),
            new: Some(Value::Bool(true)),
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn formatter() -> EventFormatter {
        let members: MemberDirectory = [
            ("uuid-alice".to_string(), "alice".to_string()),
            ("uuid-bob".to_string(), "bob".to_string()),
        ]
        .into_iter()
        .collect();
        EventFormatter::new(FormatterConfig::new("acme").with_members(members))
    }

    fn event(value: Value) -> WebhookEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_story() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{"action": "create", "entity_type": "story", "id": 42, "name": "Fix bug"}]
            })),
            None,
        );

        assert_eq!(message.content.text, "@alice created a story: \"Fix bug\"");
        assert_eq!(message.content.username, "Clubhouse Bot");
    }

    #[test]
    fn test_create_story_comment() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-bob",
                "actions": [{"action": "create", "entity_type": "story-comment", "id": 7, "name": "Nice catch"}]
            })),
            None,
        );

        assert_eq!(message.content.text, "@bob commented on the story: Nice catch");
    }

    #[test]
    fn test_create_generic_entity() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{"action": "create", "entity_type": "epic", "id": 3, "name": "Q3"}]
            })),
            None,
        );

        assert_eq!(message.content.text, "@alice created a epic: \"Q3\".");
    }

    #[test]
    fn test_unknown_member_passes_through() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-stranger",
                "actions": [{"action": "create", "entity_type": "story", "id": 1, "name": "X"}]
            })),
            None,
        );

        assert_eq!(message.content.text, "uuid-stranger created a story: \"X\"");
    }

    #[test]
    fn test_missing_member_reads_unknown_user() {
        let message = formatter().process(
            &event(json!({
                "actions": [{"action": "create", "entity_type": "story", "id": 1, "name": "X"}]
            })),
            None,
        );

        assert!(message.content.text.starts_with("unknown user created"));
    }

    #[test]
    fn test_update_completed_story() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{
                    "action": "update", "entity_type": "story", "id": 9, "name": "Ship it",
                    "changes": {
                        "completed": {"old": false, "new": true},
                        "state": {"old": "doing", "new": "done"}
                    }
                }]
            })),
            None,
        );

        assert_eq!(
            message.content.text,
            "@alice completed the story \"Ship it\" \u{1f64c}"
        );
        assert!(!message.content.text.contains("Changes:"));
    }

    #[test]
    fn test_update_generic_header_and_bullets() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{
                    "action": "update", "entity_type": "story", "id": 9, "name": "Ship it",
                    "changes": {
                        "estimate": {"old": 1, "new": 3}
                    }
                }]
            })),
            None,
        );

        assert_eq!(
            message.content.text,
            "update action by @alice on story \"Ship it\".\n\nChanges:\n- *estimate* from *1* to *3*\n"
        );
    }

    #[test]
    fn test_update_noop_change_filtered() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{
                    "action": "update", "entity_type": "story", "id": 9, "name": "S",
                    "changes": {
                        "status": {"old": "A", "new": "A"},
                        "estimate": {"old": 1, "new": 2}
                    }
                }]
            })),
            None,
        );

        assert!(!message.content.text.contains("status"));
        assert!(message.content.text.contains("- *estimate* from *1* to *2*"));
    }

    #[test]
    fn test_update_ignored_key_skipped() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{
                    "action": "update", "entity_type": "story", "id": 9, "name": "S",
                    "changes": {
                        "workflow_state_id": {"old": 500, "new": 501}
                    }
                }]
            })),
            None,
        );

        assert_eq!(
            message.content.text,
            "update action by @alice on story \"S\".\n\nChanges:\n"
        );
    }

    #[test]
    fn test_owner_ids_resolved_through_directory() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-bob",
                "actions": [{
                    "action": "update", "entity_type": "story", "id": 9, "name": "S",
                    "changes": {
                        "owner_ids": {"adds": ["uuid-alice", "uuid-stranger"]}
                    }
                }]
            })),
            None,
        );

        assert!(message
            .content
            .text
            .contains("- added *owner_ids* @alice, uuid-stranger\n"));
    }

    #[test]
    fn test_removes_rendered() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-bob",
                "actions": [{
                    "action": "update", "entity_type": "story", "id": 9, "name": "S",
                    "changes": {
                        "label_ids": {"removes": [12, 13]}
                    }
                }]
            })),
            None,
        );

        assert!(message.content.text.contains("- removed *label_ids* 12, 13\n"));
    }

    #[test]
    fn test_unknown_change_shape_listed() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-bob",
                "actions": [{
                    "action": "update", "entity_type": "story", "id": 9, "name": "S",
                    "changes": {
                        "mystery": {"foo": 1, "bar": 2}
                    }
                }]
            })),
            None,
        );

        assert!(message.content.text.contains("- Key(s) not implemented: foo,bar\n"));
    }

    #[test]
    fn test_falsy_change_record_yields_parse_error() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-bob",
                "actions": [{
                    "action": "update", "entity_type": "story", "id": 9, "name": "S",
                    "changes": {
                        "estimate": {"old": 1, "new": 2},
                        "broken": null
                    }
                }]
            })),
            None,
        );

        assert_eq!(message.content.text, "Parse Error");
        // Attachment is still present alongside the crude error text.
        assert_eq!(message.content.attachments.len(), 1);
    }

    #[test]
    fn test_other_action_kind_header_only() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{
                    "action": "delete", "entity_type": "story", "id": 9, "name": "Old",
                    "changes": {"estimate": {"old": 1, "new": 2}}
                }]
            })),
            None,
        );

        assert_eq!(
            message.content.text,
            "delete action by @alice on story \"Old\"."
        );
        assert!(!message.content.text.contains("Changes:"));
    }

    #[test]
    fn test_attachment_links_story() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{"action": "create", "entity_type": "story", "id": 42, "name": "Fix bug"}]
            })),
            None,
        );

        let attachment = &message.content.attachments[0];
        assert_eq!(attachment.title, "Fix bug [42]");
        assert_eq!(
            attachment.title_link,
            "https://app.clubhouse.io/acme/story/42"
        );
        assert_eq!(attachment.color, "#764FA5");
        assert!(attachment.text.is_empty());
        assert!(attachment.image_url.is_empty());
    }

    #[test]
    fn test_story_comment_links_to_story() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{"action": "create", "entity_type": "story-comment", "id": 77, "name": "hm"}]
            })),
            None,
        );

        assert_eq!(
            message.content.attachments[0].title_link,
            "https://app.clubhouse.io/acme/story/77"
        );
    }

    #[test]
    fn test_channel_applied_with_hash_prefix() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{"action": "create", "entity_type": "story", "id": 1, "name": "X"}]
            })),
            Some("general"),
        );

        assert_eq!(message.content.channel.as_deref(), Some("#general"));
    }

    #[test]
    fn test_no_channel_leaves_field_unset() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{"action": "create", "entity_type": "story", "id": 1, "name": "X"}]
            })),
            None,
        );

        assert!(message.content.channel.is_none());
    }

    #[test]
    fn test_empty_actions_takes_error_path() {
        let message = formatter().process(
            &event(json!({"member_id": "uuid-alice", "actions": []})),
            Some("general"),
        );

        assert_eq!(message.content.username, "Clubhouse Bot");
        assert_eq!(message.content.text, "Error occured parsing the request.");
        // The diagnostic message never carries a channel override.
        assert!(message.content.channel.is_none());
    }

    #[test]
    fn test_second_action_ignored() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [
                    {"action": "create", "entity_type": "story", "id": 1, "name": "First"},
                    {"action": "create", "entity_type": "story", "id": 2, "name": "Second"}
                ]
            })),
            None,
        );

        assert!(message.content.text.contains("First"));
        assert!(!message.content.text.contains("Second"));
    }

    #[test]
    fn test_non_numeric_id_in_link() {
        let message = formatter().process(
            &event(json!({
                "member_id": "uuid-alice",
                "actions": [{"action": "create", "entity_type": "epic", "id": "abc-123", "name": "Q3"}]
            })),
            None,
        );

        assert_eq!(
            message.content.attachments[0].title_link,
            "https://app.clubhouse.io/acme/epic/abc-123"
        );
    }
}
