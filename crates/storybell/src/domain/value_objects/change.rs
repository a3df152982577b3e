//! ChangeRecord - Classification of one field's change within an action
//!
//! Clubhouse sends change records in several shapes: a before/after pair,
//! an add list, a remove list, or something this relay has never seen.
//! Classification is explicit rather than duck-typed so the formatter can
//! match on a closed set of cases.

use serde_json::Value;

/// One field's change inside an action, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeRecord {
    /// Field replaced: `{ "old": ..., "new": ... }` (either side may be absent)
    Replaced { old: Option<Value>, new: Option<Value> },
    /// Values appended: `{ "adds": [...] }`
    Added(Vec<Value>),
    /// Values removed: `{ "removes": [...] }`
    Removed(Vec<Value>),
    /// An object of unrecognized shape; carries its keys for diagnostics
    Unknown(Vec<String>),
    /// A falsy value where a record was expected; aborts rendering
    Invalid,
}

impl ChangeRecord {
    /// Classify a raw change value.
    ///
    /// A replaced pair wins over add/remove lists when both are present,
    /// matching upstream precedence. Non-object truthy values carry no
    /// keys and classify as `Unknown`.
    pub fn classify(value: &Value) -> Self {
        if is_falsy(value) {
            return ChangeRecord::Invalid;
        }

        let Some(record) = value.as_object() else {
            return ChangeRecord::Unknown(Vec::new());
        };

        if record.contains_key("old") || record.contains_key("new") {
            return ChangeRecord::Replaced {
                old: record.get("old").cloned(),
                new: record.get("new").cloned(),
            };
        }

        if let Some(adds) = record.get("adds").and_then(Value::as_array) {
            return ChangeRecord::Added(adds.clone());
        }

        if let Some(removes) = record.get("removes").and_then(Value::as_array) {
            return ChangeRecord::Removed(removes.clone());
        }

        ChangeRecord::Unknown(record.keys().cloned().collect())
    }
}

/// Render a JSON value the way it reads in chat: bare strings, JSON
/// elsewhere, `null` for absent values.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
