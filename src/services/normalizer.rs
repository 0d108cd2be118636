// src/services/normalizer.rs
//! Turns whatever the workflow answered into one display string.

use serde_json::Value;

/// Field names checked in priority order.
pub const REPLY_FIELDS: [&str; 7] = [
    "text", "output", "response", "message", "answer", "reply", "result",
];

type Scope = for<'a> fn(&'a Value) -> Option<&'a Value>;

fn top_level(item: &Value) -> Option<&Value> {
    Some(item)
}

fn data_wrapper(item: &Value) -> Option<&Value> {
    item.get("data")
}

// Workflow items are usually shaped like `{"json": {...}}`.
fn json_wrapper(item: &Value) -> Option<&Value> {
    item.get("json")
}

const SCOPES: &[Scope] = &[top_level, data_wrapper, json_wrapper];

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

fn find_reply(item: &Value) -> Option<&str> {
    SCOPES
        .iter()
        .filter_map(|scope| scope(item))
        .filter(|obj| obj.is_object())
        .find_map(|obj| {
            REPLY_FIELDS
                .iter()
                .find_map(|field| obj.get(*field).and_then(non_empty_str))
        })
}

/// Never fails: anything unrecognised comes back as the raw body.
pub fn normalize_reply(raw: &str) -> String {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => return raw.to_string(),
    };

    let item = match &parsed {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return raw.to_string(),
        },
        other => other,
    };

    if let Some(text) = non_empty_str(item) {
        return text.to_string();
    }

    find_reply(item)
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}
