//! Property-level transformations shared by node descriptors
//!
//! Small, best-effort helpers: filling empty properties, merging defaults,
//! augmenting `@type`, normalizing dates and stripping empty values. None of
//! them fail; values they cannot interpret pass through unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::graph::Properties;
use crate::id::{resolve_id_with_base_url, resolve_with_base_url};

/// Whether a value counts as "not set"
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Set `key` to `value` only if the property is missing or empty and the
/// value itself is non-empty
pub fn set_if_empty(node: &mut Properties, key: &str, value: Value) {
    let current_empty = node.get(key).map(is_empty_value).unwrap_or(true);
    if current_empty && !is_empty_value(&value) {
        node.insert(key.to_string(), value);
    }
}

/// Deep-merge `defaults` under `node`; explicit values always win
pub fn merge_defaults(node: &mut Properties, defaults: Value) {
    let Value::Object(defaults) = defaults else {
        return;
    };
    for (key, default) in defaults {
        match node.get_mut(&key) {
            Some(existing) if !is_empty_value(existing) => {
                if let (Value::Object(existing), Value::Object(_)) = (&mut *existing, &default) {
                    merge_defaults(existing, default);
                }
            }
            _ => {
                node.insert(key, default);
            }
        }
    }
}

/// Remove null and empty-string properties (recursive)
pub fn clean_attributes(node: &mut Properties) {
    node.retain(|_, v| !is_empty_value(v));
    for value in node.values_mut() {
        clean_value(value);
    }
}

fn clean_value(value: &mut Value) {
    match value {
        Value::Object(obj) => clean_attributes(obj),
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                clean_value(item);
            }
        }
        _ => {}
    }
}

/// Wrap a value into a list unless it already is one
pub fn as_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// First element of a value treated as a list
pub fn first_element(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        Value::Null => None,
        other => Some(other),
    }
}

/// Extract `@type` as a list of type names
pub fn extract_types(node: &Value) -> Vec<String> {
    match node.get("@type") {
        Some(Value::String(t)) => vec![t.clone()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => vec![],
    }
}

/// Check if a node has a specific `@type`
pub fn has_type(node: &Value, type_name: &str) -> bool {
    extract_types(node).iter().any(|t| t == type_name)
}

/// Augment a node's `@type` so it always includes the descriptor's defaults
///
/// `"FAQPage"` with default `["WebPage"]` becomes `["WebPage", "FAQPage"]`;
/// a value that adds nothing new is left as given.
pub fn resolve_type(current: &Value, defaults: &[&str]) -> Value {
    let mut types: Vec<String> = defaults.iter().map(|t| t.to_string()).collect();
    for t in extract_types(&serde_json::json!({ "@type": current })) {
        if !types.contains(&t) {
            types.push(t);
        }
    }
    if types.len() == 1 {
        current.clone()
    } else {
        Value::Array(types.into_iter().map(Value::String).collect())
    }
}

/// Apply [`resolve_type`] to a node in place
pub fn augment_type(node: &mut Properties, defaults: &[&str]) {
    if let Some(current) = node.get("@type") {
        let resolved = resolve_type(current, defaults);
        node.insert("@type".to_string(), resolved);
    }
}

/// Normalize a date to an ISO-8601 UTC string with millisecond precision
///
/// Unparsable values are returned unchanged.
pub fn resolve_date_to_iso(value: &Value) -> Value {
    let Some(raw) = value.as_str() else {
        return value.clone();
    };
    match parse_date(raw) {
        Some(date) => Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => value.clone(),
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalize a date property in place, if present
pub fn resolve_date_property(node: &mut Properties, key: &str) {
    if let Some(value) = node.get(key) {
        let resolved = resolve_date_to_iso(value);
        node.insert(key.to_string(), resolved);
    }
}

/// Resolve a relative url property against a base, if present
pub fn resolve_url(node: &mut Properties, key: &str, base: &str) {
    if let Some(Value::String(value)) = node.get(key) {
        let resolved = resolve_with_base_url(base, value);
        node.insert(key.to_string(), Value::String(resolved));
    }
}

/// Resolve a relative `@id` against a base, if present
pub fn resolve_id(node: &mut Properties, base: &str) {
    if let Some(Value::String(id)) = node.get("@id") {
        let resolved = resolve_id_with_base_url(base, id);
        node.insert("@id".to_string(), Value::String(resolved));
    }
}

/// Trim text to at most `length` characters, cutting at the last word boundary
pub fn trim_length(value: &str, length: usize) -> String {
    if value.chars().count() <= length {
        return value.to_string();
    }
    let trimmed: String = value.chars().take(length).collect();
    match trimmed.rfind(' ') {
        Some(pos) => trimmed[..pos].to_string(),
        None => trimmed,
    }
}

/// Add `value` to the list at `key`, keeping entries unique
pub fn dedupe_merge(node: &mut Properties, key: &str, value: Value) {
    let mut items = node.remove(key).map(as_array).unwrap_or_default();
    if !items.contains(&value) {
        items.push(value);
    }
    node.insert(key.to_string(), Value::Array(items));
}

/// String property accessor
pub fn get_str<'a>(node: &'a Properties, key: &str) -> Option<&'a str> {
    node.get(key).and_then(Value::as_str)
}
