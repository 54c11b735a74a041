//! Identifier and graph-key utilities
//!
//! Handles classification, prefixing and hashing of node `@id`s, plus the
//! reference rewriting used when a node changes identity after other nodes
//! already point at it.

use std::collections::HashMap;

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

/// Number of hex characters kept from a content hash
const HASH_LENGTH: usize = 10;

/// Classification of an `@id` (or url-ish) string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdKind {
    /// Page-relative fragment: "#identity", "#/schema/person/abc"
    Fragment,
    /// Host-relative path: "/logo.png", "/"
    Path,
    /// Absolute IRI: "https://...", "mailto:..."
    Absolute,
    /// Anything else ("logo.png", "Jane")
    Opaque,
}

/// Classify an `@id` string
pub fn classify_id(id: &str) -> IdKind {
    if has_protocol(id) {
        IdKind::Absolute
    } else if id.starts_with('#') {
        IdKind::Fragment
    } else if id.starts_with('/') {
        IdKind::Path
    } else {
        IdKind::Opaque
    }
}

/// Check whether a string starts with a URI scheme ("https:", "mailto:", ...)
pub fn has_protocol(value: &str) -> bool {
    let Some(colon) = value.find(':') else {
        return false;
    };
    let scheme = &value[..colon];
    scheme.len() >= 2
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Join a path or fragment onto a base url with exactly one separating `/`
///
/// "https://example.com/" + "/blog" -> "https://example.com/blog"
/// "https://example.com/test" + "#webpage" -> "https://example.com/test/#webpage"
/// "https://example.com/" + "/" -> "https://example.com"
pub fn join_url(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    if segment.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, segment)
    }
}

/// Prefix an `@id` with a base url, leaving absolute ids untouched
pub fn prefix_id(base: &str, id: &str) -> String {
    if has_protocol(id) {
        return id.to_string();
    }
    if id.starts_with('#') {
        join_url(base, id)
    } else {
        join_url(base, &format!("#{}", id))
    }
}

/// Resolve a host-relative path or fragment against a base url
///
/// Absolute urls and opaque strings pass through unchanged.
pub fn resolve_with_base_url(base: &str, value: &str) -> String {
    match classify_id(value) {
        IdKind::Path | IdKind::Fragment => {
            if value.starts_with(base) {
                value.to_string()
            } else {
                join_url(base, value)
            }
        }
        IdKind::Absolute | IdKind::Opaque => value.to_string(),
    }
}

/// Resolve an `@id` against a base url
///
/// A host-relative path without a fragment becomes a fragment of `base`:
/// "/team/jane" -> "https://example.com/#/team/jane". Everything else
/// resolves as in [`resolve_with_base_url`].
pub fn resolve_id_with_base_url(base: &str, id: &str) -> String {
    match classify_id(id) {
        IdKind::Path if !id.contains('#') => prefix_id(base, id),
        _ => resolve_with_base_url(base, id),
    }
}

/// Normalize an `@id` to its fragment, used for dedup and lookup comparisons
///
/// "https://example.com/#identity" -> "#identity"
pub fn resolve_as_graph_key(id: &str) -> &str {
    match id.rfind('#') {
        Some(pos) => &id[pos..],
        None => id,
    }
}

/// Build a bare `{"@id": ...}` reference
pub fn id_reference(id: &str) -> Value {
    json!({ "@id": id })
}

/// Check whether a value is a bare reference (an object whose only key is `@id`)
pub fn is_reference(value: &Value) -> bool {
    match value.as_object() {
        Some(obj) => obj.len() == 1 && obj.get("@id").map(Value::is_string).unwrap_or(false),
        None => false,
    }
}

/// Extract `@id` from a node
pub fn extract_id(node: &Value) -> Option<&str> {
    node.get("@id").and_then(|v| v.as_str())
}

/// Deterministic content hash of a JSON value
///
/// Object keys serialize in sorted order, so structurally identical values
/// always hash to the same string.
pub fn content_hash(value: &Value) -> String {
    let canonical = serde_json::to_vec(value).unwrap_or_default();
    let digest = Sha256::digest(&canonical);
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_LENGTH);
    encoded
}

/// Rewrite `@id` references within a JSON value (recursive)
///
/// Finds all `{"@id": "..."}` patterns and rewrites them using the provided map
pub fn rewrite_references(value: &mut Value, id_map: &HashMap<String, String>) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(id_val)) = obj.get("@id") {
                if let Some(new_id) = id_map.get(id_val) {
                    obj.insert("@id".to_string(), Value::String(new_id.clone()));
                }
            }
            for (_, v) in obj.iter_mut() {
                rewrite_references(v, id_map);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                rewrite_references(item, id_map);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_id() {
        assert_eq!(classify_id("#identity"), IdKind::Fragment);
        assert_eq!(classify_id("#/schema/person/abc"), IdKind::Fragment);
        assert_eq!(classify_id("/logo.png"), IdKind::Path);
        assert_eq!(classify_id("https://example.com/#identity"), IdKind::Absolute);
        assert_eq!(classify_id("mailto:harlan@example.com"), IdKind::Absolute);
        assert_eq!(classify_id("logo.png"), IdKind::Opaque);
    }

    #[test]
    fn test_has_protocol() {
        assert!(has_protocol("https://example.com"));
        assert!(has_protocol("urn:isbn:123"));
        assert!(!has_protocol("/path:with-colon"));
        assert!(!has_protocol("#/schema/x"));
        assert!(!has_protocol("c:"));
    }

    #[test]
    fn test_prefix_id() {
        assert_eq!(
            prefix_id("https://example.com/", "#identity"),
            "https://example.com/#identity"
        );
        assert_eq!(
            prefix_id("https://example.com/test", "#webpage"),
            "https://example.com/test/#webpage"
        );
        assert_eq!(
            prefix_id("https://example.com", "logo"),
            "https://example.com/#logo"
        );
        // already absolute
        assert_eq!(
            prefix_id("https://example.com/", "https://other.com/#me"),
            "https://other.com/#me"
        );
    }

    #[test]
    fn test_resolve_with_base_url() {
        let host = "https://example.com/";
        assert_eq!(resolve_with_base_url(host, "/logo.png"), "https://example.com/logo.png");
        assert_eq!(resolve_with_base_url(host, "/"), "https://example.com");
        assert_eq!(resolve_with_base_url(host, "#sub"), "https://example.com/#sub");
        assert_eq!(
            resolve_with_base_url(host, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(resolve_with_base_url(host, "relative.png"), "relative.png");
    }

    #[test]
    fn test_resolve_id_with_base_url() {
        let host = "https://example.com/";
        assert_eq!(
            resolve_id_with_base_url(host, "/team/jane"),
            "https://example.com/#/team/jane"
        );
        assert_eq!(
            resolve_id_with_base_url(host, "/team/#jane"),
            "https://example.com/team/#jane"
        );
        assert_eq!(
            resolve_id_with_base_url("https://example.com/blog", "#sub"),
            "https://example.com/blog/#sub"
        );
        assert_eq!(resolve_id_with_base_url(host, "urn:isbn:123"), "urn:isbn:123");
        assert!(resolve_id_with_base_url(host, "/a/b").contains('#'));
    }

    #[test]
    fn test_resolve_as_graph_key() {
        assert_eq!(resolve_as_graph_key("https://example.com/#identity"), "#identity");
        assert_eq!(
            resolve_as_graph_key("https://example.com/#/schema/person/abc"),
            "#/schema/person/abc"
        );
        assert_eq!(resolve_as_graph_key("#logo"), "#logo");
        assert_eq!(resolve_as_graph_key("no-fragment"), "no-fragment");
    }

    #[test]
    fn test_is_reference() {
        assert!(is_reference(&json!({"@id": "#identity"})));
        assert!(!is_reference(&json!({"@id": "#identity", "name": "x"})));
        assert!(!is_reference(&json!({"name": "x"})));
        assert!(!is_reference(&json!("#identity")));
    }

    #[test]
    fn test_content_hash_is_order_independent() {
        let a = json!({"name": "Jane", "@type": "Person"});
        let b = json!({"@type": "Person", "name": "Jane"});
        assert_eq!(content_hash(&a), content_hash(&b));
        assert_eq!(content_hash(&a).len(), 10);
        assert_ne!(content_hash(&a), content_hash(&json!({"name": "John"})));
    }

    #[test]
    fn test_rewrite_references() {
        let mut value = json!({
            "@id": "https://example.com/#webpage",
            "primaryImageOfPage": {"@id": "https://example.com/#logo"},
            "image": [
                {"@id": "https://example.com/#logo"},
                {"@id": "https://example.com/#/schema/image/abc"}
            ]
        });

        let mut id_map = HashMap::new();
        id_map.insert(
            "https://example.com/#logo".to_string(),
            "https://example.com/#primaryimage".to_string(),
        );

        rewrite_references(&mut value, &id_map);

        assert_eq!(value["@id"], "https://example.com/#webpage");
        assert_eq!(value["primaryImageOfPage"]["@id"], "https://example.com/#primaryimage");
        assert_eq!(value["image"][0]["@id"], "https://example.com/#primaryimage");
        assert_eq!(value["image"][1]["@id"], "https://example.com/#/schema/image/abc");
    }
}
