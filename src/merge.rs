//! Deduplication of resolved nodes
//!
//! Nodes sharing a graph key collapse into one. The policy is
//! last-registered-wins: the later node replaces the earlier one's whole
//! property map, no deep merge. Output order is the first-seen order of each
//! key, walking nodes in registration order.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::graph::RegisteredNode;
use crate::id::{content_hash, extract_id, resolve_as_graph_key};

/// Graph key of a node: its normalized `@id`, else a content hash
pub fn node_graph_key(node: &Value) -> String {
    match extract_id(node) {
        Some(id) => resolve_as_graph_key(id).to_string(),
        None => content_hash(node),
    }
}

/// Collapse nodes sharing a graph key and order their properties
pub fn dedupe_and_flatten_nodes(mut nodes: Vec<RegisteredNode>) -> Vec<Value> {
    nodes.sort_by_key(|n| n.uid);

    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, Value> = HashMap::new();

    for node in nodes {
        let key = node_graph_key(&node.data);
        let flattened = sort_properties(node.data);
        if by_key.insert(key.clone(), flattened).is_some() {
            debug!(key = %key, uid = node.uid, "later registration replaces node");
        } else {
            order.push(key);
        }
    }

    order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect()
}

/// Rebuild an object with its keys in alphabetical order
fn sort_properties(value: Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect::<Map<String, Value>>())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registered(uid: usize, data: Value) -> RegisteredNode {
        RegisteredNode {
            uid,
            kind: None,
            data,
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let nodes = vec![
            registered(0, json!({"@id": "https://example.com/#website", "name": "First", "url": "a"})),
            registered(1, json!({"@id": "https://example.com/#identity", "name": "Acme"})),
            registered(2, json!({"@id": "https://example.com/#website", "name": "Second"})),
        ];

        let result = dedupe_and_flatten_nodes(nodes);
        assert_eq!(result.len(), 2);
        // first-seen order, whole-map overwrite
        assert_eq!(result[0], json!({"@id": "https://example.com/#website", "name": "Second"}));
        assert_eq!(result[1]["name"], json!("Acme"));
    }

    #[test]
    fn test_registration_order_not_vec_order() {
        let nodes = vec![
            registered(5, json!({"@id": "#a", "v": "late"})),
            registered(1, json!({"@id": "#a", "v": "early"})),
            registered(3, json!({"@id": "#b"})),
        ];
        let result = dedupe_and_flatten_nodes(nodes);
        assert_eq!(result, vec![json!({"@id": "#a", "v": "late"}), json!({"@id": "#b"})]);
    }

    #[test]
    fn test_keys_compare_by_fragment() {
        let nodes = vec![
            registered(0, json!({"@id": "https://example.com/#identity", "name": "a"})),
            registered(1, json!({"@id": "https://example.com/about/#identity", "name": "b"})),
        ];
        let result = dedupe_and_flatten_nodes(nodes);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["name"], json!("b"));
    }

    #[test]
    fn test_nodes_without_id_dedupe_by_content() {
        let nodes = vec![
            registered(0, json!({"name": "same"})),
            registered(1, json!({"name": "same"})),
            registered(2, json!({"name": "different"})),
        ];
        assert_eq!(dedupe_and_flatten_nodes(nodes).len(), 2);
    }

    #[test]
    fn test_properties_are_sorted() {
        let result = dedupe_and_flatten_nodes(vec![registered(
            0,
            json!({"url": "u", "@type": "Thing", "name": "n", "@id": "#x"}),
        )]);
        let keys: Vec<&String> = result[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["@id", "@type", "name", "url"]);
    }
}
