//! Node registry for a single graph build
//!
//! The [`Graph`] owns every node registered for one build together with the
//! page [`Meta`]. Caller input is moved into internal [`RegisteredNode`]
//! records on registration, so the caller's values are never touched by
//! resolution. A graph is single-writer and lives for exactly one build.

use serde_json::{Map, Value};

use crate::id::{extract_id, resolve_as_graph_key};
use crate::meta::Meta;
use crate::nodes::NodeKind;
use crate::vocab::WellKnown;

/// The property map of a node
pub type Properties = Map<String, Value>;

/// A caller-supplied node awaiting registration
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: Option<NodeKind>,
    value: Value,
}

impl Node {
    /// A node resolved by the descriptor of `kind`
    pub fn new(kind: NodeKind, value: impl Into<Value>) -> Self {
        Self {
            kind: Some(kind),
            value: value.into(),
        }
    }

    /// A node that passes through resolution unchanged
    pub fn untyped(value: impl Into<Value>) -> Self {
        Self {
            kind: None,
            value: value.into(),
        }
    }

    /// A node whose kind is inferred from its `@type`
    ///
    /// Unknown or missing types produce an untyped node.
    pub fn from_value(value: Value) -> Self {
        let kind = NodeKind::from_node(&value);
        Self { kind, value }
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Build phase of a [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nodes are being registered; nothing is resolved yet
    Registering,
    /// Every node is locally resolved and carries its final `@id`
    ResolvedLocal,
    /// Cross-node hooks have run; the graph is ready to flatten
    Linked,
}

/// A node held by the registry
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredNode {
    /// Registration order, strictly increasing within a build
    pub uid: usize,
    /// Descriptor still pending for this node; cleared once linking is done
    pub kind: Option<NodeKind>,
    pub data: Value,
}

impl RegisteredNode {
    pub fn id(&self) -> Option<&str> {
        extract_id(&self.data)
    }

    pub fn properties(&self) -> Option<&Properties> {
        self.data.as_object()
    }

    pub fn properties_mut(&mut self) -> Option<&mut Properties> {
        self.data.as_object_mut()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// Registry of nodes and metadata for one build
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<RegisteredNode>,
    meta: Meta,
    next_uid: usize,
    phase: Phase,
    /// Depth of relation resolution currently in progress
    nesting: usize,
}

impl Graph {
    pub fn new(meta: Meta) -> Self {
        Self {
            nodes: Vec::new(),
            meta,
            next_uid: 0,
            phase: Phase::Registering,
            nesting: 0,
        }
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn enter_relation(&mut self) {
        self.nesting += 1;
    }

    pub(crate) fn leave_relation(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Whether a nested relation value is being resolved
    pub fn is_nested(&self) -> bool {
        self.nesting > 0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register a node, returning its registration uid
    pub fn add_node(&mut self, node: Node) -> usize {
        self.push(node.kind, node.value)
    }

    /// Register several nodes in order
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Append a node, returning its index in the collection
    pub(crate) fn push(&mut self, kind: Option<NodeKind>, data: Value) -> usize {
        let uid = self.next_uid;
        self.next_uid += 1;
        self.nodes.push(RegisteredNode { uid, kind, data });
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[RegisteredNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [RegisteredNode] {
        &mut self.nodes
    }

    pub fn into_nodes(self) -> Vec<RegisteredNode> {
        self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&RegisteredNode> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut RegisteredNode> {
        self.nodes.get_mut(index)
    }

    /// Re-establish ascending registration order
    pub(crate) fn sort_by_registration(&mut self) {
        self.nodes.sort_by_key(|n| n.uid);
    }

    /// Index of the first node whose `@id` shares the graph key of `id`
    pub fn find_index(&self, id: &str) -> Option<usize> {
        let key = resolve_as_graph_key(id);
        self.nodes
            .iter()
            .position(|n| n.id().map(resolve_as_graph_key) == Some(key))
    }

    /// First node whose `@id` shares the graph key of `id`
    pub fn find_node(&self, id: &str) -> Option<&RegisteredNode> {
        self.find_index(id).and_then(|i| self.nodes.get(i))
    }

    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut RegisteredNode> {
        self.find_index(id).and_then(move |i| self.nodes.get_mut(i))
    }

    /// Node currently occupying a well-known slot
    pub fn find_slot(&self, slot: WellKnown) -> Option<&RegisteredNode> {
        self.find_node(slot.fragment())
    }

    pub fn find_slot_mut(&mut self, slot: WellKnown) -> Option<&mut RegisteredNode> {
        self.find_node_mut(slot.fragment())
    }

    /// Full `@id` of the node occupying a slot
    pub fn slot_id(&self, slot: WellKnown) -> Option<String> {
        self.find_slot(slot).and_then(|n| n.id()).map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MetaInput;
    use serde_json::json;

    fn graph() -> Graph {
        Graph::new(Meta::resolve(MetaInput::for_host("https://example.com/")).unwrap())
    }

    #[test]
    fn test_add_node_assigns_increasing_uids() {
        let mut graph = graph();
        let a = graph.add_node(Node::untyped(json!({"name": "a"})));
        let b = graph.add_node(Node::untyped(json!({"name": "b"})));
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.phase(), Phase::Registering);
    }

    #[test]
    fn test_caller_value_is_not_mutated() {
        let input = json!({"name": "a"});
        let mut graph = graph();
        graph.add_node(Node::untyped(input.clone()));
        assert_eq!(input, json!({"name": "a"}));
        assert_eq!(graph.nodes()[0].data, input);
    }

    #[test]
    fn test_find_node_normalizes_ids() {
        let mut graph = graph();
        graph.add_node(Node::untyped(json!({"@id": "https://example.com/#identity", "name": "a"})));
        graph.add_node(Node::untyped(json!({"name": "no id"})));

        assert!(graph.find_node("#identity").is_some());
        assert!(graph.find_node("https://other.com/#identity").is_some());
        assert!(graph.find_node("#website").is_none());
        assert_eq!(
            graph.slot_id(WellKnown::Identity).as_deref(),
            Some("https://example.com/#identity")
        );
    }

    #[test]
    fn test_find_node_returns_first_duplicate() {
        let mut graph = graph();
        graph.add_node(Node::untyped(json!({"@id": "#dup", "name": "first"})));
        graph.add_node(Node::untyped(json!({"@id": "#dup", "name": "second"})));
        assert_eq!(graph.find_node("#dup").unwrap().get("name"), Some(&json!("first")));
    }

    #[test]
    fn test_relation_nesting() {
        let mut graph = graph();
        assert!(!graph.is_nested());
        graph.enter_relation();
        graph.enter_relation();
        graph.leave_relation();
        assert!(graph.is_nested());
        graph.leave_relation();
        assert!(!graph.is_nested());
    }

    #[test]
    fn test_from_value_infers_kind() {
        let node = Node::from_value(json!({"@type": "Organization", "name": "a"}));
        assert_eq!(node.kind(), Some(NodeKind::Organization));

        let unknown = Node::from_value(json!({"@type": "Spaceship"}));
        assert_eq!(unknown.kind(), None);
    }
}
