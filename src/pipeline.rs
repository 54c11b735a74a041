//! Graph builder and serializer
//!
//! A build runs two typed passes over the registry. [`Graph::resolve_local`]
//! resolves every node on its own and fixes its `@id`;
//! [`Graph::link_cross_references`] then runs the link hooks, which may look
//! up any other node by id. Both passes walk nodes in registration order.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::GraphError;
use crate::graph::{Graph, Node, Phase};
use crate::merge::dedupe_and_flatten_nodes;
use crate::meta::Meta;
use crate::nodes::NodeKind;
use crate::resolve::{
    execute_resolver_on_node, link_node, resolve_node_id, resolve_relation, RelationOptions,
};
use crate::transform::get_str;
use crate::vocab::SCHEMA_ORG_CONTEXT;

impl Graph {
    /// Pass 1: resolve each registered node and assign its identifier
    ///
    /// Nodes promoted while this pass runs are already resolved and keep
    /// their link hook for pass 2. A string `image` on any node becomes a
    /// promoted ImageObject.
    pub fn resolve_local(&mut self) -> Result<(), GraphError> {
        self.expect_phase(Phase::Registering)?;
        self.sort_by_registration();

        let registered = self.len();
        for index in 0..registered {
            let Some(kind) = self.node(index).and_then(|n| n.kind) else {
                continue;
            };
            let Some(data) = self.node_mut(index).map(|n| std::mem::take(&mut n.data)) else {
                continue;
            };

            let resolved = execute_resolver_on_node(data, self, kind)?;
            let Value::Object(props) = resolved else {
                return Err(GraphError::InvalidNode {
                    kind: kind.to_string(),
                    reason: format!("expected an object, got {}", json_kind(&resolved)),
                });
            };
            let props = resolve_node_id(props, self, kind);

            let id = get_str(&props, "@id").unwrap_or_default().to_string();
            if let Some(node) = self.node_mut(index) {
                debug!(uid = node.uid, kind = %kind, id = %id, "resolved node");
                node.data = Value::Object(props);
            }
        }

        let mut index = 0;
        while index < self.len() {
            self.resolve_image_string(index)?;
            index += 1;
        }

        self.set_phase(Phase::ResolvedLocal);
        Ok(())
    }

    /// Pass 2: run every pending link hook
    pub fn link_cross_references(&mut self) -> Result<(), GraphError> {
        self.expect_phase(Phase::ResolvedLocal)?;
        self.sort_by_registration();

        let mut index = 0;
        while index < self.len() {
            link_node(self, index)?;
            index += 1;
        }

        self.set_phase(Phase::Linked);
        Ok(())
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GraphError> {
        if self.phase() == expected {
            Ok(())
        } else {
            Err(GraphError::PhaseOrder {
                expected,
                found: self.phase(),
            })
        }
    }

    fn resolve_image_string(&mut self, index: usize) -> Result<(), GraphError> {
        let image = match self.node_mut(index).and_then(|n| n.properties_mut()) {
            Some(props) if matches!(props.get("image"), Some(Value::String(_))) => {
                props.remove("image")
            }
            _ => None,
        };
        let Some(image) = image else {
            return Ok(());
        };

        let reference = resolve_relation(image, self, Some(NodeKind::ImageObject), RelationOptions::root())?;
        if let Some(props) = self.node_mut(index).and_then(|n| n.properties_mut()) {
            props.insert("image".to_string(), reference);
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Register `nodes` and run both passes
pub fn build_resolved_graph(nodes: Vec<Node>, meta: Meta) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(meta);
    graph.add_nodes(nodes);
    let registered = graph.len();

    graph.resolve_local()?;
    graph.link_cross_references()?;

    info!(registered, total = graph.len(), url = %graph.meta().url, "graph built");
    Ok(graph)
}

/// Options for pretty printing a rendered graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per indentation level
    pub spaces: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { spaces: 2 }
    }
}

/// Wrap flattened nodes in the schema.org document envelope
pub fn render_nodes_to_schema_org_json(nodes: Vec<Value>) -> Value {
    json!({
        "@context": SCHEMA_ORG_CONTEXT,
        "@graph": nodes,
    })
}

/// Pretty print the document for embedding in a script tag
pub fn render_nodes_to_schema_org_html(
    nodes: Vec<Value>,
    options: &RenderOptions,
) -> Result<String, GraphError> {
    let document = render_nodes_to_schema_org_json(nodes);
    let indent = " ".repeat(options.spaces);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());

    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| GraphError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Build, dedupe and render in one step
pub fn render_graph_to_schema_org_json(nodes: Vec<Node>, meta: Meta) -> Result<Value, GraphError> {
    let graph = build_resolved_graph(nodes, meta)?;
    Ok(render_nodes_to_schema_org_json(dedupe_and_flatten_nodes(graph.into_nodes())))
}
