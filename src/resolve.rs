//! Resolver engine and relation resolver
//!
//! [`execute_resolver_on_node`] runs one node through its descriptor
//! (cast, defaults, metadata inheritance, resolve, clean-up) and
//! [`resolve_node_id`] assigns its identifier. [`resolve_relation`] applies
//! the same steps to nested values and can promote them to root nodes.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, trace};

use crate::descriptor::{Descriptor, IdBase, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Phase, Properties};
use crate::id::{
    classify_id, content_hash, id_reference, is_reference, prefix_id, resolve_id_with_base_url,
    rewrite_references, IdKind,
};
use crate::nodes::NodeKind;
use crate::transform::{as_array, clean_attributes, extract_types, get_str, merge_defaults, set_if_empty};
use crate::vocab::{WellKnown, GENERATED_ID_PREFIX};

/// Callback run on each resolved relation element before ids are assigned
pub type AfterResolve<'a> = &'a mut dyn FnMut(&mut Properties, &Graph);

/// Options for [`resolve_relation`]
#[derive(Default)]
pub struct RelationOptions<'a> {
    /// Always return a list, even for a single element
    pub array: bool,
    /// Promote each element to a root node and return references
    pub root: bool,
    /// Assign ids to inline elements
    pub generate_id: bool,
    pub after_resolve: Option<AfterResolve<'a>>,
}

impl<'a> RelationOptions<'a> {
    pub fn array() -> Self {
        Self {
            array: true,
            ..Default::default()
        }
    }

    pub fn root() -> Self {
        Self {
            root: true,
            ..Default::default()
        }
    }

    pub fn with_after_resolve(mut self, callback: AfterResolve<'a>) -> Self {
        self.after_resolve = Some(callback);
        self
    }
}

/// Run a node through the descriptor of `kind`
///
/// Values that are not objects after casting are returned as cast; the
/// caller decides whether that is an error.
pub fn execute_resolver_on_node(
    input: Value,
    graph: &mut Graph,
    kind: NodeKind,
) -> Result<Value, GraphError> {
    let descriptor = kind.descriptor();

    let value = match descriptor.cast {
        Some(cast) => cast(input),
        None => input,
    };
    let Value::Object(mut node) = value else {
        return Ok(value);
    };

    if let Some(defaults) = descriptor.defaults {
        merge_defaults(&mut node, defaults(graph.meta()));
    }

    for rule in descriptor.inherit_meta {
        if let Some(value) = graph.meta().get(rule.field) {
            set_if_empty(&mut node, rule.key, value);
        }
    }

    if let Some(resolve) = descriptor.resolve {
        node = resolve(node, graph)?;
    }

    clean_attributes(&mut node);
    Ok(Value::Object(node))
}

/// Assign or normalize the `@id` of a resolved node
pub fn resolve_node_id(mut node: Properties, graph: &Graph, kind: NodeKind) -> Properties {
    let descriptor = kind.descriptor();
    let meta = graph.meta();
    let base = match descriptor.id.base {
        IdBase::Host => meta.host.as_str(),
        IdBase::Url => meta.url.as_str(),
    };

    let id = match get_str(&node, "@id") {
        Some(id) => match classify_id(id) {
            IdKind::Fragment => prefix_id(base, id),
            IdKind::Path => resolve_id_with_base_url(base, id),
            IdKind::Absolute | IdKind::Opaque => id.to_string(),
        },
        None => match descriptor.id.slot {
            Some((slot, SlotClaim::Shared)) => prefix_id(base, slot.fragment()),
            Some((slot, SlotClaim::FirstClaim)) if claims_first_slot(graph, slot, &node) => {
                prefix_id(base, slot.fragment())
            }
            _ => {
                let hash = content_hash(&Value::Object(node.clone()));
                let alias = id_alias(descriptor, &node);
                prefix_id(base, &format!("{}/{}/{}", GENERATED_ID_PREFIX, alias, hash))
            }
        },
    };

    node.insert("@id".to_string(), Value::String(id));
    node
}

/// Whether a node may take a first-claim slot
///
/// A free slot goes to the first root node; nested relations never open
/// one. An occupied slot is re-taken only by the same entity.
fn claims_first_slot(graph: &Graph, slot: WellKnown, node: &Properties) -> bool {
    match graph.find_slot(slot).and_then(|n| n.properties()) {
        Some(occupant) => same_entity(occupant, node),
        None => !graph.is_nested(),
    }
}

/// Same `@type` and either the same `name` or, unnamed, the same content
fn same_entity(a: &Properties, b: &Properties) -> bool {
    if a.get("@type") != b.get("@type") {
        return false;
    }
    match (a.get("name"), b.get("name")) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a
            .iter()
            .filter(|(k, _)| k.as_str() != "@id")
            .eq(b.iter().filter(|(k, _)| k.as_str() != "@id")),
        _ => false,
    }
}

fn id_alias(descriptor: &Descriptor, node: &Properties) -> String {
    if let Some(alias) = descriptor.alias {
        return alias.to_string();
    }
    let types = node
        .get("@type")
        .map(|t| extract_types(&serde_json::json!({ "@type": t })))
        .unwrap_or_default();
    match types.first() {
        Some(first) => first.to_lowercase(),
        None => descriptor.alias(),
    }
}

/// Resolve a nested relation value
///
/// Null passes through, as do bare references and elements with no
/// applicable descriptor. An element whose own `@type` names a known kind
/// uses that kind instead of `fallback`.
pub fn resolve_relation(
    input: Value,
    graph: &mut Graph,
    fallback: Option<NodeKind>,
    mut options: RelationOptions<'_>,
) -> Result<Value, GraphError> {
    if input.is_null() {
        return Ok(input);
    }

    let mut resolved = Vec::new();
    for element in as_array(input) {
        if is_reference(&element) {
            resolved.push(element);
            continue;
        }
        let Some(kind) = NodeKind::from_node(&element).or(fallback) else {
            resolved.push(element);
            continue;
        };

        graph.enter_relation();
        let value = resolve_element(element, graph, kind, &mut options);
        graph.leave_relation();

        match value? {
            Value::Object(node) if options.root => resolved.push(promote(graph, kind, node)?),
            value => resolved.push(value),
        }
    }

    if resolved.len() == 1 && !options.array {
        trace!("single relation element unwrapped to scalar");
        return Ok(resolved.swap_remove(0));
    }
    trace!(count = resolved.len(), "relation resolved as list");
    Ok(Value::Array(resolved))
}

fn resolve_element(
    element: Value,
    graph: &mut Graph,
    kind: NodeKind,
    options: &mut RelationOptions<'_>,
) -> Result<Value, GraphError> {
    let value = execute_resolver_on_node(element, graph, kind)?;
    let Value::Object(mut node) = value else {
        return Ok(value);
    };
    if let Some(after_resolve) = options.after_resolve.as_deref_mut() {
        after_resolve(&mut node, graph);
    }
    if options.generate_id || options.root {
        node = resolve_node_id(node, graph, kind);
    }
    Ok(Value::Object(node))
}

/// Resolve the relation stored at `key` in place
pub fn resolve_property(
    node: &mut Properties,
    key: &str,
    graph: &mut Graph,
    fallback: NodeKind,
    options: RelationOptions<'_>,
) -> Result<(), GraphError> {
    if let Some(value) = node.remove(key) {
        let resolved = resolve_relation(value, graph, Some(fallback), options)?;
        node.insert(key.to_string(), resolved);
    }
    Ok(())
}

/// Register a resolved node as a root node and return a reference to it
///
/// While nodes are still being registered the link hook is deferred to the
/// cross-link pass; afterwards it runs immediately.
fn promote(graph: &mut Graph, kind: NodeKind, node: Properties) -> Result<Value, GraphError> {
    let deferred = graph.phase() == Phase::Registering;
    let index = graph.push(Some(kind), Value::Object(node));
    if !deferred {
        link_node(graph, index)?;
    }

    let id = graph
        .node(index)
        .and_then(|n| n.id())
        .map(str::to_owned)
        .unwrap_or_default();
    debug!(kind = %kind, id = %id, deferred, "promoted relation to root node");
    Ok(id_reference(&id))
}

/// Run the pending link hook of the node at `index`, once
///
/// If the hook changes the node's own `@id`, every reference to the old id
/// is rewritten across the graph.
pub(crate) fn link_node(graph: &mut Graph, index: usize) -> Result<(), GraphError> {
    let Some(kind) = graph.node_mut(index).and_then(|n| n.kind.take()) else {
        return Ok(());
    };
    let Some(hook) = kind.descriptor().root_node_resolve else {
        return Ok(());
    };

    let before = graph.node(index).and_then(|n| n.id()).map(str::to_owned);
    hook(index, graph)?;
    let after = graph.node(index).and_then(|n| n.id()).map(str::to_owned);
    debug!(kind = %kind, id = after.as_deref().unwrap_or_default(), "linked node");

    if let (Some(before), Some(after)) = (before, after) {
        if before != after {
            debug!(from = %before, to = %after, "node re-identified, rewriting references");
            let mut id_map = HashMap::new();
            id_map.insert(before, after);
            for node in graph.nodes_mut() {
                if let Some(props) = node.properties_mut() {
                    for (key, value) in props.iter_mut() {
                        if key != "@id" {
                            rewrite_references(value, &id_map);
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
