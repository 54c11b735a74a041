//! Comment

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::Meta;
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::resolve_id;
use crate::vocab::WellKnown;

use super::{link_to_slot, type_defaults, NodeKind};

pub static COMMENT: Descriptor = Descriptor {
    defaults: Some(comment_defaults),
    resolve: Some(resolve_comment),
    root_node_resolve: Some(link_comment),
    id: IdPolicy::url(),
    ..Descriptor::new("Comment")
};

fn comment_defaults(_: &Meta) -> Value {
    type_defaults("Comment")
}

fn resolve_comment(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);
    resolve_property(&mut node, "author", graph, NodeKind::Person, RelationOptions::root())?;
    Ok(node)
}

fn link_comment(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    link_to_slot(graph, index, "about", WellKnown::Article);
    Ok(())
}
