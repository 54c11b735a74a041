//! Course

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::Meta;
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::resolve_id;

use super::{type_defaults, NodeKind};

pub static COURSE: Descriptor = Descriptor {
    defaults: Some(course_defaults),
    resolve: Some(resolve_course),
    id: IdPolicy::url(),
    ..Descriptor::new("Course")
};

fn course_defaults(_: &Meta) -> Value {
    type_defaults("Course")
}

fn resolve_course(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);
    resolve_property(
        &mut node,
        "provider",
        graph,
        NodeKind::Organization,
        RelationOptions::root(),
    )?;
    Ok(node)
}
