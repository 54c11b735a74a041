//! HowTo, HowToStep and HowToDirection

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy, Inherit, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::{Meta, MetaField};
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{resolve_id, resolve_url};
use crate::vocab::WellKnown;

use super::{cast_primitive, link_to_slot, type_defaults, NodeKind};

pub static HOW_TO: Descriptor = Descriptor {
    defaults: Some(how_to_defaults),
    inherit_meta: &[
        Inherit::same(MetaField::Description),
        Inherit::same(MetaField::Image),
        Inherit::same(MetaField::InLanguage),
        Inherit::to(MetaField::Title, "name"),
    ],
    resolve: Some(resolve_how_to),
    root_node_resolve: Some(link_how_to),
    id: IdPolicy::url().with_slot(WellKnown::HowTo, SlotClaim::Shared),
    ..Descriptor::new("HowTo")
};

pub static HOW_TO_STEP: Descriptor = Descriptor {
    cast: Some(cast_text),
    defaults: Some(how_to_step_defaults),
    resolve: Some(resolve_how_to_step),
    ..Descriptor::new("HowToStep")
};

pub static HOW_TO_DIRECTION: Descriptor = Descriptor {
    cast: Some(cast_text),
    defaults: Some(how_to_direction_defaults),
    ..Descriptor::new("HowToDirection")
};

fn how_to_defaults(_: &Meta) -> Value {
    type_defaults("HowTo")
}

fn how_to_step_defaults(_: &Meta) -> Value {
    type_defaults("HowToStep")
}

fn how_to_direction_defaults(_: &Meta) -> Value {
    type_defaults("HowToDirection")
}

fn cast_text(value: Value) -> Value {
    cast_primitive(value, "text")
}

fn resolve_how_to(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);
    resolve_property(&mut node, "step", graph, NodeKind::HowToStep, RelationOptions::default())?;
    Ok(node)
}

/// Step urls are page anchors; step images become root nodes
pub(crate) fn resolve_how_to_step(
    mut node: Properties,
    graph: &mut Graph,
) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_url(&mut node, "url", &url);
    resolve_property(&mut node, "image", graph, NodeKind::ImageObject, RelationOptions::root())?;
    resolve_property(
        &mut node,
        "itemListElement",
        graph,
        NodeKind::HowToDirection,
        RelationOptions::default(),
    )?;
    Ok(node)
}

fn link_how_to(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    link_to_slot(graph, index, "mainEntityOfPage", WellKnown::WebPage);
    Ok(())
}
