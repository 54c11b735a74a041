//! Recipe

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy, Inherit, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::{Meta, MetaField};
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::resolve_id;
use crate::vocab::WellKnown;

use super::{link_to_slot, set_on_node, type_defaults, NodeKind};

pub static RECIPE: Descriptor = Descriptor {
    defaults: Some(recipe_defaults),
    inherit_meta: &[
        Inherit::to(MetaField::Title, "name"),
        Inherit::same(MetaField::Description),
        Inherit::same(MetaField::Image),
        Inherit::same(MetaField::DatePublished),
    ],
    resolve: Some(resolve_recipe),
    root_node_resolve: Some(link_recipe),
    id: IdPolicy::url().with_slot(WellKnown::Recipe, SlotClaim::Shared),
    ..Descriptor::new("Recipe")
};

fn recipe_defaults(_: &Meta) -> Value {
    type_defaults("Recipe")
}

fn resolve_recipe(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);
    resolve_property(
        &mut node,
        "recipeInstructions",
        graph,
        NodeKind::HowToStep,
        RelationOptions::default(),
    )?;
    Ok(node)
}

/// A recipe is the main entity of its article when there is one
fn link_recipe(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    if graph.find_slot(WellKnown::Article).is_some() {
        link_to_slot(graph, index, "mainEntityOfPage", WellKnown::Article);
    } else {
        link_to_slot(graph, index, "mainEntityOfPage", WellKnown::WebPage);
    }

    let author = graph
        .find_slot(WellKnown::Article)
        .and_then(|article| article.get("author"))
        .cloned();
    if let Some(author) = author {
        set_on_node(graph, index, "author", author);
    }
    Ok(())
}
