//! Question and Answer
//!
//! Questions on an FAQPage are collected into the page's `mainEntity`.

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy, Inherit};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::id::id_reference;
use crate::meta::{Meta, MetaField};
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{dedupe_merge, has_type, resolve_id};
use crate::vocab::WellKnown;

use super::{cast_primitive, node_id, type_defaults, NodeKind};

pub static QUESTION: Descriptor = Descriptor {
    defaults: Some(question_defaults),
    inherit_meta: &[Inherit::same(MetaField::InLanguage)],
    resolve: Some(resolve_question),
    root_node_resolve: Some(link_question),
    id: IdPolicy::url(),
    ..Descriptor::new("Question")
};

pub static ANSWER: Descriptor = Descriptor {
    cast: Some(cast_answer),
    defaults: Some(answer_defaults),
    ..Descriptor::new("Answer")
};

fn question_defaults(_: &Meta) -> Value {
    type_defaults("Question")
}

fn answer_defaults(_: &Meta) -> Value {
    type_defaults("Answer")
}

fn cast_answer(value: Value) -> Value {
    cast_primitive(value, "text")
}

/// Accepts the `question`/`answer` shorthand for `name`/`acceptedAnswer`
fn resolve_question(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    if let Some(question) = node.remove("question") {
        node.insert("name".to_string(), question);
    }
    if let Some(answer) = node.remove("answer") {
        node.insert("acceptedAnswer".to_string(), answer);
    }

    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);
    resolve_property(
        &mut node,
        "acceptedAnswer",
        graph,
        NodeKind::Answer,
        RelationOptions::default(),
    )?;
    Ok(node)
}

fn link_question(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    let Some(id) = node_id(graph, index) else {
        return Ok(());
    };
    if let Some(page) = graph.find_slot_mut(WellKnown::WebPage) {
        if has_type(&page.data, "FAQPage") {
            if let Some(props) = page.properties_mut() {
                dedupe_merge(props, "mainEntity", id_reference(&id));
            }
        }
    }
    Ok(())
}
