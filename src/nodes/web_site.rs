//! WebSite and its SearchAction

use serde_json::{json, Value};

use crate::descriptor::{Descriptor, IdPolicy, Inherit, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::id::resolve_with_base_url;
use crate::meta::{Meta, MetaField};
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::resolve_id;
use crate::vocab::WellKnown;

use super::{link_from_slot, link_to_slot, occupies_slot, type_defaults, NodeKind};

pub static WEB_SITE: Descriptor = Descriptor {
    defaults: Some(web_site_defaults),
    inherit_meta: &[
        Inherit::same(MetaField::InLanguage),
        Inherit::to(MetaField::Host, "url"),
    ],
    resolve: Some(resolve_web_site),
    root_node_resolve: Some(link_web_site),
    id: IdPolicy::host().with_slot(WellKnown::WebSite, SlotClaim::Shared),
    ..Descriptor::new("WebSite")
};

pub static SEARCH_ACTION: Descriptor = Descriptor {
    defaults: Some(search_action_defaults),
    resolve: Some(resolve_search_action),
    ..Descriptor::new("SearchAction")
};

fn web_site_defaults(_: &Meta) -> Value {
    type_defaults("WebSite")
}

fn search_action_defaults(_: &Meta) -> Value {
    json!({
        "@type": "SearchAction",
        "target": { "@type": "EntryPoint" },
        "query-input": {
            "@type": "PropertyValueSpecification",
            "valueRequired": true,
            "valueName": "search_term_string",
        },
    })
}

fn resolve_web_site(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let host = graph.meta().host.clone();
    resolve_id(&mut node, &host);
    resolve_property(
        &mut node,
        "potentialAction",
        graph,
        NodeKind::SearchAction,
        RelationOptions::array(),
    )?;
    Ok(node)
}

fn resolve_search_action(
    mut node: Properties,
    graph: &mut Graph,
) -> Result<Properties, GraphError> {
    if let Some(Value::String(target)) = node.get("target") {
        let template = resolve_with_base_url(&graph.meta().host, target);
        node.insert(
            "target".to_string(),
            json!({ "@type": "EntryPoint", "urlTemplate": template }),
        );
    }
    Ok(node)
}

fn link_web_site(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    if occupies_slot(graph, index, WellKnown::WebSite) {
        link_to_slot(graph, index, "publisher", WellKnown::Identity);
        link_from_slot(graph, WellKnown::WebPage, "isPartOf", index);
    }
    Ok(())
}
