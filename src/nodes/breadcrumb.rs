//! BreadcrumbList and ListItem

use serde_json::{json, Value};

use crate::descriptor::{Descriptor, IdPolicy, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::Meta;
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{resolve_url, set_if_empty};
use crate::vocab::WellKnown;

use super::{cast_primitive, link_from_slot, type_defaults, NodeKind};

pub static BREADCRUMB: Descriptor = Descriptor {
    defaults: Some(breadcrumb_defaults),
    resolve: Some(resolve_breadcrumb),
    root_node_resolve: Some(link_breadcrumb),
    id: IdPolicy::url().with_slot(WellKnown::Breadcrumb, SlotClaim::FirstClaim),
    ..Descriptor::new("BreadcrumbList")
};

pub static LIST_ITEM: Descriptor = Descriptor {
    cast: Some(cast_list_item),
    defaults: Some(list_item_defaults),
    resolve: Some(resolve_list_item),
    ..Descriptor::new("ListItem")
};

fn breadcrumb_defaults(_: &Meta) -> Value {
    type_defaults("BreadcrumbList")
}

fn list_item_defaults(_: &Meta) -> Value {
    type_defaults("ListItem")
}

fn cast_list_item(value: Value) -> Value {
    cast_primitive(value, "name")
}

/// Items without a position are numbered by their place in the list
fn resolve_breadcrumb(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let mut position = 1;
    let mut number_items = |item: &mut Properties, _: &Graph| {
        set_if_empty(item, "position", json!(position));
        position += 1;
    };
    resolve_property(
        &mut node,
        "itemListElement",
        graph,
        NodeKind::ListItem,
        RelationOptions::array().with_after_resolve(&mut number_items),
    )?;
    Ok(node)
}

fn resolve_list_item(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    resolve_url(&mut node, "item", &graph.meta().host);
    Ok(node)
}

fn link_breadcrumb(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    link_from_slot(graph, WellKnown::WebPage, "breadcrumb", index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::meta::MetaInput;
    use crate::nodes::test_support::{build, find};

    #[test]
    fn test_breadcrumb_positions() {
        let nodes = build(
            MetaInput::for_host("https://example.com/"),
            vec![Node::new(
                NodeKind::BreadcrumbList,
                json!({
                    "itemListElement": [
                        {"name": "Home", "item": "/"},
                        {"name": "Blog", "item": "/blog"},
                        {"name": "My Article"}
                    ]
                }),
            )],
        );

        assert_eq!(
            find(&nodes, "#breadcrumb"),
            &json!({
                "@id": "https://example.com/#breadcrumb",
                "@type": "BreadcrumbList",
                "itemListElement": [
                    {"@type": "ListItem", "item": "https://example.com", "name": "Home", "position": 1},
                    {"@type": "ListItem", "item": "https://example.com/blog", "name": "Blog", "position": 2},
                    {"@type": "ListItem", "name": "My Article", "position": 3}
                ]
            })
        );
    }

    #[test]
    fn test_duplicate_breadcrumbs() {
        let nodes = build(
            MetaInput::for_host("https://example.com/"),
            vec![
                Node::new(
                    NodeKind::BreadcrumbList,
                    json!({"itemListElement": [{"name": "Home", "item": "/", "position": 1}]}),
                ),
                Node::new(
                    NodeKind::BreadcrumbList,
                    json!({"itemListElement": [{"name": "Joining page", "item": "/blog/test"}]}),
                ),
                Node::new(
                    NodeKind::BreadcrumbList,
                    json!({"@id": "#subbreadcrumb", "itemListElement": ["Some other link"]}),
                ),
                Node::new(
                    NodeKind::BreadcrumbList,
                    json!({"@id": "#subbreadcrumb", "custom": "test", "itemListElement": ["Some other link"]}),
                ),
            ],
        );

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0]["@id"], json!("https://example.com/#breadcrumb"));
        assert!(nodes[1]["@id"]
            .as_str()
            .unwrap()
            .starts_with("https://example.com/#/schema/breadcrumblist/"));
        assert_eq!(nodes[1]["itemListElement"][0]["position"], json!(1));
        assert_eq!(nodes[2]["@id"], json!("https://example.com/#subbreadcrumb"));
        assert_eq!(nodes[2]["custom"], json!("test"));
    }

    #[test]
    fn test_web_page_references_breadcrumb() {
        let nodes = build(
            MetaInput::for_host("https://example.com/"),
            vec![
                Node::new(NodeKind::BreadcrumbList, json!({"itemListElement": ["Home"]})),
                Node::new(NodeKind::WebPage, json!({})),
            ],
        );
        assert_eq!(
            find(&nodes, "#webpage")["breadcrumb"],
            json!({"@id": "https://example.com/#breadcrumb"})
        );
    }
}
