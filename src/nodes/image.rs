//! ImageObject

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy, Inherit};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::id::prefix_id;
use crate::meta::{Meta, MetaField};
use crate::transform::{resolve_id, resolve_url, set_if_empty};
use crate::vocab::WellKnown;

use super::{cast_primitive, link_from_slot, type_defaults};

pub static IMAGE: Descriptor = Descriptor {
    alias: Some("image"),
    cast: Some(cast_image),
    defaults: Some(image_defaults),
    inherit_meta: &[Inherit::same(MetaField::InLanguage)],
    resolve: Some(resolve_image),
    root_node_resolve: Some(link_image),
    id: IdPolicy::host(),
    ..Descriptor::new("ImageObject")
};

fn cast_image(value: Value) -> Value {
    cast_primitive(value, "url")
}

fn image_defaults(_: &Meta) -> Value {
    type_defaults("ImageObject")
}

fn resolve_image(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let host = graph.meta().host.clone();
    resolve_url(&mut node, "url", &host);
    resolve_id(&mut node, &host);
    if let Some(url) = node.get("url").cloned() {
        set_if_empty(&mut node, "contentUrl", url);
    }

    // dimensions only render as a pair
    match (node.contains_key("width"), node.contains_key("height")) {
        (true, false) => {
            node.remove("width");
        }
        (false, true) => {
            node.remove("height");
        }
        _ => {}
    }
    Ok(node)
}

/// The first root image on a page with a WebPage becomes its primary image
fn link_image(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    if graph.find_slot(WellKnown::PrimaryImage).is_some()
        || graph.find_slot(WellKnown::WebPage).is_none()
    {
        return Ok(());
    }

    let id = prefix_id(&graph.meta().url, WellKnown::PrimaryImage.fragment());
    if let Some(props) = graph.node_mut(index).and_then(|n| n.properties_mut()) {
        props.insert("@id".to_string(), Value::String(id));
    }
    link_from_slot(graph, WellKnown::WebPage, "primaryImageOfPage", index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::meta::MetaInput;
    use crate::nodes::test_support::{build, find};
    use crate::nodes::NodeKind;
    use serde_json::json;

    #[test]
    fn test_image_without_web_page() {
        let nodes = build(
            MetaInput::for_host("https://example.com/"),
            vec![Node::new(
                NodeKind::ImageObject,
                json!({"url": "/cat.jpg", "width": 800, "caption": "Cat"}),
            )],
        );

        assert_eq!(nodes.len(), 1);
        let image = &nodes[0];
        assert!(image["@id"]
            .as_str()
            .unwrap()
            .starts_with("https://example.com/#/schema/image/"));
        assert_eq!(image["contentUrl"], json!("https://example.com/cat.jpg"));
        assert!(image.get("width").is_none());
    }

    #[test]
    fn test_first_image_claims_primary_image() {
        let nodes = build(
            MetaInput {
                path: Some("/blog/post".to_string()),
                ..MetaInput::for_host("https://example.com/")
            },
            vec![
                Node::new(NodeKind::WebPage, json!({})),
                Node::new(NodeKind::ImageObject, json!({"url": "/a.jpg", "width": 10, "height": 10})),
                Node::new(NodeKind::ImageObject, json!("/b.jpg")),
            ],
        );

        let primary = find(&nodes, "#primaryimage");
        assert_eq!(primary["@id"], json!("https://example.com/blog/post/#primaryimage"));
        assert_eq!(primary["url"], json!("https://example.com/a.jpg"));
        assert_eq!(primary["width"], json!(10));
        assert_eq!(
            find(&nodes, "#webpage")["primaryImageOfPage"],
            json!({"@id": "https://example.com/blog/post/#primaryimage"})
        );
        assert_eq!(nodes.len(), 3);
    }
}
