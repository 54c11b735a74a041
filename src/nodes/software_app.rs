//! SoftwareApplication

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::Meta;
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::resolve_id;

use super::{type_defaults, NodeKind};

/// `@type`s that are resolved as a SoftwareApplication
pub const SUBTYPES: &[&str] = &["MobileApplication", "VideoGame", "WebApplication"];

pub static SOFTWARE_APP: Descriptor = Descriptor {
    alias: Some("software-app"),
    defaults: Some(software_app_defaults),
    resolve: Some(resolve_software_app),
    id: IdPolicy::url(),
    ..Descriptor::new("SoftwareApplication")
};

fn software_app_defaults(_: &Meta) -> Value {
    type_defaults("SoftwareApplication")
}

fn resolve_software_app(
    mut node: Properties,
    graph: &mut Graph,
) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);
    resolve_property(&mut node, "offers", graph, NodeKind::Offer, RelationOptions::default())?;
    resolve_property(
        &mut node,
        "aggregateRating",
        graph,
        NodeKind::AggregateRating,
        RelationOptions::default(),
    )?;
    resolve_property(&mut node, "review", graph, NodeKind::Review, RelationOptions::default())?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::meta::MetaInput;
    use crate::nodes::test_support::build;
    use crate::vocab::IN_STOCK;
    use serde_json::json;

    #[test]
    fn test_software_app_offers_and_rating() {
        let nodes = build(
            MetaInput::for_host("https://example.com/"),
            vec![Node::new(
                NodeKind::SoftwareApplication,
                json!({
                    "name": "Angry Birds",
                    "operatingSystem": "ANDROID",
                    "applicationCategory": "GameApplication",
                    "aggregateRating": {"ratingValue": "4.6", "ratingCount": 8864},
                    "offers": {"price": "1.00", "priceCurrency": "USD"}
                }),
            )],
        );

        assert_eq!(nodes.len(), 1);
        let app = &nodes[0];
        assert_eq!(app["@type"], json!("SoftwareApplication"));
        assert!(app["@id"]
            .as_str()
            .unwrap()
            .starts_with("https://example.com/#/schema/software-app/"));
        assert_eq!(app["operatingSystem"], json!("ANDROID"));
        assert_eq!(
            app["aggregateRating"],
            json!({"@type": "AggregateRating", "ratingCount": 8864, "ratingValue": "4.6"})
        );
        assert_eq!(app["offers"]["@type"], json!("Offer"));
        assert_eq!(app["offers"]["availability"], json!(IN_STOCK));
        assert_eq!(app["offers"]["price"], json!("1.00"));
        assert_eq!(app["offers"]["priceCurrency"], json!("USD"));
    }

    #[test]
    fn test_subtype_keeps_its_type() {
        let node = Node::from_value(json!({"@type": "VideoGame", "name": "Chess"}));
        assert_eq!(node.kind(), Some(NodeKind::SoftwareApplication));

        let nodes = build(MetaInput::for_host("https://example.com/"), vec![node]);
        assert_eq!(nodes[0]["@type"], json!("VideoGame"));
    }
}
