//! Person

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::Meta;
use crate::transform::resolve_id;
use crate::vocab::WellKnown;

use super::{cast_primitive, link_from_slot, occupies_slot, set_on_node, type_defaults};

/// The first person registered becomes the site identity unless an
/// organization already claimed it.
pub static PERSON: Descriptor = Descriptor {
    cast: Some(cast_person),
    defaults: Some(person_defaults),
    resolve: Some(resolve_person),
    root_node_resolve: Some(link_person),
    id: IdPolicy::host().with_slot(WellKnown::Identity, SlotClaim::FirstClaim),
    ..Descriptor::new("Person")
};

fn cast_person(value: Value) -> Value {
    cast_primitive(value, "name")
}

fn person_defaults(_: &Meta) -> Value {
    type_defaults("Person")
}

fn resolve_person(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    resolve_id(&mut node, &graph.meta().host);
    Ok(node)
}

fn link_person(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    if occupies_slot(graph, index, WellKnown::Identity) {
        let host = graph.meta().host.clone();
        set_on_node(graph, index, "url", Value::String(host));
        link_from_slot(graph, WellKnown::WebPage, "about", index);
        link_from_slot(graph, WellKnown::WebSite, "publisher", index);
    }
    link_from_slot(graph, WellKnown::Article, "author", index);
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
    fn test_person_as_identity() {
        let nodes = build(
            MetaInput::for_host("https://example.com/"),
            vec![
                Node::new(NodeKind::Person, json!("Harlan Wilton")),
                Node::new(NodeKind::WebPage, json!({})),
                Node::new(NodeKind::WebSite, json!({"name": "Harlan's blog"})),
            ],
        );

        assert_eq!(
            find(&nodes, "#identity"),
            &json!({
                "@id": "https://example.com/#identity",
                "@type": "Person",
                "name": "Harlan Wilton",
                "url": "https://example.com/"
            })
        );
        let identity = json!({"@id": "https://example.com/#identity"});
        assert_eq!(find(&nodes, "#webpage")["about"], identity);
        assert_eq!(find(&nodes, "#website")["publisher"], identity);
    }

    #[test]
    fn test_second_person_is_not_identity() {
        let nodes = build(
            MetaInput::for_host("https://example.com/"),
            vec![
                Node::new(NodeKind::Person, json!({"name": "First"})),
                Node::new(NodeKind::Person, json!({"name": "Second"})),
            ],
        );

        assert_eq!(nodes.len(), 2);
        let second = nodes.iter().find(|n| n["name"] == json!("Second")).unwrap();
        assert!(second["@id"]
            .as_str()
            .unwrap()
            .starts_with("https://example.com/#/schema/person/"));
        assert!(second.get("url").is_none());
    }
}
