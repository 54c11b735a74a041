//! Product with its offers, ratings and reviews

use chrono::{Datelike, Utc};
use serde_json::{json, Value};

use crate::descriptor::{Descriptor, IdPolicy, Inherit, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::id::content_hash;
use crate::meta::{Meta, MetaField};
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{as_array, resolve_date_property, resolve_id, set_if_empty};
use crate::vocab::{WellKnown, IN_STOCK};

use super::{cast_primitive, link_to_slot, type_defaults, NodeKind};

pub static PRODUCT: Descriptor = Descriptor {
    defaults: Some(product_defaults),
    inherit_meta: &[
        Inherit::same(MetaField::Description),
        Inherit::same(MetaField::Image),
        Inherit::to(MetaField::Title, "name"),
    ],
    resolve: Some(resolve_product),
    root_node_resolve: Some(link_product),
    id: IdPolicy::url().with_slot(WellKnown::Product, SlotClaim::Shared),
    ..Descriptor::new("Product")
};

pub static OFFER: Descriptor = Descriptor {
    cast: Some(cast_offer),
    defaults: Some(offer_defaults),
    resolve: Some(resolve_offer),
    ..Descriptor::new("Offer")
};

pub static AGGREGATE_OFFER: Descriptor = Descriptor {
    defaults: Some(aggregate_offer_defaults),
    resolve: Some(resolve_aggregate_offer),
    ..Descriptor::new("AggregateOffer")
};

pub static AGGREGATE_RATING: Descriptor = Descriptor {
    alias: Some("aggregate-rating"),
    defaults: Some(aggregate_rating_defaults),
    ..Descriptor::new("AggregateRating")
};

pub static RATING: Descriptor = Descriptor {
    cast: Some(cast_rating),
    defaults: Some(rating_defaults),
    ..Descriptor::new("Rating")
};

pub static REVIEW: Descriptor = Descriptor {
    defaults: Some(review_defaults),
    inherit_meta: &[Inherit::same(MetaField::InLanguage)],
    resolve: Some(resolve_review),
    ..Descriptor::new("Review")
};

fn product_defaults(_: &Meta) -> Value {
    type_defaults("Product")
}

fn offer_defaults(_: &Meta) -> Value {
    json!({
        "@type": "Offer",
        "availability": IN_STOCK,
    })
}

fn aggregate_offer_defaults(_: &Meta) -> Value {
    type_defaults("AggregateOffer")
}

fn aggregate_rating_defaults(_: &Meta) -> Value {
    type_defaults("AggregateRating")
}

fn rating_defaults(_: &Meta) -> Value {
    json!({
        "@type": "Rating",
        "bestRating": 5,
        "worstRating": 1,
    })
}

fn review_defaults(_: &Meta) -> Value {
    type_defaults("Review")
}

fn cast_offer(value: Value) -> Value {
    cast_primitive(value, "price")
}

fn cast_rating(value: Value) -> Value {
    cast_primitive(value, "ratingValue")
}

/// Offers stay valid until the end of next year unless told otherwise
fn end_of_next_year() -> String {
    format!("{}-12-31T00:00:00.000Z", Utc::now().year() + 1)
}

fn resolve_product(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);

    if let Some(name) = node.get("name").cloned() {
        set_if_empty(&mut node, "sku", Value::String(content_hash(&name)));
    }

    resolve_property(
        &mut node,
        "aggregateOffer",
        graph,
        NodeKind::AggregateOffer,
        RelationOptions::default(),
    )?;
    resolve_property(
        &mut node,
        "aggregateRating",
        graph,
        NodeKind::AggregateRating,
        RelationOptions::default(),
    )?;
    resolve_property(&mut node, "offers", graph, NodeKind::Offer, RelationOptions::default())?;
    resolve_property(&mut node, "review", graph, NodeKind::Review, RelationOptions::default())?;
    Ok(node)
}

fn resolve_offer(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let meta = graph.meta();
    // never fabricate a currency
    if let Some(currency) = &meta.currency {
        set_if_empty(&mut node, "priceCurrency", Value::String(currency.clone()));
    }
    set_if_empty(&mut node, "priceValidUntil", Value::String(end_of_next_year()));
    set_if_empty(&mut node, "url", Value::String(meta.url.clone()));
    resolve_date_property(&mut node, "priceValidUntil");
    Ok(node)
}

fn resolve_aggregate_offer(
    mut node: Properties,
    graph: &mut Graph,
) -> Result<Properties, GraphError> {
    resolve_property(&mut node, "offers", graph, NodeKind::Offer, RelationOptions::default())?;
    let count = node.get("offers").cloned().map(as_array).map(|o| o.len()).unwrap_or(0);
    if count > 0 {
        set_if_empty(&mut node, "offerCount", json!(count));
    }
    Ok(node)
}

fn resolve_review(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    resolve_property(
        &mut node,
        "reviewRating",
        graph,
        NodeKind::Rating,
        RelationOptions::default(),
    )?;
    resolve_property(&mut node, "author", graph, NodeKind::Person, RelationOptions::default())?;
    Ok(node)
}

fn link_product(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    link_to_slot(graph, index, "brand", WellKnown::Identity);
    link_to_slot(graph, index, "mainEntityOfPage", WellKnown::WebPage);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::meta::MetaInput;
    use crate::nodes::test_support::{build, find};

    #[test]
    fn test_offer_currency_not_fabricated() {
        let nodes = build(
            MetaInput::for_host("https://example.com/"),
            vec![Node::new(NodeKind::Offer, json!({"price": 30}))],
        );
        let offer = &nodes[0];
        assert_eq!(offer["price"], json!(30));
        assert_eq!(offer["availability"], json!(IN_STOCK));
        assert!(offer.get("priceCurrency").is_none());
        assert_eq!(offer["priceValidUntil"], json!(end_of_next_year()));
    }

    #[test]
    fn test_offer_uses_configured_currency() {
        let nodes = build(
            MetaInput {
                currency: Some("AUD".to_string()),
                ..MetaInput::for_host("https://example.com/")
            },
            vec![Node::new(NodeKind::Offer, json!({"price": 30}))],
        );
        assert_eq!(nodes[0]["priceCurrency"], json!("AUD"));
    }

    #[test]
    fn test_product() {
        let nodes = build(
            MetaInput {
                path: Some("/shop/widget".to_string()),
                currency: Some("USD".to_string()),
                ..MetaInput::for_host("https://example.com/")
            },
            vec![
                Node::new(NodeKind::WebPage, json!({})),
                Node::new(NodeKind::Organization, json!({"name": "Acme"})),
                Node::new(
                    NodeKind::Product,
                    json!({
                        "name": "Widget",
                        "offers": [20, {"price": 25, "availability": "https://schema.org/OutOfStock"}],
                        "aggregateOffer": {"lowPrice": 20, "highPrice": 25, "offers": [20, 25]},
                        "aggregateRating": {"ratingValue": 4.5, "ratingCount": 10},
                        "review": {"author": "Jane", "reviewRating": 5, "reviewBody": "Great"}
                    }),
                ),
            ],
        );

        let product = find(&nodes, "#product");
        assert_eq!(product["@id"], json!("https://example.com/shop/widget/#product"));
        assert_eq!(product["sku"], json!(content_hash(&json!("Widget"))));
        assert_eq!(product["brand"], json!({"@id": "https://example.com/#identity"}));
        assert_eq!(
            product["mainEntityOfPage"],
            json!({"@id": "https://example.com/shop/widget/#webpage"})
        );

        let offers = product["offers"].as_array().unwrap();
        assert_eq!(offers[0]["price"], json!(20));
        assert_eq!(offers[0]["priceCurrency"], json!("USD"));
        assert_eq!(offers[0]["url"], json!("https://example.com/shop/widget"));
        assert_eq!(offers[1]["availability"], json!("https://schema.org/OutOfStock"));

        assert_eq!(product["aggregateOffer"]["offerCount"], json!(2));
        assert_eq!(product["aggregateRating"]["@type"], json!("AggregateRating"));
        assert_eq!(
            product["review"],
            json!({
                "@type": "Review",
                "author": {"@type": "Person", "name": "Jane"},
                "reviewBody": "Great",
                "reviewRating": {
                    "@type": "Rating",
                    "bestRating": 5,
                    "ratingValue": 5,
                    "worstRating": 1
                }
            })
        );
    }
}
