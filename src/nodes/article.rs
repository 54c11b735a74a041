//! Article

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy, Inherit, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::id::resolve_with_base_url;
use crate::meta::{Meta, MetaField};
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{augment_type, resolve_date_property, resolve_id, trim_length};
use crate::vocab::WellKnown;

use super::web_page::read_action;
use super::{
    first_image_url, link_to_slot, node_property, set_on_node, set_on_slot, type_defaults,
    NodeKind,
};

/// Longest headline search engines display
const HEADLINE_LENGTH: usize = 110;

/// `@type`s that are resolved as an Article
pub const SUBTYPES: &[&str] = &[
    "AdvertiserContentArticle",
    "BlogPosting",
    "NewsArticle",
    "Report",
    "SatiricalArticle",
    "ScholarlyArticle",
    "SocialMediaPosting",
    "TechArticle",
];

pub static ARTICLE: Descriptor = Descriptor {
    defaults: Some(article_defaults),
    inherit_meta: &[
        Inherit::same(MetaField::InLanguage),
        Inherit::same(MetaField::Description),
        Inherit::same(MetaField::Image),
        Inherit::same(MetaField::DateModified),
        Inherit::same(MetaField::DatePublished),
        Inherit::to(MetaField::Title, "headline"),
    ],
    resolve: Some(resolve_article),
    root_node_resolve: Some(link_article),
    id: IdPolicy::url().with_slot(WellKnown::Article, SlotClaim::Shared),
    ..Descriptor::new("Article")
};

fn article_defaults(_: &Meta) -> Value {
    type_defaults("Article")
}

fn resolve_article(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);
    resolve_property(&mut node, "author", graph, NodeKind::Person, RelationOptions::root())?;
    resolve_date_property(&mut node, "dateModified");
    resolve_date_property(&mut node, "datePublished");
    augment_type(&mut node, &["Article"]);

    if let Some(Value::String(headline)) = node.get("headline") {
        let trimmed = trim_length(headline, HEADLINE_LENGTH);
        node.insert("headline".to_string(), Value::String(trimmed));
    }
    Ok(node)
}

fn link_article(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    if let Some(image) = node_property(graph, index, "image") {
        if let Some(Value::String(thumbnail)) = first_image_url(graph, &image) {
            let thumbnail = resolve_with_base_url(&graph.meta().host, &thumbnail);
            set_on_node(graph, index, "thumbnailUrl", Value::String(thumbnail));
        }
    }

    link_to_slot(graph, index, "publisher", WellKnown::Identity);
    link_to_slot(graph, index, "author", WellKnown::Identity);

    if graph.find_slot(WellKnown::WebPage).is_some() {
        link_to_slot(graph, index, "isPartOf", WellKnown::WebPage);
        link_to_slot(graph, index, "mainEntityOfPage", WellKnown::WebPage);

        let url = graph.meta().url.clone();
        set_on_slot(graph, WellKnown::WebPage, "potentialAction", read_action(&url));
        for key in ["dateModified", "datePublished"] {
            if let Some(date) = node_property(graph, index, key) {
                set_on_slot(graph, WellKnown::WebPage, key, date);
            }
        }
    }
    Ok(())
}
