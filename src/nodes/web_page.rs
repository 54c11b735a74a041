//! WebPage and its default ReadAction

use serde_json::{json, Value};

use crate::descriptor::{Descriptor, IdPolicy, Inherit, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::{Meta, MetaField};
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{augment_type, resolve_date_property, resolve_id, set_if_empty};
use crate::vocab::WellKnown;

use super::{link_to_slot, NodeKind};

/// `@type`s that are resolved as a WebPage
pub const SUBTYPES: &[&str] = &[
    "AboutPage",
    "CheckoutPage",
    "CollectionPage",
    "ContactPage",
    "FAQPage",
    "ItemPage",
    "MedicalWebPage",
    "ProfilePage",
    "QAPage",
    "RealEstateListing",
    "SearchResultsPage",
];

pub static WEB_PAGE: Descriptor = Descriptor {
    defaults: Some(web_page_defaults),
    inherit_meta: &[
        Inherit::to(MetaField::Title, "name"),
        Inherit::same(MetaField::Description),
        Inherit::same(MetaField::DatePublished),
        Inherit::same(MetaField::DateModified),
    ],
    resolve: Some(resolve_web_page),
    root_node_resolve: Some(link_web_page),
    id: IdPolicy::url().with_slot(WellKnown::WebPage, SlotClaim::Shared),
    ..Descriptor::new("WebPage")
};

pub static READ_ACTION: Descriptor = Descriptor {
    defaults: Some(read_action_defaults),
    ..Descriptor::new("ReadAction")
};

/// Guess the page type from the last segment of its url
pub fn page_type_for_url(url: &str) -> &'static str {
    let segment = url.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    match segment {
        "about" | "about-us" => "AboutPage",
        "search" => "SearchResultsPage",
        "checkout" => "CheckoutPage",
        "contact" | "contact-us" | "get-in-touch" => "ContactPage",
        "faq" => "FAQPage",
        _ => "WebPage",
    }
}

/// The ReadAction every plain article-like page carries
pub(crate) fn read_action(url: &str) -> Value {
    json!([{ "@type": "ReadAction", "target": [url] }])
}

fn web_page_defaults(meta: &Meta) -> Value {
    json!({
        "@type": page_type_for_url(&meta.url),
        "url": meta.url,
    })
}

fn read_action_defaults(meta: &Meta) -> Value {
    json!({
        "@type": "ReadAction",
        "target": [meta.url],
    })
}

fn resolve_web_page(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let url = graph.meta().url.clone();
    resolve_id(&mut node, &url);
    resolve_date_property(&mut node, "dateModified");
    resolve_date_property(&mut node, "datePublished");
    augment_type(&mut node, &["WebPage"]);

    resolve_property(
        &mut node,
        "potentialAction",
        graph,
        NodeKind::ReadAction,
        RelationOptions::default(),
    )?;

    // subtypes describe their own actions
    if node.get("@type") == Some(&json!("WebPage")) {
        set_if_empty(&mut node, "potentialAction", read_action(&url));
    }
    Ok(node)
}

fn link_web_page(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    if graph.meta().is_home_page() {
        link_to_slot(graph, index, "about", WellKnown::Identity);
    }
    link_to_slot(graph, index, "primaryImageOfPage", WellKnown::PrimaryImage);
    link_to_slot(graph, index, "primaryImageOfPage", WellKnown::Logo);
    link_to_slot(graph, index, "isPartOf", WellKnown::WebSite);
    link_to_slot(graph, index, "breadcrumb", WellKnown::Breadcrumb);
    Ok(())
}
