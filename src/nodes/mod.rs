//! Static registry of node descriptors
//!
//! Every supported schema.org type is a [`NodeKind`]; the pipeline looks up
//! the kind's [`Descriptor`] here and never special-cases a type. Each
//! submodule holds the descriptors of one node family.

use std::fmt;

use serde_json::{Map, Value};

use crate::descriptor::Descriptor;
use crate::graph::{Graph, Properties};
use crate::id::{extract_id, id_reference, resolve_as_graph_key};
use crate::transform::{extract_types, set_if_empty};
use crate::vocab::WellKnown;

pub mod article;
pub mod breadcrumb;
pub mod comment;
pub mod course;
pub mod event;
pub mod how_to;
pub mod image;
pub mod movie;
pub mod organization;
pub mod person;
pub mod place;
pub mod product;
pub mod question;
pub mod recipe;
pub mod software_app;
pub mod video;
pub mod web_page;
pub mod web_site;

/// A supported schema.org node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    WebPage,
    ReadAction,
    WebSite,
    SearchAction,
    Organization,
    LocalBusiness,
    OpeningHoursSpecification,
    Person,
    ImageObject,
    Article,
    BreadcrumbList,
    ListItem,
    Offer,
    AggregateOffer,
    AggregateRating,
    Rating,
    Review,
    Product,
    PostalAddress,
    Place,
    VirtualLocation,
    Comment,
    Question,
    Answer,
    VideoObject,
    HowTo,
    HowToStep,
    HowToDirection,
    Recipe,
    Event,
    Course,
    Movie,
    SoftwareApplication,
}

impl NodeKind {
    pub const ALL: [NodeKind; 33] = [
        NodeKind::WebPage,
        NodeKind::ReadAction,
        NodeKind::WebSite,
        NodeKind::SearchAction,
        NodeKind::Organization,
        NodeKind::LocalBusiness,
        NodeKind::OpeningHoursSpecification,
        NodeKind::Person,
        NodeKind::ImageObject,
        NodeKind::Article,
        NodeKind::BreadcrumbList,
        NodeKind::ListItem,
        NodeKind::Offer,
        NodeKind::AggregateOffer,
        NodeKind::AggregateRating,
        NodeKind::Rating,
        NodeKind::Review,
        NodeKind::Product,
        NodeKind::PostalAddress,
        NodeKind::Place,
        NodeKind::VirtualLocation,
        NodeKind::Comment,
        NodeKind::Question,
        NodeKind::Answer,
        NodeKind::VideoObject,
        NodeKind::HowTo,
        NodeKind::HowToStep,
        NodeKind::HowToDirection,
        NodeKind::Recipe,
        NodeKind::Event,
        NodeKind::Course,
        NodeKind::Movie,
        NodeKind::SoftwareApplication,
    ];

    /// The descriptor driving resolution of this kind
    pub fn descriptor(self) -> &'static Descriptor {
        match self {
            NodeKind::WebPage => &web_page::WEB_PAGE,
            NodeKind::ReadAction => &web_page::READ_ACTION,
            NodeKind::WebSite => &web_site::WEB_SITE,
            NodeKind::SearchAction => &web_site::SEARCH_ACTION,
            NodeKind::Organization => &organization::ORGANIZATION,
            NodeKind::LocalBusiness => &organization::LOCAL_BUSINESS,
            NodeKind::OpeningHoursSpecification => &organization::OPENING_HOURS,
            NodeKind::Person => &person::PERSON,
            NodeKind::ImageObject => &image::IMAGE,
            NodeKind::Article => &article::ARTICLE,
            NodeKind::BreadcrumbList => &breadcrumb::BREADCRUMB,
            NodeKind::ListItem => &breadcrumb::LIST_ITEM,
            NodeKind::Offer => &product::OFFER,
            NodeKind::AggregateOffer => &product::AGGREGATE_OFFER,
            NodeKind::AggregateRating => &product::AGGREGATE_RATING,
            NodeKind::Rating => &product::RATING,
            NodeKind::Review => &product::REVIEW,
            NodeKind::Product => &product::PRODUCT,
            NodeKind::PostalAddress => &place::POSTAL_ADDRESS,
            NodeKind::Place => &place::PLACE,
            NodeKind::VirtualLocation => &place::VIRTUAL_LOCATION,
            NodeKind::Comment => &comment::COMMENT,
            NodeKind::Question => &question::QUESTION,
            NodeKind::Answer => &question::ANSWER,
            NodeKind::VideoObject => &video::VIDEO,
            NodeKind::HowTo => &how_to::HOW_TO,
            NodeKind::HowToStep => &how_to::HOW_TO_STEP,
            NodeKind::HowToDirection => &how_to::HOW_TO_DIRECTION,
            NodeKind::Recipe => &recipe::RECIPE,
            NodeKind::Event => &event::EVENT,
            NodeKind::Course => &course::COURSE,
            NodeKind::Movie => &movie::MOVIE,
            NodeKind::SoftwareApplication => &software_app::SOFTWARE_APP,
        }
    }

    /// Primary `@type` of this kind
    pub fn type_name(self) -> &'static str {
        self.descriptor().type_name
    }

    /// Map a `@type` value (including known subtypes) to its kind
    pub fn from_type_name(type_name: &str) -> Option<NodeKind> {
        if let Some(kind) = NodeKind::ALL.into_iter().find(|k| k.type_name() == type_name) {
            return Some(kind);
        }
        if web_page::SUBTYPES.contains(&type_name) {
            Some(NodeKind::WebPage)
        } else if article::SUBTYPES.contains(&type_name) {
            Some(NodeKind::Article)
        } else if organization::LOCAL_BUSINESS_SUBTYPES.contains(&type_name) {
            Some(NodeKind::LocalBusiness)
        } else if event::SUBTYPES.contains(&type_name) {
            Some(NodeKind::Event)
        } else if software_app::SUBTYPES.contains(&type_name) {
            Some(NodeKind::SoftwareApplication)
        } else {
            None
        }
    }

    /// Infer the kind of a node from its `@type`
    ///
    /// With several types the most specific (last) known one wins, so
    /// `["Organization", "LocalBusiness"]` is a LocalBusiness.
    pub fn from_node(node: &Value) -> Option<NodeKind> {
        extract_types(node)
            .iter()
            .rev()
            .find_map(|t| NodeKind::from_type_name(t))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Wrap a primitive into `{ key: value }`; objects pass through
pub(crate) fn cast_primitive(value: Value, key: &str) -> Value {
    match value {
        Value::String(_) | Value::Number(_) => {
            let mut node = Map::new();
            node.insert(key.to_string(), value);
            Value::Object(node)
        }
        other => other,
    }
}

/// `@id` of the node at `index`
pub(crate) fn node_id(graph: &Graph, index: usize) -> Option<String> {
    graph.node(index).and_then(|n| n.id()).map(str::to_owned)
}

/// Whether the node at `index` occupies `slot`
pub(crate) fn occupies_slot(graph: &Graph, index: usize, slot: WellKnown) -> bool {
    node_id(graph, index)
        .and_then(|id| WellKnown::from_graph_key(resolve_as_graph_key(&id)))
        == Some(slot)
}

/// Read a property of the node at `index`
pub(crate) fn node_property(graph: &Graph, index: usize, key: &str) -> Option<Value> {
    graph.node(index).and_then(|n| n.get(key)).cloned()
}

/// Set a property on the node at `index` if it is empty
pub(crate) fn set_on_node(graph: &mut Graph, index: usize, key: &str, value: Value) {
    if let Some(props) = graph.node_mut(index).and_then(|n| n.properties_mut()) {
        set_if_empty(props, key, value);
    }
}

/// Set a property on the slot occupant if it is empty
pub(crate) fn set_on_slot(graph: &mut Graph, slot: WellKnown, key: &str, value: Value) {
    if let Some(props) = graph.find_slot_mut(slot).and_then(|n| n.properties_mut()) {
        set_if_empty(props, key, value);
    }
}

/// Point `key` of the node at `index` at the slot occupant
pub(crate) fn link_to_slot(graph: &mut Graph, index: usize, key: &str, slot: WellKnown) {
    if let Some(id) = graph.slot_id(slot) {
        set_on_node(graph, index, key, id_reference(&id));
    }
}

/// Point `key` of the slot occupant at the node at `index`
pub(crate) fn link_from_slot(graph: &mut Graph, slot: WellKnown, key: &str, index: usize) {
    if let Some(id) = node_id(graph, index) {
        set_on_slot(graph, slot, key, id_reference(&id));
    }
}

/// `url` of the first image of a node, for `thumbnailUrl`
///
/// Referenced images are looked up in the graph; plain strings are used as is.
pub(crate) fn first_image_url(graph: &Graph, image: &Value) -> Option<Value> {
    let first = crate::transform::first_element(image)?;
    match first {
        Value::String(url) => Some(Value::String(url.clone())),
        Value::Object(_) => match extract_id(first) {
            Some(id) => graph.find_node(id).and_then(|n| n.get("url")).cloned(),
            None => first.get("url").cloned(),
        },
        _ => None,
    }
}

/// Shared shape of the simple `{"@type": ...}` defaults
pub(crate) fn type_defaults(type_name: &str) -> Value {
    let mut node = Properties::new();
    node.insert("@type".to_string(), Value::String(type_name.to_string()));
    Value::Object(node)
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Value;

    use crate::graph::Node;
    use crate::id::resolve_as_graph_key;
    use crate::merge::dedupe_and_flatten_nodes;
    use crate::meta::{Meta, MetaInput};
    use crate::pipeline::build_resolved_graph;

    /// Build and flatten a graph
    pub(crate) fn build(meta: MetaInput, nodes: Vec<Node>) -> Vec<Value> {
        let meta = Meta::resolve(meta).expect("valid meta");
        let graph = build_resolved_graph(nodes, meta).expect("graph builds");
        dedupe_and_flatten_nodes(graph.into_nodes())
    }

    /// Flattened node by graph key
    pub(crate) fn find<'a>(nodes: &'a [Value], key: &str) -> &'a Value {
        nodes
            .iter()
            .find(|n| n.get("@id").and_then(Value::as_str).map(resolve_as_graph_key) == Some(key))
            .unwrap_or_else(|| panic!("no node at {}", key))
    }
}
