//! Event
//!
//! Start and end dates are kept as given so the event's own offset
//! survives. An untyped location with an address, or without a url, is a
//! Place; anything else (including a bare url string) is a VirtualLocation.

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy, Inherit, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::id::has_protocol;
use crate::meta::{Meta, MetaField};
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{resolve_id, set_if_empty};
use crate::vocab::WellKnown;

use super::{type_defaults, NodeKind};

const SCHEMA_ORG_ENUM_PREFIX: &str = "https://schema.org/";

/// `@type`s that are resolved as an Event
pub const SUBTYPES: &[&str] = &[
    "BusinessEvent",
    "ChildrensEvent",
    "ComedyEvent",
    "DanceEvent",
    "DeliveryEvent",
    "EducationEvent",
    "EventSeries",
    "ExhibitionEvent",
    "Festival",
    "FoodEvent",
    "Hackathon",
    "LiteraryEvent",
    "MusicEvent",
    "PublicationEvent",
    "SaleEvent",
    "ScreeningEvent",
    "SocialEvent",
    "SportsEvent",
    "TheaterEvent",
    "VisualArtsEvent",
];

pub static EVENT: Descriptor = Descriptor {
    defaults: Some(event_defaults),
    inherit_meta: &[Inherit::same(MetaField::InLanguage)],
    resolve: Some(resolve_event),
    id: IdPolicy::host().with_slot(WellKnown::Event, SlotClaim::Shared),
    ..Descriptor::new("Event")
};

fn event_defaults(_: &Meta) -> Value {
    type_defaults("Event")
}

fn resolve_event(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let host = graph.meta().host.clone();
    resolve_id(&mut node, &host);

    if let Some(start) = node.get("startDate").cloned() {
        set_if_empty(&mut node, "endDate", start);
    }
    for key in ["eventStatus", "eventAttendanceMode"] {
        if let Some(Value::String(value)) = node.get(key) {
            if !has_protocol(value) {
                let expanded = format!("{}{}", SCHEMA_ORG_ENUM_PREFIX, value);
                node.insert(key.to_string(), Value::String(expanded));
            }
        }
    }

    if let Some(location) = node.remove("location") {
        let tagged = match location {
            Value::Array(items) => Value::Array(items.into_iter().map(tag_location).collect()),
            other => tag_location(other),
        };
        node.insert("location".to_string(), tagged);
    }
    resolve_property(
        &mut node,
        "location",
        graph,
        NodeKind::VirtualLocation,
        RelationOptions::default(),
    )?;

    resolve_property(&mut node, "performer", graph, NodeKind::Person, RelationOptions::root())?;
    resolve_property(
        &mut node,
        "organizer",
        graph,
        NodeKind::Organization,
        RelationOptions::root(),
    )?;
    resolve_property(&mut node, "offers", graph, NodeKind::Offer, RelationOptions::default())?;
    Ok(node)
}

fn tag_location(location: Value) -> Value {
    match location {
        Value::Object(mut obj) if !obj.contains_key("@type") => {
            let kind = if obj.contains_key("address") || !obj.contains_key("url") {
                NodeKind::Place
            } else {
                NodeKind::VirtualLocation
            };
            obj.insert("@type".to_string(), Value::String(kind.type_name().to_string()));
            Value::Object(obj)
        }
        other => other,
    }
}
