//! PostalAddress, Place and VirtualLocation

use serde_json::Value;

use crate::descriptor::Descriptor;
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::Meta;
use crate::resolve::{resolve_property, RelationOptions};

use super::{cast_primitive, type_defaults, NodeKind};

pub static POSTAL_ADDRESS: Descriptor = Descriptor {
    alias: Some("address"),
    defaults: Some(postal_address_defaults),
    ..Descriptor::new("PostalAddress")
};

pub static PLACE: Descriptor = Descriptor {
    defaults: Some(place_defaults),
    resolve: Some(resolve_place),
    ..Descriptor::new("Place")
};

pub static VIRTUAL_LOCATION: Descriptor = Descriptor {
    cast: Some(cast_virtual_location),
    defaults: Some(virtual_location_defaults),
    ..Descriptor::new("VirtualLocation")
};

fn postal_address_defaults(_: &Meta) -> Value {
    type_defaults("PostalAddress")
}

fn place_defaults(_: &Meta) -> Value {
    type_defaults("Place")
}

fn virtual_location_defaults(_: &Meta) -> Value {
    type_defaults("VirtualLocation")
}

fn cast_virtual_location(value: Value) -> Value {
    cast_primitive(value, "url")
}

fn resolve_place(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    resolve_property(
        &mut node,
        "address",
        graph,
        NodeKind::PostalAddress,
        RelationOptions::default(),
    )?;
    Ok(node)
}
