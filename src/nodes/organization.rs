//! Organization, LocalBusiness and OpeningHoursSpecification
//!
//! Both organization kinds may be the site identity. The identity's first
//! logo claims the `#logo` slot; the image link hook may later move it to
//! `#primaryimage`.

use serde_json::{json, Value};

use crate::descriptor::{Descriptor, IdPolicy, SlotClaim};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::id::{prefix_id, resolve_as_graph_key};
use crate::meta::Meta;
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{augment_type, get_str, resolve_id, set_if_empty};
use crate::vocab::WellKnown;

use super::{link_from_slot, occupies_slot, NodeKind};

/// `@type`s that are resolved as a LocalBusiness
pub const LOCAL_BUSINESS_SUBTYPES: &[&str] = &[
    "AnimalShelter",
    "ArchiveOrganization",
    "AutomotiveBusiness",
    "ChildCare",
    "Dentist",
    "DryCleaningOrLaundry",
    "EmergencyService",
    "EmploymentAgency",
    "EntertainmentBusiness",
    "FinancialService",
    "FoodEstablishment",
    "GovernmentOffice",
    "HealthAndBeautyBusiness",
    "HomeAndConstructionBusiness",
    "InternetCafe",
    "LegalService",
    "Library",
    "LodgingBusiness",
    "MedicalBusiness",
    "ProfessionalService",
    "RadioStation",
    "RealEstateAgent",
    "RecyclingCenter",
    "SelfStorage",
    "ShoppingCenter",
    "SportsActivityLocation",
    "Store",
    "TelevisionStation",
    "TouristInformationCenter",
    "TravelAgency",
];

pub static ORGANIZATION: Descriptor = Descriptor {
    defaults: Some(organization_defaults),
    resolve: Some(resolve_organization),
    root_node_resolve: Some(link_identity),
    id: IdPolicy::host().with_slot(WellKnown::Identity, SlotClaim::FirstClaim),
    ..Descriptor::new("Organization")
};

pub static LOCAL_BUSINESS: Descriptor = Descriptor {
    defaults: Some(local_business_defaults),
    resolve: Some(resolve_local_business),
    root_node_resolve: Some(link_identity),
    id: IdPolicy::host().with_slot(WellKnown::Identity, SlotClaim::FirstClaim),
    ..Descriptor::new("LocalBusiness")
};

pub static OPENING_HOURS: Descriptor = Descriptor {
    defaults: Some(opening_hours_defaults),
    ..Descriptor::new("OpeningHoursSpecification")
};

fn organization_defaults(meta: &Meta) -> Value {
    json!({
        "@type": "Organization",
        "url": meta.host,
    })
}

fn local_business_defaults(meta: &Meta) -> Value {
    json!({
        "@type": ["Organization", "LocalBusiness"],
        "url": meta.host,
    })
}

fn opening_hours_defaults(_: &Meta) -> Value {
    json!({
        "@type": "OpeningHoursSpecification",
        "opens": "00:00",
        "closes": "23:59",
    })
}

fn resolve_organization(node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    resolve_organization_like(node, graph, &["Organization"])
}

fn resolve_local_business(
    mut node: Properties,
    graph: &mut Graph,
) -> Result<Properties, GraphError> {
    if let Some(currency) = graph.meta().currency.clone() {
        set_if_empty(&mut node, "currenciesAccepted", Value::String(currency));
    }
    resolve_property(
        &mut node,
        "openingHoursSpecification",
        graph,
        NodeKind::OpeningHoursSpecification,
        RelationOptions::default(),
    )?;
    resolve_organization_like(node, graph, &["Organization", "LocalBusiness"])
}

/// Shared resolve of Organization and LocalBusiness
///
/// Re-registering the identity under the same name keeps `#identity`; a
/// differently named organization falls back to a hashed id. A nested
/// organization never claims a free identity slot.
fn resolve_organization_like(
    mut node: Properties,
    graph: &mut Graph,
    types: &[&str],
) -> Result<Properties, GraphError> {
    let host = graph.meta().host.clone();
    resolve_id(&mut node, &host);

    if !node.contains_key("@id") {
        let claims_identity = match graph.find_slot(WellKnown::Identity) {
            None => !graph.is_nested(),
            Some(identity) => identity.get("name") == node.get("name"),
        };
        if claims_identity {
            let id = prefix_id(&host, WellKnown::Identity.fragment());
            node.insert("@id".to_string(), Value::String(id));
        }
    }

    augment_type(&mut node, types);
    resolve_property(
        &mut node,
        "address",
        graph,
        NodeKind::PostalAddress,
        RelationOptions::default(),
    )?;

    let is_identity = get_str(&node, "@id")
        .map(|id| resolve_as_graph_key(id) == WellKnown::Identity.fragment())
        .unwrap_or(false);
    let name = node.get("name").cloned();
    let mut claimed = false;
    let mut adjust_logo = |logo: &mut Properties, _: &Graph| {
        if let Some(name) = &name {
            set_if_empty(logo, "caption", name.clone());
        }
        if is_identity && !claimed {
            let id = prefix_id(&host, WellKnown::Logo.fragment());
            logo.insert("@id".to_string(), Value::String(id));
            claimed = true;
        }
    };
    resolve_property(
        &mut node,
        "logo",
        graph,
        NodeKind::ImageObject,
        RelationOptions::root().with_after_resolve(&mut adjust_logo),
    )?;
    Ok(node)
}

fn link_identity(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    if occupies_slot(graph, index, WellKnown::Identity) {
        link_from_slot(graph, WellKnown::WebPage, "about", index);
        link_from_slot(graph, WellKnown::WebSite, "publisher", index);
    }
    Ok(())
}
