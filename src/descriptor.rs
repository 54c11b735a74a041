//! Declarative per-type node descriptors
//!
//! A [`Descriptor`] is pure configuration: how to cast shorthand input, which
//! defaults and metadata a node inherits, the local resolve transform, the
//! cross-node link hook, and how its `@id` is derived. The pipeline is generic
//! over descriptors and never special-cases a type.

use serde_json::Value;

use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::{Meta, MetaField};
use crate::vocab::WellKnown;

/// Coerce shorthand input (e.g. a plain string) into an object
pub type CastFn = fn(Value) -> Value;
/// Default values, merged under explicit ones
pub type DefaultsFn = fn(&Meta) -> Value;
/// Local resolve transform; may resolve and promote relations
pub type ResolveFn = fn(Properties, &mut Graph) -> Result<Properties, GraphError>;
/// Cross-node hook run once every node has its final `@id`
pub type LinkFn = fn(usize, &mut Graph) -> Result<(), GraphError>;

/// Which metadata url a generated `@id` is scoped under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdBase {
    /// Site-wide nodes (identity, website, images)
    Host,
    /// Page-specific nodes (webpage, article)
    Url,
}

/// How a descriptor uses its well-known slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClaim {
    /// Every instance takes the slot; repeated registrations collapse into it
    Shared,
    /// Only the first instance takes the slot, later ones get a hashed id
    FirstClaim,
}

/// Identifier derivation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPolicy {
    pub base: IdBase,
    pub slot: Option<(WellKnown, SlotClaim)>,
}

impl IdPolicy {
    pub const fn url() -> Self {
        Self {
            base: IdBase::Url,
            slot: None,
        }
    }

    pub const fn host() -> Self {
        Self {
            base: IdBase::Host,
            slot: None,
        }
    }

    pub const fn with_slot(self, slot: WellKnown, claim: SlotClaim) -> Self {
        Self {
            base: self.base,
            slot: Some((slot, claim)),
        }
    }
}

/// Copy a metadata field into a node property when the property is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inherit {
    pub field: MetaField,
    pub key: &'static str,
}

impl Inherit {
    /// Inherit under the field's own property name
    pub const fn same(field: MetaField) -> Self {
        Self {
            field,
            key: field.property(),
        }
    }

    /// Inherit `field` into the property `key`
    pub const fn to(field: MetaField, key: &'static str) -> Self {
        Self { field, key }
    }
}

/// Declarative configuration for one schema.org node type
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    /// Primary `@type`
    pub type_name: &'static str,
    /// Segment used in generated ids; defaults to the lowercased type
    pub alias: Option<&'static str>,
    pub cast: Option<CastFn>,
    pub defaults: Option<DefaultsFn>,
    pub inherit_meta: &'static [Inherit],
    pub resolve: Option<ResolveFn>,
    pub root_node_resolve: Option<LinkFn>,
    pub id: IdPolicy,
}

impl Descriptor {
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            alias: None,
            cast: None,
            defaults: None,
            inherit_meta: &[],
            resolve: None,
            root_node_resolve: None,
            id: IdPolicy::url(),
        }
    }

    /// Alias segment for generated ids
    pub fn alias(&self) -> String {
        match self.alias {
            Some(alias) => alias.to_string(),
            None => self.type_name.to_lowercase(),
        }
    }
}
