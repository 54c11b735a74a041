//! schema.org Graph Library
//!
//! This library builds deduplicated, cross-linked schema.org JSON-LD graphs
//! for a single web page from loosely shaped node descriptions and page
//! metadata.
//!
//! # Overview
//!
//! Callers register nodes (WebPage, Organization, Article, Product, ...) and
//! supply the page's canonical host and url. A build then:
//!
//! 1. Resolves every node on its own: shorthand casting, defaults, metadata
//!    inheritance, per-type transforms and identifier assignment
//! 2. Promotes nested objects that deserve their own entry (authors, logos,
//!    images) to root nodes, replacing them with `{"@id": ...}` references
//! 3. Runs the per-type link hooks once every identifier is final, so the
//!    WebPage, WebSite and site identity point at each other
//! 4. Collapses nodes sharing an identifier, last registration wins
//! 5. Wraps the result in `{"@context": "https://schema.org", "@graph": [...]}`
//!
//! # Well-known identifiers
//!
//! The page's singular nodes live at fixed fragments such as `#webpage`,
//! `#website`, `#identity`, `#logo` and `#primaryimage`; see
//! [`vocab::WellKnown`].
//!
//! # Usage
//!
//! ```ignore
//! use schema_org_graph::{render_graph_to_schema_org_json, Meta, MetaInput, Node, NodeKind};
//! use serde_json::json;
//!
//! let meta = Meta::resolve(MetaInput::for_host("https://example.com/"))?;
//! let document = render_graph_to_schema_org_json(
//!     vec![
//!         Node::new(NodeKind::WebPage, json!({})),
//!         Node::new(NodeKind::Organization, json!({"name": "Acme", "logo": "/logo.png"})),
//!     ],
//!     meta,
//! )?;
//!
//! println!("{}", serde_json::to_string_pretty(&document)?);
//! ```

pub mod descriptor;
pub mod error;
pub mod graph;
pub mod id;
pub mod merge;
pub mod meta;
pub mod nodes;
pub mod pipeline;
pub mod resolve;
pub mod transform;
pub mod vocab;

// Re-export main types for convenience
pub use crate::error::GraphError;
pub use crate::graph::{Graph, Node, Phase, RegisteredNode};
pub use crate::merge::dedupe_and_flatten_nodes;
pub use crate::meta::{Meta, MetaInput};
pub use crate::nodes::NodeKind;
pub use crate::pipeline::{
    build_resolved_graph, render_graph_to_schema_org_json, render_nodes_to_schema_org_html,
    render_nodes_to_schema_org_json, RenderOptions,
};
pub use crate::vocab::{WellKnown, SCHEMA_ORG_CONTEXT};
