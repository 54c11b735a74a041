//! Movie

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::Meta;
use crate::resolve::{resolve_property, RelationOptions};
use crate::transform::{resolve_date_property, resolve_id, resolve_url};

use super::{type_defaults, NodeKind};

pub static MOVIE: Descriptor = Descriptor {
    defaults: Some(movie_defaults),
    resolve: Some(resolve_movie),
    id: IdPolicy::url(),
    ..Descriptor::new("Movie")
};

fn movie_defaults(_: &Meta) -> Value {
    type_defaults("Movie")
}

fn resolve_movie(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let (host, url) = (graph.meta().host.clone(), graph.meta().url.clone());
    resolve_id(&mut node, &url);
    resolve_url(&mut node, "url", &host);
    resolve_date_property(&mut node, "dateCreated");

    resolve_property(&mut node, "director", graph, NodeKind::Person, RelationOptions::default())?;
    resolve_property(&mut node, "review", graph, NodeKind::Review, RelationOptions::default())?;
    resolve_property(
        &mut node,
        "aggregateRating",
        graph,
        NodeKind::AggregateRating,
        RelationOptions::default(),
    )?;
    Ok(node)
}
