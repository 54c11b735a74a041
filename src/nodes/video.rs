//! VideoObject

use serde_json::Value;

use crate::descriptor::{Descriptor, IdPolicy, Inherit};
use crate::error::GraphError;
use crate::graph::{Graph, Properties};
use crate::meta::{Meta, MetaField};
use crate::transform::{resolve_date_property, resolve_id, resolve_url};

use super::{first_image_url, node_property, set_on_node, type_defaults};

pub static VIDEO: Descriptor = Descriptor {
    alias: Some("video"),
    defaults: Some(video_defaults),
    inherit_meta: &[
        Inherit::to(MetaField::Title, "name"),
        Inherit::same(MetaField::Description),
        Inherit::same(MetaField::Image),
        Inherit::same(MetaField::InLanguage),
        Inherit::to(MetaField::DatePublished, "uploadDate"),
    ],
    resolve: Some(resolve_video),
    root_node_resolve: Some(link_video),
    id: IdPolicy::host(),
    ..Descriptor::new("VideoObject")
};

fn video_defaults(_: &Meta) -> Value {
    type_defaults("VideoObject")
}

fn resolve_video(mut node: Properties, graph: &mut Graph) -> Result<Properties, GraphError> {
    let host = graph.meta().host.clone();
    resolve_date_property(&mut node, "uploadDate");
    resolve_url(&mut node, "url", &host);
    resolve_id(&mut node, &host);
    Ok(node)
}

fn link_video(index: usize, graph: &mut Graph) -> Result<(), GraphError> {
    if let Some(image) = node_property(graph, index, "image") {
        if let Some(thumbnail) = first_image_url(graph, &image) {
            set_on_node(graph, index, "thumbnailUrl", thumbnail);
        }
    }
    Ok(())
}
