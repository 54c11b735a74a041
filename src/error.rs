//! Error types for schema.org graph building

use thiserror::Error;

use crate::graph::Phase;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Missing canonical host: metadata must provide a host or a url")]
    MissingHost,

    #[error("Invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid {kind} node: {reason}")]
    InvalidNode { kind: String, reason: String },

    #[error("Invalid input '{path}': {reason}")]
    InvalidInput { path: String, reason: String },

    #[error("Pipeline phase out of order: expected {expected:?}, found {found:?}")]
    PhaseOrder { expected: Phase, found: Phase },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
