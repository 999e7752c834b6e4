//! Core abstractions for the composite graph model
//!
//! This crate provides the structural backbone of a flow-based program
//! definition: a directed graph of nodes and links where a graph is itself
//! a node and may be nested inside another graph at arbitrary depth.
//! Execution of dataflow is out of scope; this crate only stores, mutates,
//! flattens, serializes and asynchronously initializes the structure.

mod component;
mod error;
mod graph;
mod link;
mod node;
mod port;

pub use component::{Component, ComponentFactory};
pub use error::{GraphError, NodeError};
pub use graph::{Graph, GraphNode, DEFAULT_GRAPH_ID};
pub use link::Link;
pub use node::Node;
pub use port::{Endpoint, Port};

/// Opaque attribute bag attached to nodes, links and ports.
///
/// Attributes are echoed verbatim by `to_object`, except for the structural
/// keys (`id`, `ports`, `nodes`, `links`, `public`, `endpoint`) consumed at
/// build time.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
