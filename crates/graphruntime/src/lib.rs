//! Component materialization runtime
//!
//! This crate drives a graph's asynchronous initialization pass: a registry
//! of component builders implements the core's `ComponentFactory` seam, a
//! loader reads declarative graph definitions from JSON, and a thin runtime
//! façade ties the two together.

mod loader;
mod registry;
mod runtime;

pub use loader::{load_graph, parse_graph};
pub use registry::{ComponentBuilder, ComponentMetadata, ComponentRegistry};
pub use runtime::GraphRuntime;
