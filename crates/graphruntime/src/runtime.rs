use crate::{loader, ComponentRegistry};
use graphcore::{Graph, GraphError, NodeError};
use std::path::Path;
use std::sync::Arc;

/// Runtime façade: owns the component registry and drives a graph's
/// initialization pass once, top-down.
pub struct GraphRuntime {
    registry: Arc<ComponentRegistry>,
}

impl GraphRuntime {
    pub fn new() -> Self {
        Self::with_registry(Arc::new(ComponentRegistry::new()))
    }

    pub fn with_registry(registry: Arc<ComponentRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Materialize components for every node in the graph tree.
    pub async fn materialize(&self, graph: &mut Graph) -> Result<(), NodeError> {
        tracing::info!("Materializing components for graph: {}", graph.id());
        graph.init_component(self.registry.as_ref()).await
    }

    /// Load a definition file and materialize it in one step.
    pub async fn load_and_materialize(&self, path: impl AsRef<Path>) -> Result<Graph, GraphError> {
        let mut graph = loader::load_graph(path)?;
        self.materialize(&mut graph).await?;
        Ok(graph)
    }
}

impl Default for GraphRuntime {
    fn default() -> Self {
        Self::new()
    }
}
