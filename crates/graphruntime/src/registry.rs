use async_trait::async_trait;
use graphcore::{Component, ComponentFactory, Node, NodeError};
use std::collections::HashMap;
use std::sync::Arc;

/// Factory trait for building component instances for nodes
pub trait ComponentBuilder: Send + Sync {
    /// Build a component for the given node, reading its attribute bag for
    /// configuration.
    fn build(&self, node: &Node) -> Result<Box<dyn Component>, NodeError>;

    /// Component type identifier this builder provides
    fn component_type(&self) -> &str;

    /// Optional: metadata about the component type
    fn metadata(&self) -> ComponentMetadata {
        ComponentMetadata::default()
    }
}

/// Metadata about a component type
#[derive(Debug, Clone)]
pub struct ComponentMetadata {
    pub description: String,
    pub category: String,
}

impl Default for ComponentMetadata {
    fn default() -> Self {
        Self {
            description: String::new(),
            category: "general".to_string(),
        }
    }
}

/// Registry of available component types
pub struct ComponentRegistry {
    builders: HashMap<String, Arc<dyn ComponentBuilder>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Register a component builder
    pub fn register(&mut self, builder: Arc<dyn ComponentBuilder>) {
        let component_type = builder.component_type().to_string();
        tracing::info!("Registering component type: {}", component_type);
        self.builders.insert(component_type, builder);
    }

    /// Build a component of the given type for a node
    pub fn create(
        &self,
        component_type: &str,
        node: &Node,
    ) -> Result<Box<dyn Component>, NodeError> {
        let builder = self
            .builders
            .get(component_type)
            .ok_or_else(|| NodeError::UnknownComponentType(component_type.to_string()))?;
        builder.build(node)
    }

    /// Get all registered component types
    pub fn list_component_types(&self) -> Vec<String> {
        self.builders.keys().cloned().collect()
    }

    /// Get metadata for a component type
    pub fn get_metadata(&self, component_type: &str) -> Option<ComponentMetadata> {
        self.builders.get(component_type).map(|b| b.metadata())
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ComponentFactory for ComponentRegistry {
    /// A node declares its component through the `component` attribute; a
    /// node without one gets no runnable component.
    async fn create_component(
        &self,
        node: &Node,
    ) -> Result<Option<Box<dyn Component>>, NodeError> {
        let Some(component_type) = node.attributes().get("component").and_then(|v| v.as_str())
        else {
            return Ok(None);
        };
        self.create(component_type, node).map(Some)
    }
}
