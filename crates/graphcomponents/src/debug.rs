use graphcore::{Component, Node, NodeError};
use graphruntime::{ComponentBuilder, ComponentMetadata};

/// Simple debug component that logs its node's attributes when built
pub struct DebugComponent;

impl Component for DebugComponent {
    fn component_type(&self) -> &str {
        "debug.log"
    }
}

pub struct DebugComponentBuilder;

impl ComponentBuilder for DebugComponentBuilder {
    fn build(&self, node: &Node) -> Result<Box<dyn Component>, NodeError> {
        tracing::info!("DEBUG [{}]:", node.id());
        for (key, value) in node.attributes() {
            tracing::info!("  {}: {}", key, value);
        }
        Ok(Box::new(DebugComponent))
    }

    fn component_type(&self) -> &str {
        "debug.log"
    }

    fn metadata(&self) -> ComponentMetadata {
        ComponentMetadata {
            description: "Logs node attributes for debugging".to_string(),
            category: "debug".to_string(),
        }
    }
}
