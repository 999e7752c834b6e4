use graphcore::{Component, Node, NodeError};
use graphruntime::{ComponentBuilder, ComponentMetadata};

/// Component that forwards data between its node's ports unchanged
pub struct PassthroughComponent;

impl Component for PassthroughComponent {
    fn component_type(&self) -> &str {
        "core.passthrough"
    }
}

pub struct PassthroughComponentBuilder;

impl ComponentBuilder for PassthroughComponentBuilder {
    fn build(&self, _node: &Node) -> Result<Box<dyn Component>, NodeError> {
        Ok(Box::new(PassthroughComponent))
    }

    fn component_type(&self) -> &str {
        "core.passthrough"
    }

    fn metadata(&self) -> ComponentMetadata {
        ComponentMetadata {
            description: "Forwards data unchanged".to_string(),
            category: "core".to_string(),
        }
    }
}
