use graphcore::{Component, Node, NodeError};
use graphruntime::{ComponentBuilder, ComponentMetadata};
use std::time::Duration;

/// Component that delays data passing through its node
pub struct DelayComponent {
    delay: Duration,
}

impl DelayComponent {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Component for DelayComponent {
    fn component_type(&self) -> &str {
        "time.delay"
    }
}

pub struct DelayComponentBuilder;

impl ComponentBuilder for DelayComponentBuilder {
    fn build(&self, node: &Node) -> Result<Box<dyn Component>, NodeError> {
        let delay_ms = match node.attributes().get("delay_ms") {
            None => 1000.0, // default to 1 second if not specified
            Some(value) => value.as_f64().ok_or_else(|| {
                NodeError::Configuration(format!(
                    "delay_ms must be a number, got {}",
                    value
                ))
            })?,
        };
        if delay_ms < 0.0 {
            return Err(NodeError::Configuration(
                "delay_ms must not be negative".to_string(),
            ));
        }

        Ok(Box::new(DelayComponent {
            delay: Duration::from_millis(delay_ms as u64),
        }))
    }

    fn component_type(&self) -> &str {
        "time.delay"
    }

    fn metadata(&self) -> ComponentMetadata {
        ComponentMetadata {
            description: "Delays data for the configured milliseconds".to_string(),
            category: "time".to_string(),
        }
    }
}
