use crate::{Attributes, Component, ComponentFactory, GraphError, NodeError, Port};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// An addressable unit owned by a graph: an attribute bag plus a set of
/// named ports.
///
/// Nodes are created and renamed through their owning [`Graph`](crate::Graph);
/// the id field is owner-mediated. The attribute bag is opaque and echoed
/// verbatim by [`Node::to_object`], except for the structural keys `id` and
/// `ports` consumed at build time.
pub struct Node {
    id: String,
    attributes: Attributes,
    ports: HashMap<String, Port>,
    component: Option<Box<dyn Component>>,
}

impl Node {
    /// Build a node from a declarative attribute bag. Declared ports
    /// (`"ports": { id: attrs }`) are constructed immediately.
    pub fn new(id: impl Into<String>, mut attributes: Attributes) -> Result<Self, GraphError> {
        attributes.remove("id");

        let mut ports = HashMap::new();
        if let Some(declared) = attributes.remove("ports") {
            for (port_id, port_attrs) in expect_object(declared, "ports")? {
                let port_attrs = expect_object(port_attrs, &format!("port '{}'", port_id))?;
                ports.insert(port_id.clone(), Port::from_attributes(port_id, port_attrs)?);
            }
        }

        Ok(Self {
            id: id.into(),
            attributes,
            ports,
            component: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn add_port(&mut self, id: &str, attributes: Attributes) -> Result<&Port, GraphError> {
        self.insert_port(Port::from_attributes(id, attributes)?)
    }

    pub(crate) fn insert_port(&mut self, port: Port) -> Result<&Port, GraphError> {
        let id = port.id().to_string();
        if self.ports.contains_key(&id) {
            return Err(GraphError::DuplicatePort(id));
        }
        Ok(self.ports.entry(id).or_insert(port))
    }

    pub fn find_port(&self, id: &str) -> Option<&Port> {
        self.ports.get(id)
    }

    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }

    /// Component materialized by the last `init_component` pass, if any.
    pub fn component(&self) -> Option<&dyn Component> {
        self.component.as_deref()
    }

    /// Serialize to a plain object: the attribute bag verbatim, plus a
    /// `ports` mapping when any ports exist.
    pub fn to_object(&self) -> Value {
        let mut object = self.attributes.clone();
        if !self.ports.is_empty() {
            let ports: Attributes = self
                .ports
                .iter()
                .map(|(id, port)| (id.clone(), port.to_object()))
                .collect();
            object.insert("ports".to_string(), Value::Object(ports));
        }
        Value::Object(object)
    }

    /// Ask the factory for this node's runnable component and store it.
    pub async fn init_component(
        &mut self,
        factory: &dyn ComponentFactory,
    ) -> Result<(), NodeError> {
        let component = factory.create_component(self).await?;
        if let Some(component) = &component {
            tracing::debug!(
                node = %self.id,
                component_type = component.component_type(),
                "component materialized"
            );
        }
        self.component = component;
        Ok(())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("ports", &self.ports)
            .field("component", &self.component.as_ref().map(|c| c.component_type()))
            .finish()
    }
}

/// Unwrap a JSON value expected to be an object in a declarative definition.
pub(crate) fn expect_object(value: Value, context: &str) -> Result<Attributes, GraphError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(GraphError::InvalidDefinition(format!(
            "{} must be an object, got {}",
            context, other
        ))),
    }
}
