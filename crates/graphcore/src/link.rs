use crate::{Attributes, Endpoint};
use serde_json::Value;

/// A connection between two ports, owned by exactly one graph.
///
/// Link ids are unique within the owning graph only. Beyond the optional
/// `from`/`to` endpoints the attribute bag is opaque to this crate; transport
/// semantics belong to the runtime that wires the ports.
#[derive(Debug, Clone)]
pub struct Link {
    id: String,
    attributes: Attributes,
}

impl Link {
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Source endpoint, if the `from` attribute holds a well-formed one.
    pub fn source(&self) -> Option<Endpoint> {
        self.endpoint_attr("from")
    }

    /// Target endpoint, if the `to` attribute holds a well-formed one.
    pub fn target(&self) -> Option<Endpoint> {
        self.endpoint_attr("to")
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn to_object(&self) -> Value {
        Value::Object(self.attributes.clone())
    }

    fn endpoint_attr(&self, key: &str) -> Option<Endpoint> {
        self.attributes
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}
