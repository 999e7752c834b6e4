use crate::{Attributes, GraphError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Reference to a port on a named node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub node: String,
    pub port: String,
}

/// A named endpoint on a node.
///
/// A public port is exposed at a graph's own boundary and may forward to an
/// internal endpoint of the graph; the binding is optional because it can be
/// supplied later by whoever wires the boundary.
#[derive(Debug, Clone)]
pub struct Port {
    id: String,
    public: bool,
    endpoint: Option<Endpoint>,
    attributes: Attributes,
}

impl Port {
    /// Create a port exposed at a graph boundary, optionally bound to an
    /// internal endpoint.
    pub fn public(
        id: impl Into<String>,
        endpoint: Option<Endpoint>,
        attributes: Attributes,
    ) -> Self {
        Self {
            id: id.into(),
            public: true,
            endpoint,
            attributes,
        }
    }

    /// Build a port from a declarative attribute bag. The structural keys
    /// `public` and `endpoint` are consumed; the rest is kept verbatim.
    pub(crate) fn from_attributes(
        id: impl Into<String>,
        mut attributes: Attributes,
    ) -> Result<Self, GraphError> {
        let id = id.into();
        let endpoint = match attributes.remove("endpoint") {
            Some(value) => Some(serde_json::from_value(value).map_err(|e| {
                GraphError::InvalidDefinition(format!("port '{}' endpoint: {}", id, e))
            })?),
            None => None,
        };
        let public = attributes
            .remove("public")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
            || endpoint.is_some();
        Ok(Self {
            id,
            public,
            endpoint,
            attributes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn to_object(&self) -> Value {
        let mut object = self.attributes.clone();
        if self.public {
            object.insert("public".to_string(), Value::Bool(true));
        }
        if let Some(endpoint) = &self.endpoint {
            object.insert(
                "endpoint".to_string(),
                json!({ "node": endpoint.node, "port": endpoint.port }),
            );
        }
        Value::Object(object)
    }
}
