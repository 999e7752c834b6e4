use graphcore::{Graph, GraphError};
use std::path::Path;

/// Load a declarative graph definition from a JSON file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph, GraphError> {
    let path = path.as_ref();
    tracing::info!("Loading graph definition from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_graph(&text)
}

/// Parse a declarative graph definition from a JSON string. The root of the
/// definition must be an object.
pub fn parse_graph(json: &str) -> Result<Graph, GraphError> {
    match serde_json::from_str(json)? {
        serde_json::Value::Object(attributes) => Graph::new(attributes),
        _ => Err(GraphError::InvalidDefinition(
            "graph definition must be a JSON object".to_string(),
        )),
    }
}
