use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("Duplicate link id: {0}")]
    DuplicateLink(String),

    #[error("Duplicate port id: {0}")]
    DuplicatePort(String),

    #[error("Invalid graph definition: {0}")]
    InvalidDefinition(String),

    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone)]
pub enum NodeError {
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Component initialization failed: {0}")]
    InitializationFailed(String),
}
