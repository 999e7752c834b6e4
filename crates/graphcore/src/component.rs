use crate::{Node, NodeError};
use async_trait::async_trait;
use std::fmt;

/// Runnable behavior attached to a node by a [`ComponentFactory`].
///
/// The graph model only stores components; driving data through them is the
/// runtime's job.
pub trait Component: Send + Sync {
    /// Unique type identifier (e.g., "debug.log", "time.delay")
    fn component_type(&self) -> &str;
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type", &self.component_type())
            .finish()
    }
}

/// Factory that materializes a [`Component`] for a node during the
/// initialization pass.
///
/// The graph core passes the factory through to every descendant node and
/// imposes no further contract on it. Returning `Ok(None)` means the node
/// needs no runnable component.
#[async_trait]
pub trait ComponentFactory: Send + Sync {
    async fn create_component(
        &self,
        node: &Node,
    ) -> Result<Option<Box<dyn Component>>, NodeError>;
}
