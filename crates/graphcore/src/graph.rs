use crate::node::expect_object;
use crate::{Attributes, ComponentFactory, GraphError, Link, Node, NodeError, Port};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use std::collections::HashMap;

/// Placeholder id assigned to a graph declared without one.
pub const DEFAULT_GRAPH_ID: &str = "<graph>";

/// An entry in a graph's node table.
///
/// The original container-as-member trick (a graph registering itself in its
/// own node table so links can address its boundary ports) is expressed as a
/// tagged union: `Boundary` stands for the owning graph itself under its own
/// id and is excluded from every recursive operation, which is what keeps
/// flattening and initialization from re-entering the same graph forever.
#[derive(Debug)]
pub enum GraphNode {
    /// The owning graph's boundary, keyed under the graph's own id.
    Boundary,
    Leaf(Node),
    Graph(Graph),
}

impl GraphNode {
    pub fn is_boundary(&self) -> bool {
        matches!(self, GraphNode::Boundary)
    }

    /// Id of the member, `None` for the boundary entry (its id is the key
    /// it is stored under).
    pub fn id(&self) -> Option<&str> {
        match self {
            GraphNode::Boundary => None,
            GraphNode::Leaf(node) => Some(node.id()),
            GraphNode::Graph(graph) => Some(graph.id()),
        }
    }

    pub fn as_leaf(&self) -> Option<&Node> {
        match self {
            GraphNode::Leaf(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&Graph> {
        match self {
            GraphNode::Graph(graph) => Some(graph),
            _ => None,
        }
    }

    /// Initialization future for a non-boundary member. Boxing breaks the
    /// type recursion between `Graph::init_component` and its children.
    fn init_future<'a>(
        &'a mut self,
        factory: &'a dyn ComponentFactory,
    ) -> Option<BoxFuture<'a, Result<(), NodeError>>> {
        match self {
            GraphNode::Boundary => None,
            GraphNode::Leaf(node) => Some(Box::pin(node.init_component(factory))),
            GraphNode::Graph(graph) => Some(Box::pin(graph.init_component(factory))),
        }
    }
}

/// A collection of nodes interconnected via links.
///
/// A graph is itself a node, whose ports act as published endpoints of the
/// graph; it may be nested inside another graph's node table at arbitrary
/// depth. Containment is by value, so a graph can never become its own
/// descendant; the only self-reference is the designated [`GraphNode::Boundary`]
/// entry.
#[derive(Debug)]
pub struct Graph {
    base: Node,
    nodes: HashMap<String, GraphNode>,
    links: HashMap<String, Link>,
}

impl Graph {
    /// Build a graph from a declarative attribute bag:
    /// `{ id?, nodes?: { id: attrs }, links?: { id: attrs }, ... }`.
    ///
    /// The boundary entry is registered before declared nodes and links, so
    /// links may reference the graph's own id. A declared node whose bag
    /// contains a `nodes` or `links` key is built as a nested graph.
    pub fn new(mut attributes: Attributes) -> Result<Self, GraphError> {
        let node_decls = match attributes.remove("nodes") {
            Some(value) => expect_object(value, "nodes")?,
            None => Attributes::new(),
        };
        let link_decls = match attributes.remove("links") {
            Some(value) => expect_object(value, "links")?,
            None => Attributes::new(),
        };
        let id = match attributes.remove("id") {
            Some(Value::String(id)) => id,
            Some(other) => {
                return Err(GraphError::InvalidDefinition(format!(
                    "graph id must be a string, got {}",
                    other
                )))
            }
            None => DEFAULT_GRAPH_ID.to_string(),
        };

        let base = Node::new(id, attributes)?;
        let mut graph = Self {
            base,
            nodes: HashMap::new(),
            links: HashMap::new(),
        };
        graph
            .nodes
            .insert(graph.base.id().to_string(), GraphNode::Boundary);

        for (id, decl) in node_decls {
            let decl = expect_object(decl, &format!("node '{}'", id))?;
            graph.add_node(&id, decl)?;
        }
        for (id, decl) in link_decls {
            let decl = expect_object(decl, &format!("link '{}'", id))?;
            graph.add_link(&id, decl)?;
        }

        tracing::debug!(
            graph = %graph.base.id(),
            nodes = graph.nodes.len() - 1,
            links = graph.links.len(),
            "graph built"
        );
        Ok(graph)
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    /// Rename this graph, keeping the boundary entry keyed under the new id.
    pub fn set_id(&mut self, id: &str) -> Result<(), GraphError> {
        if self.base.id() == id {
            return Ok(());
        }
        if self.nodes.contains_key(id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        let old = self.base.id().to_string();
        self.nodes.remove(&old);
        self.base.set_id(id);
        self.nodes.insert(id.to_string(), GraphNode::Boundary);
        Ok(())
    }

    pub fn attributes(&self) -> &Attributes {
        self.base.attributes()
    }

    // --- node table ------------------------------------------------------

    /// Immediate node table, boundary entry included.
    pub fn nodes(&self) -> &HashMap<String, GraphNode> {
        &self.nodes
    }

    pub fn find_node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Add a node built from a declarative attribute bag. A bag carrying a
    /// `nodes` or `links` key yields a nested graph, otherwise a leaf.
    pub fn add_node(
        &mut self,
        id: &str,
        attributes: Attributes,
    ) -> Result<&mut GraphNode, GraphError> {
        if self.nodes.contains_key(id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        let entry = if attributes.contains_key("nodes") || attributes.contains_key("links") {
            let mut attributes = attributes;
            attributes.insert("id".to_string(), Value::String(id.to_string()));
            GraphNode::Graph(Graph::new(attributes)?)
        } else {
            GraphNode::Leaf(Node::new(id, attributes)?)
        };
        tracing::debug!(graph = %self.base.id(), node = id, "node added");
        Ok(self.nodes.entry(id.to_string()).or_insert(entry))
    }

    /// Insert an already-built sub-graph under the given id.
    pub fn add_graph(
        &mut self,
        id: &str,
        mut subgraph: Graph,
    ) -> Result<&mut GraphNode, GraphError> {
        if self.nodes.contains_key(id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        subgraph.set_id(id)?;
        tracing::debug!(graph = %self.base.id(), node = id, "sub-graph added");
        Ok(self
            .nodes
            .entry(id.to_string())
            .or_insert(GraphNode::Graph(subgraph)))
    }

    /// Move a node to a new id. `Ok(false)` when `id` is absent; renaming
    /// onto an occupied id is an error. Renaming the boundary entry renames
    /// the graph itself.
    pub fn rename_node(&mut self, id: &str, new_id: &str) -> Result<bool, GraphError> {
        if id == new_id {
            return Ok(self.nodes.contains_key(id));
        }
        if self.nodes.contains_key(new_id) {
            return Err(GraphError::DuplicateNode(new_id.to_string()));
        }
        let Some(mut entry) = self.nodes.remove(id) else {
            return Ok(false);
        };
        match &mut entry {
            GraphNode::Boundary => self.base.set_id(new_id),
            GraphNode::Leaf(node) => node.set_id(new_id),
            GraphNode::Graph(graph) => {
                // The sub-graph's own boundary key must follow the rename.
                if let Err(err) = graph.set_id(new_id) {
                    self.nodes.insert(id.to_string(), entry);
                    return Err(err);
                }
            }
        }
        self.nodes.insert(new_id.to_string(), entry);
        tracing::debug!(graph = %self.base.id(), from = id, to = new_id, "node renamed");
        Ok(true)
    }

    /// Remove a node, reporting whether it existed. The boundary entry is
    /// not removable. Links referencing the removed node's ports are left
    /// alone; cascading is the caller's responsibility.
    pub fn remove_node(&mut self, id: &str) -> bool {
        match self.nodes.get(id) {
            Some(GraphNode::Boundary) | None => false,
            Some(_) => {
                self.nodes.remove(id);
                tracing::debug!(graph = %self.base.id(), node = id, "node removed");
                true
            }
        }
    }

    // --- link table ------------------------------------------------------

    pub fn links(&self) -> &HashMap<String, Link> {
        &self.links
    }

    pub fn find_link(&self, id: &str) -> Option<&Link> {
        self.links.get(id)
    }

    pub fn add_link(&mut self, id: &str, attributes: Attributes) -> Result<&mut Link, GraphError> {
        if self.links.contains_key(id) {
            return Err(GraphError::DuplicateLink(id.to_string()));
        }
        tracing::debug!(graph = %self.base.id(), link = id, "link added");
        Ok(self
            .links
            .entry(id.to_string())
            .or_insert_with(|| Link::new(id, attributes)))
    }

    pub fn rename_link(&mut self, id: &str, new_id: &str) -> Result<bool, GraphError> {
        if id == new_id {
            return Ok(self.links.contains_key(id));
        }
        if self.links.contains_key(new_id) {
            return Err(GraphError::DuplicateLink(new_id.to_string()));
        }
        let Some(mut link) = self.links.remove(id) else {
            return Ok(false);
        };
        link.set_id(new_id);
        self.links.insert(new_id.to_string(), link);
        Ok(true)
    }

    pub fn remove_link(&mut self, id: &str) -> bool {
        self.links.remove(id).is_some()
    }

    // --- boundary ports --------------------------------------------------

    /// Expose a public port at this graph's boundary. No internal binding is
    /// supplied at this layer; the runtime wires it later.
    pub fn add_public_port(
        &mut self,
        id: &str,
        attributes: Attributes,
    ) -> Result<&Port, GraphError> {
        self.base.insert_port(Port::public(id, None, attributes))
    }

    pub fn find_port(&self, id: &str) -> Option<&Port> {
        self.base.find_port(id)
    }

    /// This graph's own boundary ports.
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.base.ports()
    }

    // --- flattening ------------------------------------------------------

    /// Every descendant node across nested sub-graphs, depth first. A nested
    /// graph's descendants precede the nested graph itself; boundary entries
    /// (this graph included) are never part of the output.
    pub fn all_nodes(&self) -> Vec<&GraphNode> {
        let mut nodes = Vec::new();
        for entry in self.nodes.values() {
            match entry {
                GraphNode::Boundary => {}
                GraphNode::Leaf(_) => nodes.push(entry),
                GraphNode::Graph(graph) => {
                    nodes.extend(graph.all_nodes());
                    nodes.push(entry);
                }
            }
        }
        nodes
    }

    /// Every link across nested sub-graphs: all descendant links first,
    /// then this graph's own.
    pub fn all_links(&self) -> Vec<&Link> {
        let mut links = Vec::new();
        for entry in self.nodes.values() {
            if let GraphNode::Graph(graph) = entry {
                links.extend(graph.all_links());
            }
        }
        links.extend(self.links.values());
        links
    }

    /// Every port across nested sub-graphs, starting from this graph's own
    /// boundary ports.
    pub fn all_ports(&self) -> Vec<&Port> {
        let mut ports: Vec<&Port> = self.base.ports().collect();
        for entry in self.nodes.values() {
            match entry {
                GraphNode::Boundary => {}
                GraphNode::Leaf(node) => ports.extend(node.ports()),
                GraphNode::Graph(graph) => ports.extend(graph.all_ports()),
            }
        }
        ports
    }

    // --- serialization ---------------------------------------------------

    /// Serialize to a plain object: the base node's object plus `nodes`
    /// (boundary entry excluded) and `links` mappings. Nested graphs recurse
    /// naturally through their own `to_object`. The output parses back
    /// through [`Graph::new`] with identical node and link id sets.
    pub fn to_object(&self) -> Value {
        let mut object = match self.base.to_object() {
            Value::Object(map) => map,
            _ => Attributes::new(),
        };
        object.insert("id".to_string(), Value::String(self.base.id().to_string()));

        let mut nodes = Attributes::new();
        for (id, entry) in &self.nodes {
            match entry {
                GraphNode::Boundary => {}
                GraphNode::Leaf(node) => {
                    nodes.insert(id.clone(), node.to_object());
                }
                GraphNode::Graph(graph) => {
                    nodes.insert(id.clone(), graph.to_object());
                }
            }
        }
        object.insert("nodes".to_string(), Value::Object(nodes));

        let links: Attributes = self
            .links
            .iter()
            .map(|(id, link)| (id.clone(), link.to_object()))
            .collect();
        object.insert("links".to_string(), Value::Object(links));

        Value::Object(object)
    }

    // --- initialization --------------------------------------------------

    /// Drive `init_component` on every non-boundary member concurrently and
    /// wait for all of them.
    ///
    /// Succeeds only once every child initialization has succeeded; the
    /// first child failure is returned verbatim and drops the remaining
    /// sibling futures. A graph with no children completes immediately.
    pub async fn init_component(
        &mut self,
        factory: &dyn ComponentFactory,
    ) -> Result<(), NodeError> {
        let mut pending: FuturesUnordered<_> = self
            .nodes
            .values_mut()
            .filter_map(|entry| entry.init_future(factory))
            .collect();
        tracing::debug!(
            graph = %self.base.id(),
            children = pending.len(),
            "initializing components"
        );
        while let Some(result) = pending.next().await {
            if let Err(err) = result {
                tracing::error!(graph = %self.base.id(), error = %err, "child initialization failed");
                return Err(err);
            }
        }
        Ok(())
    }
}
