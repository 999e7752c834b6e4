use graphcore::{Attributes, Component, GraphError, Node, NodeError};
use graphruntime::{parse_graph, ComponentBuilder, ComponentRegistry, GraphRuntime};
use std::sync::Arc;

struct EchoComponent;

impl Component for EchoComponent {
    fn component_type(&self) -> &str {
        "test.echo"
    }
}

struct EchoBuilder;

impl ComponentBuilder for EchoBuilder {
    fn build(&self, _node: &Node) -> Result<Box<dyn Component>, NodeError> {
        Ok(Box::new(EchoComponent))
    }

    fn component_type(&self) -> &str {
        "test.echo"
    }
}

const DEFINITION: &str = r#"{
    "id": "main",
    "nodes": {
        "a": { "component": "test.echo" },
        "plain": {},
        "sub": {
            "nodes": {
                "b": { "component": "test.echo" }
            },
            "links": {}
        }
    },
    "links": {
        "wire": {
            "from": { "node": "a", "port": "out" },
            "to": { "node": "sub", "port": "in" }
        }
    }
}"#;

#[test]
fn parse_graph_builds_nested_structure() {
    let graph = parse_graph(DEFINITION).unwrap();
    assert_eq!(graph.id(), "main");
    // Three leaves plus the sub-graph node itself; boundaries are excluded.
    assert_eq!(graph.all_nodes().len(), 4);
    assert_eq!(graph.all_links().len(), 1);
    assert!(graph.find_node("sub").unwrap().as_graph().is_some());
}

#[test]
fn parse_graph_rejects_non_object_roots() {
    let err = parse_graph("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, GraphError::InvalidDefinition(_)));

    // Malformed JSON surfaces as a serialization error.
    let err = parse_graph("{ nope").unwrap_err();
    assert!(matches!(err, GraphError::Serialization(_)));
}

#[test]
fn registry_builds_known_types_only() {
    let mut registry = ComponentRegistry::new();
    registry.register(Arc::new(EchoBuilder));
    assert_eq!(registry.list_component_types(), vec!["test.echo"]);

    let node = Node::new("n", Attributes::new()).unwrap();
    let component = registry.create("test.echo", &node).unwrap();
    assert_eq!(component.component_type(), "test.echo");
    // Boxed components are debug-printable through their type identifier.
    assert!(format!("{:?}", component).contains("test.echo"));

    let err = registry.create("test.unknown", &node).unwrap_err();
    assert!(matches!(err, NodeError::UnknownComponentType(t) if t == "test.unknown"));
}

#[tokio::test]
async fn materialize_attaches_components_across_the_tree() {
    let mut registry = ComponentRegistry::new();
    registry.register(Arc::new(EchoBuilder));
    let runtime = GraphRuntime::with_registry(Arc::new(registry));

    let mut graph = parse_graph(DEFINITION).unwrap();
    runtime.materialize(&mut graph).await.unwrap();

    let a = graph.find_node("a").unwrap().as_leaf().unwrap();
    assert_eq!(a.component().unwrap().component_type(), "test.echo");

    // A node without a component attribute is left alone.
    let plain = graph.find_node("plain").unwrap().as_leaf().unwrap();
    assert!(plain.component().is_none());

    let sub = graph.find_node("sub").unwrap().as_graph().unwrap();
    let b = sub.find_node("b").unwrap().as_leaf().unwrap();
    assert!(b.component().is_some());
}

#[tokio::test]
async fn materialize_fails_on_undeclared_component_types() {
    let runtime = GraphRuntime::new();
    let mut graph = parse_graph(DEFINITION).unwrap();

    let err = runtime.materialize(&mut graph).await.unwrap_err();
    assert!(matches!(err, NodeError::UnknownComponentType(t) if t == "test.echo"));
}
