use anyhow::Result;
use clap::{Parser, Subcommand};
use graphcore::{Graph, GraphNode};
use graphruntime::{load_graph, ComponentRegistry, GraphRuntime};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "graph")]
#[command(about = "Composite graph CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a graph definition file
    Inspect {
        /// Path to graph JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Validate a graph definition file
    Validate {
        /// Path to graph JSON file
        file: PathBuf,
    },

    /// Materialize components for a graph definition
    Materialize {
        /// Path to graph JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List available component types
    Components,

    /// Create a new example graph definition
    Init {
        /// Output file path
        #[arg(short, long, default_value = "graph.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file } => {
            inspect_graph(file)?;
        }

        Commands::Validate { file } => {
            validate_graph(file)?;
        }

        Commands::Materialize { file, verbose } => {
            // Initialize logging
            if verbose {
                tracing_subscriber::fmt()
                    .with_max_level(tracing::Level::DEBUG)
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_max_level(tracing::Level::INFO)
                    .init();
            }

            materialize_graph(file).await?;
        }

        Commands::Components => {
            list_components();
        }

        Commands::Init { output } => {
            create_example_graph(output)?;
        }
    }

    Ok(())
}

fn inspect_graph(file: PathBuf) -> Result<()> {
    println!("🔍 Loading graph from: {}", file.display());

    let graph = load_graph(&file)?;

    println!("📋 Graph: {}", graph.id());
    println!("   Immediate nodes: {}", graph.nodes().len() - 1);
    println!("   Immediate links: {}", graph.links().len());
    println!();
    println!("📦 Flattened tree:");
    println!("   Nodes: {}", graph.all_nodes().len());
    println!("   Links: {}", graph.all_links().len());
    println!("   Ports: {}", graph.all_ports().len());
    println!();

    for entry in graph.all_nodes() {
        match entry {
            GraphNode::Graph(sub) => {
                println!("  • {} (sub-graph, {} nodes)", sub.id(), sub.nodes().len() - 1);
            }
            GraphNode::Leaf(node) => {
                let component = node
                    .attributes()
                    .get("component")
                    .and_then(|v| v.as_str())
                    .unwrap_or("-");
                println!("  • {} (component: {})", node.id(), component);
            }
            GraphNode::Boundary => {}
        }
    }

    Ok(())
}

fn validate_graph(file: PathBuf) -> Result<()> {
    println!("🔍 Validating graph: {}", file.display());

    let graph = load_graph(&file)?;

    // A valid definition must survive a serialization round trip.
    let object = graph.to_object();
    let reparsed = match object {
        serde_json::Value::Object(attributes) => Graph::new(attributes)?,
        _ => unreachable!("to_object always yields an object"),
    };
    if reparsed.all_nodes().len() != graph.all_nodes().len()
        || reparsed.all_links().len() != graph.all_links().len()
    {
        anyhow::bail!("serialization round trip lost nodes or links");
    }

    println!("✅ Graph is valid:");
    println!("   Id: {}", graph.id());
    println!("   Nodes: {}", graph.all_nodes().len());
    println!("   Links: {}", graph.all_links().len());

    Ok(())
}

async fn materialize_graph(file: PathBuf) -> Result<()> {
    println!("🚀 Loading graph from: {}", file.display());

    let mut registry = ComponentRegistry::new();
    graphcomponents::register_all(&mut registry);
    let runtime = GraphRuntime::with_registry(Arc::new(registry));

    let mut graph = load_graph(&file)?;
    runtime.materialize(&mut graph).await?;

    println!("✨ Materialized {} nodes", graph.all_nodes().len());
    for entry in graph.all_nodes() {
        if let GraphNode::Leaf(node) = entry {
            match node.component() {
                Some(component) => {
                    println!("  ✅ {} -> {}", node.id(), component.component_type());
                }
                None => {
                    println!("  ⚪ {} (no component)", node.id());
                }
            }
        }
    }

    Ok(())
}

fn list_components() {
    println!("📦 Available Component Types:");
    println!();

    let mut registry = ComponentRegistry::new();
    graphcomponents::register_all(&mut registry);

    for component_type in registry.list_component_types() {
        if let Some(metadata) = registry.get_metadata(&component_type) {
            println!("  • {} ({})", component_type, metadata.category);
            println!("    {}", metadata.description);
        } else {
            println!("  • {}", component_type);
        }
    }
}

fn create_example_graph(output: PathBuf) -> Result<()> {
    let definition = json!({
        "id": "main",
        "description": "Example composite graph with a nested stage",
        "nodes": {
            "reader": { "component": "debug.log" },
            "stage": {
                "nodes": {
                    "wait": { "component": "time.delay", "delay_ms": 250 },
                    "sink": { "component": "core.passthrough" }
                },
                "links": {
                    "l1": {
                        "from": { "node": "wait", "port": "out" },
                        "to": { "node": "sink", "port": "in" }
                    }
                }
            }
        },
        "links": {
            "l0": {
                "from": { "node": "reader", "port": "out" },
                "to": { "node": "stage", "port": "in" }
            }
        }
    });

    let json = serde_json::to_string_pretty(&definition)?;
    std::fs::write(&output, json)?;

    println!("✨ Created example graph: {}", output.display());
    println!();
    println!("Inspect it with:");
    println!("  graph inspect --file {}", output.display());

    Ok(())
}
