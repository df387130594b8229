//! JSON export — hand the finished graph to a renderer in one document.
//!
//! ```text
//! GraphModel → to_json() → {"nodes": [...], "edges": [...]}
//!   → vis-network / d3 / any renderer that takes node and edge arrays
//! ```
//!
//! Node and edge objects carry the same attributes as the `add_node` /
//! `add_edge` event payloads, so a renderer that draws incrementally and
//! one that draws after the build see identical data.

use std::io::Write;

use serde_json::{json, Value as Json};

use crate::graph::GraphModel;
use crate::model::*;
use crate::Result;

/// Render the whole graph as a JSON document, entities in first-seen order.
pub fn to_json(graph: &GraphModel) -> Json {
    let nodes: Vec<Json> = graph.nodes().map(node_json).collect();
    let edges: Vec<Json> = graph.edges().map(edge_json).collect();
    json!({ "nodes": nodes, "edges": edges })
}

/// Write the graph as a JSON document.
pub fn export_json(graph: &GraphModel, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer(&mut *writer, &to_json(graph))?;
    writeln!(writer)?;
    Ok(())
}

fn node_json(node: &Node) -> Json {
    json!({
        "id": node.id,
        "group": node.group,
        "label": node.label,
        "title": node.title,
        "properties": node.properties,
    })
}

fn edge_json(edge: &Edge) -> Json {
    json!({
        "id": edge.id,
        "from": edge.from_id,
        "to": edge.to_id,
        "label": edge.label,
        "properties": edge.properties,
    })
}
