//! Result walker — folds an openCypher result set into a [`GraphModel`].
//!
//! ```text
//! ResultSet.results[row][binding]
//!   → classify
//!     → Node  → group + label → upsert → add_node event
//!     → Edge  → label         → upsert → add_edge event
//!     → Path  → n0, e0, n1, e1, ... in element order
//!     → List  → each element, recursively
//!     → Scalar → skipped
//! ```
//!
//! Binding names are never assumed; every value of every row is walked.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value as Json;
use tracing::{debug, trace};

use crate::classify::{classify, Entity};
use crate::config::{NetworkConfig, ResolvedConfig};
use crate::events::*;
use crate::graph::GraphModel;
use crate::group::resolve_group;
use crate::label::resolve_label;
use crate::model::*;
use crate::{Error, Result};

// ============================================================================
// ResultSet
// ============================================================================

/// A materialized query result: `{"results": [row, ...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultSet {
    pub results: Vec<Json>,
}

impl ResultSet {
    pub fn new(results: Vec<Json>) -> Self {
        Self { results }
    }

    pub fn from_json(value: Json) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidResultSet(e.to_string()))
    }

    pub fn rows(&self) -> usize {
        self.results.len()
    }
}

impl FromStr for ResultSet {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidResultSet(e.to_string()))
    }
}

// ============================================================================
// NetworkBuilder
// ============================================================================

/// Walks result sets and publishes an event per upserted entity.
///
/// The configuration is resolved once, at construction.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    config: ResolvedConfig,
    bus: EventBus,
}

impl NetworkBuilder {
    pub fn new(config: &NetworkConfig) -> Self {
        Self::with_resolved(config.resolve())
    }

    pub fn with_resolved(config: ResolvedConfig) -> Self {
        Self { config, bus: EventBus::new() }
    }

    /// Register a subscriber, builder style.
    pub fn with_callback<F>(mut self, kind: EventKind, callback: F) -> Self
    where
        F: FnMut(&GraphModel, EventKind, &EventPayload) -> CallbackResult + 'static,
    {
        self.bus.subscribe(kind, callback);
        self
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F)
    where
        F: FnMut(&GraphModel, EventKind, &EventPayload) -> CallbackResult + 'static,
    {
        self.bus.subscribe(kind, callback);
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Build a fresh graph from one result set.
    pub fn build(&mut self, results: &ResultSet) -> Result<GraphModel> {
        let mut graph = GraphModel::new();
        self.add_results(&mut graph, results)?;
        Ok(graph)
    }

    /// Fold another result set into an existing graph.
    pub fn add_results(&mut self, graph: &mut GraphModel, results: &ResultSet) -> Result<()> {
        for (row_index, row) in results.results.iter().enumerate() {
            let Json::Object(bindings) = row else {
                trace!(row = row_index, "skipping non-object row");
                continue;
            };
            for (binding, value) in bindings {
                trace!(row = row_index, binding = %binding, "walking binding");
                self.walk(graph, value)?;
            }
        }

        debug!(
            rows = results.rows(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "result set added to network"
        );
        Ok(())
    }

    fn walk(&mut self, graph: &mut GraphModel, value: &Json) -> Result<()> {
        match classify(value) {
            Entity::Node(node) => self.add_node(graph, node),
            Entity::Edge(edge) => self.add_edge(graph, edge),
            Entity::Path(path) => {
                let (start, hops) = path.into_hops();
                if let Some(start) = start {
                    self.add_node(graph, start)?;
                }
                for (edge, node) in hops {
                    self.add_edge(graph, edge)?;
                    self.add_node(graph, node)?;
                }
                Ok(())
            }
            Entity::List(items) => {
                for item in items {
                    self.walk(graph, item)?;
                }
                Ok(())
            }
            Entity::Scalar => Ok(()),
        }
    }

    fn add_node(&mut self, graph: &mut GraphModel, mut node: Node) -> Result<()> {
        node.group = resolve_group(&node, &self.config.group);
        let display = resolve_label(&node, &self.config.node_display, self.config.label_max_length);
        node.label = display.label;
        node.title = display.title;

        let payload = EventPayload::Node(NodeEvent {
            node_id: node.id.to_string(),
            data: NodeData {
                group: node.group.clone(),
                label: node.label.clone(),
                title: node.title.clone(),
                properties: node.properties.clone(),
            },
        });

        let outcome = graph.upsert_node(node);
        debug!(node_id = %payload_id(&payload), ?outcome, "node upserted");
        self.bus.publish(graph, &payload)
    }

    fn add_edge(&mut self, graph: &mut GraphModel, mut edge: Edge) -> Result<()> {
        let display = resolve_label(&edge, &self.config.edge_display, self.config.edge_label_max_length);
        edge.label = display.label;

        let payload = EventPayload::Edge(EdgeEvent {
            edge_id: edge.id.to_string(),
            from_id: edge.from_id.to_string(),
            to_id: edge.to_id.to_string(),
            label: edge.label.clone(),
            data: EdgeData {
                label: edge.label.clone(),
                properties: edge.properties.clone(),
            },
        });

        let outcome = graph.upsert_edge(edge);
        debug!(edge_id = %payload_id(&payload), ?outcome, "edge upserted");
        self.bus.publish(graph, &payload)
    }
}

fn payload_id(payload: &EventPayload) -> &str {
    match payload {
        EventPayload::Node(e) => &e.node_id,
        EventPayload::Edge(e) => &e.edge_id,
    }
}
