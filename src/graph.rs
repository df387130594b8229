//! Graph model — the multigraph container.
//!
//! Entities live in insertion-ordered tables with a hash index per key:
//!
//! - nodes keyed by [`NodeId`]
//! - edges keyed by [`EdgeKey`] `(from, to, id)`, so parallel edges between
//!   the same pair of nodes are kept apart
//!
//! Upserts never fail. Re-observing a key replaces the stored entity
//! wholesale (no property-level merge) and keeps its original position.
//!
//! Every edge endpoint is a node: upserting an edge whose endpoint has not
//! been seen yet inserts a bare placeholder node for it. A later upsert of
//! the real node replaces the placeholder in place.

use hashbrown::HashMap;

use crate::group::DEFAULT_GROUP;
use crate::model::*;

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// The deduplicated result graph handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Upserts
    // ========================================================================

    pub fn upsert_node(&mut self, node: Node) -> Upsert {
        match self.node_index.get(&node.id) {
            Some(&slot) => {
                self.nodes[slot] = node;
                Upsert::Replaced
            }
            None => {
                self.node_index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
                Upsert::Inserted
            }
        }
    }

    pub fn upsert_edge(&mut self, edge: Edge) -> Upsert {
        self.ensure_endpoint(&edge.from_id);
        self.ensure_endpoint(&edge.to_id);

        let key = edge.key();
        match self.edge_index.get(&key) {
            Some(&slot) => {
                self.edges[slot] = edge;
                Upsert::Replaced
            }
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(edge);
                Upsert::Inserted
            }
        }
    }

    fn ensure_endpoint(&mut self, id: &NodeId) {
        if !self.node_index.contains_key(id) {
            self.upsert_node(placeholder(id));
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&slot| &self.nodes[slot])
    }

    pub fn edge(&self, from: &str, to: &str, id: &str) -> Option<&Edge> {
        self.edge_by_key(&EdgeKey::new(from, to, id))
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&Edge> {
        self.edge_index.get(key).map(|&slot| &self.edges[slot])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// All parallel edges from `from` to `to`, in insertion order.
    pub fn edges_between<'a>(&'a self, from: &'a str, to: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.from_id.0 == from && e.to_id.0 == to)
    }

    /// Edges touching a node in either direction.
    pub fn edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.from_id.0 == id || e.to_id.0 == id)
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Edges in first-seen order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Stand-in for an endpoint known only from an edge: no labels, no
/// properties, the id as label and title.
fn placeholder(id: &NodeId) -> Node {
    let mut node = Node::new(id.clone());
    node.group = DEFAULT_GROUP.to_owned();
    node.label = id.0.clone();
    node.title = id.0.clone();
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_node_dedups() {
        let mut graph = GraphModel::new();
        assert_eq!(graph.upsert_node(Node::new("22").with_property("code", "SEA")), Upsert::Inserted);
        assert_eq!(graph.upsert_node(Node::new("22").with_property("runways", 3)), Upsert::Replaced);
        assert_eq!(graph.node_count(), 1);

        // last write wins, no property merge
        let node = graph.node("22").unwrap();
        assert_eq!(node.get("runways"), Some(&Value::Int(3)));
        assert!(node.get("code").is_none());
    }

    #[test]
    fn test_replaced_node_keeps_position() {
        let mut graph = GraphModel::new();
        graph.upsert_node(Node::new("1"));
        graph.upsert_node(Node::new("2"));
        graph.upsert_node(Node::new("1").with_labels(["airport"]));
        let ids: Vec<&str> = graph.nodes().map(|n| n.id.0.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(graph.node("1").unwrap().has_label("airport"));
    }

    #[test]
    fn test_multigraph_parallel_edges() {
        let mut graph = GraphModel::new();
        graph.upsert_edge(Edge::new("30601", "365", "136", "route"));
        graph.upsert_edge(Edge::new("30602", "365", "136", "route"));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges_between("365", "136").count(), 2);
        assert_eq!(graph.edges_between("136", "365").count(), 0);
    }

    #[test]
    fn test_identical_edge_key_merges() {
        let mut graph = GraphModel::new();
        graph.upsert_edge(Edge::new("7389", "22", "151", "route").with_property("dist", 956));
        let outcome = graph.upsert_edge(Edge::new("7389", "22", "151", "route").with_property("dist", 957));
        assert_eq!(outcome, Upsert::Replaced);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge("22", "151", "7389").unwrap().get("dist"), Some(&Value::Int(957)));
    }

    #[test]
    fn test_same_edge_id_new_endpoints_is_a_new_entry() {
        let mut graph = GraphModel::new();
        graph.upsert_edge(Edge::new("1", "a", "b", "route"));
        graph.upsert_edge(Edge::new("1", "a", "c", "route"));
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edge("a", "c", "1").is_some());
    }

    #[test]
    fn test_edge_creates_missing_endpoints() {
        let mut graph = GraphModel::new();
        graph.upsert_node(Node::new("22").with_labels(["airport"]));
        graph.upsert_edge(Edge::new("7389", "22", "151", "route"));

        assert_eq!(graph.node_count(), 2);
        // existing endpoint untouched
        assert!(graph.node("22").unwrap().has_label("airport"));
        let bare = graph.node("151").unwrap();
        assert_eq!(bare.group, DEFAULT_GROUP);
        assert_eq!(bare.label, "151");
        assert!(bare.properties.is_empty());
        assert!(graph.edges().all(|e| graph.contains_node(&e.from_id.0) && graph.contains_node(&e.to_id.0)));
    }

    #[test]
    fn test_real_node_replaces_placeholder_in_place() {
        let mut graph = GraphModel::new();
        graph.upsert_edge(Edge::new("7389", "22", "151", "route"));
        let outcome = graph.upsert_node(Node::new("151").with_labels(["airport"]));
        assert_eq!(outcome, Upsert::Replaced);

        let ids: Vec<&str> = graph.nodes().map(|n| n.id.0.as_str()).collect();
        assert_eq!(ids, vec!["22", "151"]);
        assert!(graph.node("151").unwrap().has_label("airport"));
    }

    #[test]
    fn test_lookups_on_empty_graph() {
        let graph = GraphModel::new();
        assert!(graph.is_empty());
        assert!(graph.node("22").is_none());
        assert!(!graph.contains_node("22"));
        assert!(graph.edge("22", "151", "7389").is_none());
    }

    #[test]
    fn test_edges_of() {
        let mut graph = GraphModel::new();
        graph.upsert_edge(Edge::new("1", "a", "b", "route"));
        graph.upsert_edge(Edge::new("2", "c", "a", "route"));
        graph.upsert_edge(Edge::new("3", "b", "c", "route"));
        let ids: Vec<&str> = graph.edges_of("a").map(|e| e.id.0.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
