//! Path — a sequence of alternating nodes and edges.

use serde::{Deserialize, Serialize};
use super::{Edge, Node};

/// A path as returned by one query binding: node -[edge]- node -[edge]- node ...
///
/// Never stored in the graph model; the walker decomposes it into its
/// nodes and edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Nodes along the path. Always has one more element than `edges`.
    pub nodes: Vec<Node>,
    /// Edges connecting consecutive nodes.
    pub edges: Vec<Edge>,
}

impl Path {
    pub fn single(node: Node) -> Self {
        Self { nodes: vec![node], edges: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Extend path with an edge and its far node.
    pub fn append(&mut self, edge: Edge, node: Node) {
        self.edges.push(edge);
        self.nodes.push(node);
    }

    /// Split into the first node and the `(edge, node)` hops that follow it.
    pub fn into_hops(self) -> (Option<Node>, impl Iterator<Item = (Edge, Node)>) {
        let mut nodes = self.nodes.into_iter();
        let start = nodes.next();
        (start, self.edges.into_iter().zip(nodes))
    }
}
