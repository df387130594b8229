//! Edge (relationship) in the result graph.

use serde::{Deserialize, Serialize};

use super::{NodeId, PropertyMap, Value};

/// External relationship identifier, canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId { fn from(v: &str) -> Self { EdgeId(v.to_owned()) } }
impl From<String> for EdgeId { fn from(v: String) -> Self { EdgeId(v) } }

/// Composite edge identity. Two edges between the same ordered pair of
/// nodes stay distinct as long as their ids differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub from: NodeId,
    pub to: NodeId,
    pub id: EdgeId,
}

impl EdgeKey {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, id: impl Into<EdgeId>) -> Self {
        Self { from: from.into(), to: to.into(), id: id.into() }
    }
}

/// A directed edge as stored in the graph model.
///
/// `properties` holds the relationship's own properties flattened together
/// with its `~id`, `~entityType`, `~start`, `~end` and `~type` markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub edge_type: String,
    pub properties: PropertyMap,
    pub label: String,
}

impl Edge {
    pub fn new(
        id: impl Into<EdgeId>,
        from_id: impl Into<NodeId>,
        to_id: impl Into<NodeId>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            edge_type: edge_type.into(),
            properties: PropertyMap::new(),
            label: String::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            from: self.from_id.clone(),
            to: self.to_id.clone(),
            id: self.id.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
