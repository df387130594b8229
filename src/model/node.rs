//! Node in the result graph.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{PropertyMap, Value};

/// External node identifier, always in canonical string form.
///
/// The same logical id can arrive as `22` in one row and `"22"` in the
/// next; both canonicalize to `NodeId("22")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for NodeId { fn from(v: &str) -> Self { NodeId(v.to_owned()) } }
impl From<String> for NodeId { fn from(v: String) -> Self { NodeId(v) } }

/// Node labels. Almost every node carries one or two.
pub type Labels = SmallVec<[String; 2]>;

/// A node as stored in the graph model.
///
/// `properties` holds the entity's own properties flattened together with
/// its `~id`, `~entityType` and `~labels` markers. `group`, `label` and
/// `title` are filled in by the resolvers before the node is upserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub labels: Labels,
    pub properties: PropertyMap,
    pub group: String,
    pub label: String,
    pub title: String,
}

impl Node {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            labels: Labels::new(),
            properties: PropertyMap::new(),
            group: String::new(),
            label: String::new(),
            title: String::new(),
        }
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn first_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
