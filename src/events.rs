//! Event bus for incremental consumers.
//!
//! Subscribers are called synchronously right after each node or edge
//! upsert, in registration order, with the graph as it stands at that
//! moment. A subscriber returning `Err` aborts the build; the error reaches
//! the caller as [`Error::Callback`](crate::Error::Callback).

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::GraphModel;
use crate::model::PropertyMap;
use crate::{Error, Result};

/// Error type a subscriber may return.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

pub type CallbackResult = std::result::Result<(), CallbackError>;

type Callback = Box<dyn FnMut(&GraphModel, EventKind, &EventPayload) -> CallbackResult>;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "add_node")]
    NodeAdded,
    #[serde(rename = "add_edge")]
    EdgeAdded,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::NodeAdded => "add_node",
            EventKind::EdgeAdded => "add_edge",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Rendering attributes of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub group: String,
    pub label: String,
    pub title: String,
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEvent {
    pub node_id: String,
    pub data: NodeData,
}

/// Rendering attributes of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub label: String,
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEvent {
    pub edge_id: String,
    pub from_id: String,
    pub to_id: String,
    pub label: String,
    pub data: EdgeData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    Node(NodeEvent),
    Edge(EdgeEvent),
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::Node(_) => EventKind::NodeAdded,
            EventPayload::Edge(_) => EventKind::EdgeAdded,
        }
    }

    pub fn as_node(&self) -> Option<&NodeEvent> {
        match self {
            EventPayload::Node(e) => Some(e),
            EventPayload::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeEvent> {
        match self {
            EventPayload::Edge(e) => Some(e),
            EventPayload::Node(_) => None,
        }
    }
}

// ============================================================================
// EventBus
// ============================================================================

/// Callback registry keyed by event kind.
///
/// No deduplication: registering the same closure twice calls it twice.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<EventKind, Vec<Callback>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F)
    where
        F: FnMut(&GraphModel, EventKind, &EventPayload) -> CallbackResult + 'static,
    {
        self.subscribers.entry(kind).or_default().push(Box::new(callback));
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver `payload` to every subscriber of its kind. Stops at the first
    /// failing subscriber.
    pub fn publish(&mut self, graph: &GraphModel, payload: &EventPayload) -> Result<()> {
        let kind = payload.kind();
        let Some(callbacks) = self.subscribers.get_mut(&kind) else {
            return Ok(());
        };

        for callback in callbacks.iter_mut() {
            callback(graph, kind, payload).map_err(|source| Error::Callback { kind, source })?;
        }
        debug!(event = %kind, subscribers = callbacks.len(), "event delivered");
        Ok(())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(EventKind, usize)> =
            self.subscribers.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("EventBus").field("subscribers", &counts).finish()
    }
}
