//! # cypher-network — openCypher results as a renderable multigraph
//!
//! Takes the materialized result set of an openCypher query and folds every
//! node, relationship and path it contains into one deduplicated
//! [`GraphModel`], tagging each entity with a visual group and a display
//! label along the way.
//!
//! ## Design Principles
//!
//! 1. **Classify once**: every bound value is turned into an [`Entity`]
//!    variant up front, downstream code matches exhaustively
//! 2. **Resolve config once**: display and grouping options are parsed into
//!    typed settings when the builder is created, not per entity
//! 3. **Data never fails a build**: malformed entities and bad selectors fall
//!    back to defaults; only subscriber callbacks can abort
//! 4. **Multigraph**: edges are keyed by `(from, to, id)`
//!
//! ## Quick Start
//!
//! ```rust
//! use cypher_network::{NetworkBuilder, NetworkConfig, ResultSet};
//!
//! # fn example() -> cypher_network::Result<()> {
//! let results = ResultSet::from_json(serde_json::json!({
//!     "results": [{
//!         "a": {
//!             "~id": "22",
//!             "~entityType": "node",
//!             "~labels": ["airport"],
//!             "~properties": {"runways": 3, "code": "SEA"}
//!         }
//!     }]
//! }))?;
//!
//! let config = NetworkConfig::default().with_display_property("code");
//! let graph = NetworkBuilder::new(&config).build(&results)?;
//!
//! let node = graph.node("22").unwrap();
//! assert_eq!(node.label, "SEA");
//! assert_eq!(node.group, "airport");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod classify;
pub mod config;
pub mod group;
pub mod label;
pub mod graph;
pub mod events;
pub mod network;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{Edge, EdgeId, EdgeKey, Labels, Node, NodeId, Path, PropertyMap, Value};
pub use classify::{classify, Entity};
pub use config::{DisplaySetting, GroupSetting, NetworkConfig, ResolvedConfig, Selector};
pub use group::{resolve_group, DEFAULT_GROUP};
pub use label::{resolve_label, truncate, DisplayLabel, Displayable};
pub use graph::{GraphModel, Upsert};
pub use events::{
    CallbackError, CallbackResult, EdgeData, EdgeEvent, EventBus, EventKind, EventPayload,
    NodeData, NodeEvent,
};
pub use network::{NetworkBuilder, ResultSet};
pub use export::{export_json, to_json};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid result set: {0}")]
    InvalidResultSet(String),

    #[error("Subscriber for {kind} failed: {source}")]
    Callback {
        kind: EventKind,
        #[source]
        source: CallbackError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
