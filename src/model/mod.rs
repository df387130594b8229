//! # Property Graph Model
//!
//! DTOs shared by the classifier, the resolvers and the graph container.
//!
//! Design rule: this module is pure data. No I/O, no configuration,
//! no event dispatch.

pub mod node;
pub mod edge;
pub mod path;
pub mod value;
pub mod property_map;

pub use node::{Labels, Node, NodeId};
pub use edge::{Edge, EdgeId, EdgeKey};
pub use path::Path;
pub use value::Value;
pub use property_map::{property_map, PropertyMap};

// ============================================================================
// Marker fields
// ============================================================================

/// Entity id, present on nodes and relationships.
pub const ID_KEY: &str = "~id";
/// `"node"` or `"relationship"`.
pub const ENTITY_TYPE_KEY: &str = "~entityType";
pub const LABELS_KEY: &str = "~labels";
pub const PROPERTIES_KEY: &str = "~properties";
pub const START_KEY: &str = "~start";
pub const END_KEY: &str = "~end";
pub const TYPE_KEY: &str = "~type";

pub const NODE_ENTITY: &str = "node";
pub const RELATIONSHIP_ENTITY: &str = "relationship";
