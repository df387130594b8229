//! Entity classification.
//!
//! Turns one dynamically-typed result value into an [`Entity`], so the
//! walker can match on it instead of probing marker keys itself.
//!
//! ```text
//! [node, edge, node, ...]  → Path
//! {~entityType: node}      → Node
//! {~entityType: relationship} → Edge
//! [...]                    → List
//! anything else            → Scalar (ignored)
//! ```

use serde_json::{Map, Value as Json};

use crate::model::*;

/// What a single result value turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity<'a> {
    Node(Node),
    Edge(Edge),
    Path(Path),
    List(&'a [Json]),
    Scalar,
}

/// Classify one result value. Never fails: unrecognized shapes are `Scalar`.
pub fn classify(value: &Json) -> Entity<'_> {
    match value {
        Json::Array(items) => match as_path(items) {
            Some(path) => Entity::Path(path),
            None => Entity::List(items),
        },
        Json::Object(map) => {
            if let Some(node) = as_node(map) {
                Entity::Node(node)
            } else if let Some(edge) = as_edge(map) {
                Entity::Edge(edge)
            } else {
                Entity::Scalar
            }
        }
        _ => Entity::Scalar,
    }
}

/// A path has at least one edge and strictly alternates node, edge, node.
fn as_path(items: &[Json]) -> Option<Path> {
    if items.len() < 3 || items.len() % 2 == 0 {
        return None;
    }

    let mut steps = items.iter();
    let mut path = Path::single(as_node(steps.next()?.as_object()?)?);
    while let Some(edge) = steps.next() {
        let edge = as_edge(edge.as_object()?)?;
        let node = as_node(steps.next()?.as_object()?)?;
        path.append(edge, node);
    }
    Some(path)
}

/// Build a [`Node`] from a map carrying the node markers.
///
/// `~labels` and `~properties` are optional.
pub fn as_node(map: &Map<String, Json>) -> Option<Node> {
    if entity_type(map) != Some(NODE_ENTITY) {
        return None;
    }
    let id = canonical_id(map.get(ID_KEY)?)?;

    let labels: Labels = match map.get(LABELS_KEY) {
        Some(Json::Array(items)) => items
            .iter()
            .filter_map(|l| l.as_str().map(str::to_owned))
            .collect(),
        Some(Json::String(single)) => Labels::from_iter([single.clone()]),
        _ => Labels::new(),
    };

    let mut node = Node::new(id.clone());
    node.properties = own_properties(map);
    node.properties.insert(ID_KEY.into(), Value::String(id));
    node.properties.insert(ENTITY_TYPE_KEY.into(), Value::from(NODE_ENTITY));
    node.properties.insert(
        LABELS_KEY.into(),
        Value::List(labels.iter().map(|l| Value::from(l.as_str())).collect()),
    );
    node.labels = labels;
    Some(node)
}

/// Build an [`Edge`] from a map carrying the relationship markers.
///
/// `~type` defaults to empty, `~properties` is optional.
pub fn as_edge(map: &Map<String, Json>) -> Option<Edge> {
    if entity_type(map) != Some(RELATIONSHIP_ENTITY) {
        return None;
    }
    let id = canonical_id(map.get(ID_KEY)?)?;
    let from = canonical_id(map.get(START_KEY)?)?;
    let to = canonical_id(map.get(END_KEY)?)?;
    let edge_type = map.get(TYPE_KEY).and_then(Json::as_str).unwrap_or_default();

    let mut edge = Edge::new(id.clone(), from.clone(), to.clone(), edge_type);
    edge.properties = own_properties(map);
    edge.properties.insert(ID_KEY.into(), Value::String(id));
    edge.properties.insert(ENTITY_TYPE_KEY.into(), Value::from(RELATIONSHIP_ENTITY));
    edge.properties.insert(START_KEY.into(), Value::String(from));
    edge.properties.insert(END_KEY.into(), Value::String(to));
    edge.properties.insert(TYPE_KEY.into(), Value::from(edge_type));
    Some(edge)
}

/// Ids are keys: numbers are rendered to their decimal string form.
pub fn canonical_id(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn entity_type(map: &Map<String, Json>) -> Option<&str> {
    map.get(ENTITY_TYPE_KEY).and_then(Json::as_str)
}

fn own_properties(map: &Map<String, Json>) -> PropertyMap {
    match map.get(PROPERTIES_KEY) {
        Some(Json::Object(props)) => props
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v)))
            .collect(),
        _ => PropertyMap::new(),
    }
}
