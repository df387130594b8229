//! Shared result-set fixtures: a slice of the air-routes graph.

#![allow(dead_code)]

use cypher_network::{GraphModel, NetworkBuilder, NetworkConfig, ResultSet};
use serde_json::{json, Value as Json};

pub fn node(id: &str, label: &str, properties: Json) -> Json {
    json!({
        "~id": id,
        "~entityType": "node",
        "~labels": [label],
        "~properties": properties
    })
}

pub fn unlabelled(id: &str, properties: Json) -> Json {
    json!({
        "~id": id,
        "~entityType": "node",
        "~properties": properties
    })
}

pub fn edge(id: &str, from: &str, to: &str, edge_type: &str, properties: Json) -> Json {
    json!({
        "~id": id,
        "~entityType": "relationship",
        "~start": from,
        "~end": to,
        "~type": edge_type,
        "~properties": properties
    })
}

pub fn seattle() -> Json {
    node("22", "airport", json!({"runways": 3, "code": "SEA"}))
}

pub fn ontario() -> Json {
    node("151", "airport", json!({"runways": 2, "code": "ONT"}))
}

pub fn sea_ont_route() -> Json {
    edge("7389", "22", "151", "route", json!({"dist": 956}))
}

/// `{"results": [{"a": value}]}`
pub fn single(binding: &str, value: Json) -> ResultSet {
    ResultSet::new(vec![json!({ binding: value })])
}

pub fn rows(rows: Vec<Json>) -> ResultSet {
    ResultSet::new(rows)
}

pub fn build(config: NetworkConfig, results: &ResultSet) -> GraphModel {
    NetworkBuilder::new(&config).build(results).unwrap()
}
