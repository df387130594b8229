//! End-to-end tests for add_node / add_edge subscribers.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use cypher_network::{Error, EventKind, EventPayload, NetworkBuilder, NetworkConfig};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// 1. Payload contents
// ============================================================================

#[test]
fn test_add_node_payload() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut builder = NetworkBuilder::new(&NetworkConfig::default()).with_callback(
        EventKind::NodeAdded,
        move |_, kind, payload| {
            sink.borrow_mut().push((kind, serde_json::to_value(payload)?));
            Ok(())
        },
    );
    let graph = builder.build(&single("a", seattle())).unwrap();

    let expected = json!({
        "node_id": "22",
        "data": {
            "group": "airport",
            "label": "airport",
            "title": "airport",
            "properties": {
                "~id": "22",
                "~entityType": "node",
                "~labels": ["airport"],
                "code": "SEA",
                "runways": 3
            }
        }
    });
    assert_eq!(*seen.borrow(), vec![(EventKind::NodeAdded, expected.clone())]);

    let stored = serde_json::to_value(&graph.node("22").unwrap().properties).unwrap();
    assert_eq!(stored, expected["data"]["properties"]);
}

#[test]
fn test_add_edge_payload() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut builder = NetworkBuilder::default().with_callback(EventKind::EdgeAdded, move |_, kind, payload| {
        sink.borrow_mut().push((kind, serde_json::to_value(payload)?));
        Ok(())
    });
    builder.build(&single("r", sea_ont_route())).unwrap();

    let expected = json!({
        "edge_id": "7389",
        "from_id": "22",
        "to_id": "151",
        "label": "route",
        "data": {
            "label": "route",
            "properties": {
                "~id": "7389",
                "~entityType": "relationship",
                "~start": "22",
                "~end": "151",
                "~type": "route",
                "dist": 956
            }
        }
    });
    assert_eq!(*seen.borrow(), vec![(EventKind::EdgeAdded, expected)]);
}

#[test]
fn test_payload_properties_keep_arrival_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut builder = NetworkBuilder::default().with_callback(EventKind::NodeAdded, move |_, _, payload| {
        let keys = payload.as_node().unwrap().data.properties.keys().cloned();
        sink.borrow_mut().extend(keys);
        Ok(())
    });
    builder
        .build(&single("a", node("22", "airport", json!({"zeta": 1, "code": "SEA", "alpha": 2}))))
        .unwrap();

    let keys: Vec<String> = seen.borrow()[..3].to_vec();
    assert_eq!(keys, vec!["zeta", "code", "alpha"]);
}

// ============================================================================
// 2. Ordering and visibility
// ============================================================================

#[test]
fn test_path_event_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let nodes = Rc::clone(&log);
    let edges = Rc::clone(&log);

    let mut builder = NetworkBuilder::default()
        .with_callback(EventKind::NodeAdded, move |_, _, payload| {
            if let EventPayload::Node(e) = payload {
                nodes.borrow_mut().push(format!("node {}", e.node_id));
            }
            Ok(())
        })
        .with_callback(EventKind::EdgeAdded, move |_, _, payload| {
            if let EventPayload::Edge(e) = payload {
                edges.borrow_mut().push(format!("edge {}", e.edge_id));
            }
            Ok(())
        });

    builder
        .build(&single("p", json!([seattle(), sea_ont_route(), ontario()])))
        .unwrap();
    // element order: n0, e0, n1
    assert_eq!(*log.borrow(), vec!["node 22", "edge 7389", "node 151"]);
}

#[test]
fn test_edge_subscriber_sees_both_endpoints() {
    let checked = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&checked);

    let mut builder = NetworkBuilder::default().with_callback(EventKind::EdgeAdded, move |graph, _, payload| {
        let edge = payload.as_edge().unwrap();
        assert!(graph.contains_node(&edge.from_id));
        assert!(graph.contains_node(&edge.to_id));
        *sink.borrow_mut() += 1;
        Ok(())
    });

    builder.build(&single("r", sea_ont_route())).unwrap();
    builder
        .build(&single("p", json!([seattle(), sea_ont_route(), ontario()])))
        .unwrap();
    assert_eq!(*checked.borrow(), 2);
}

#[test]
fn test_subscriber_sees_graph_so_far() {
    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&counts);

    let mut builder = NetworkBuilder::default().with_callback(EventKind::NodeAdded, move |graph, _, payload| {
        let id = &payload.as_node().unwrap().node_id;
        assert!(graph.contains_node(id));
        sink.borrow_mut().push(graph.node_count());
        Ok(())
    });

    let results = rows(vec![
        json!({"a": seattle()}),
        json!({"a": ontario()}),
        json!({"a": seattle()}),
    ]);
    builder.build(&results).unwrap();

    // one event per upsert, including the repeat
    assert_eq!(*counts.borrow(), vec![1, 2, 2]);
}

#[test]
fn test_multiple_subscribers_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut builder = NetworkBuilder::default();
    for tag in 0..3 {
        let log = Rc::clone(&log);
        builder.subscribe(EventKind::NodeAdded, move |_, _, _| {
            log.borrow_mut().push(tag);
            Ok(())
        });
    }
    builder.build(&single("a", seattle())).unwrap();
    assert_eq!(*log.borrow(), vec![0, 1, 2]);
}

// ============================================================================
// 3. Failing subscribers
// ============================================================================

#[test]
fn test_failing_subscriber_aborts_build() {
    let mut builder = NetworkBuilder::default().with_callback(EventKind::EdgeAdded, |_, _, _| {
        Err("canvas detached".into())
    });

    let err = builder
        .build(&single("p", json!([seattle(), sea_ont_route(), ontario()])))
        .unwrap_err();
    match err {
        Error::Callback { kind, source } => {
            assert_eq!(kind, EventKind::EdgeAdded);
            assert_eq!(source.to_string(), "canvas detached");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_failure_stops_the_walk() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut builder = NetworkBuilder::default().with_callback(EventKind::NodeAdded, move |_, _, _| {
        *counter.borrow_mut() += 1;
        if *counter.borrow() == 2 {
            return Err("second node rejected".into());
        }
        Ok(())
    });

    let results = rows(vec![
        json!({"a": seattle()}),
        json!({"a": ontario()}),
        json!({"a": node("8", "airport", json!({"code": "DFW"}))}),
    ]);
    assert!(builder.build(&results).is_err());
    assert_eq!(*calls.borrow(), 2);
}
