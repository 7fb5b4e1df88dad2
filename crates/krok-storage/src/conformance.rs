//! Shared behavioural checks run against every [`FlowStore`] backend.

use serde_json::json;

use krok_core::{FlowCreate, FlowUpdate, NodeCreate, NodeUpdate, Patch, Properties};

use crate::error::StorageError;
use crate::traits::FlowStore;
use crate::types::Page;

fn node(id: &str, flow: &str) -> NodeCreate {
    NodeCreate::new(id, flow, "function", format!("node {id}"))
}

pub fn node_round_trip(store: &mut dyn FlowStore) {
    let mut create = NodeCreate::new("n1", "f1", "source", "A");
    create.properties.insert("topic".into(), json!("sensors/#"));
    create.properties.insert("qos".into(), json!({ "level": 1, "retain": [true] }));
    create.position_x = 120;
    create.position_y = -40;

    let created = store.create_node(create.clone()).unwrap();
    assert_eq!(created.status, "unknown");
    assert_eq!(created.health, 0);
    assert!(created.updated_at.is_none());

    let fetched = store.get_node("n1").unwrap().expect("node should exist");
    assert_eq!(fetched, created);
    assert_eq!(fetched.properties, create.properties);
    assert_eq!(
        fetched.properties.keys().collect::<Vec<_>>(),
        vec!["topic", "qos"]
    );
    assert_eq!(store.get_node("missing").unwrap(), None);
}

pub fn duplicate_node_rejected(store: &mut dyn FlowStore) {
    store.create_node(NodeCreate::new("n1", "f1", "source", "first")).unwrap();
    let err = store
        .create_node(NodeCreate::new("n1", "f2", "sink", "second"))
        .unwrap_err();
    assert!(matches!(err, StorageError::DuplicateNode(ref id) if id == "n1"));

    let kept = store.get_node("n1").unwrap().unwrap();
    assert_eq!(kept.name, "first");
    assert_eq!(kept.flow_id, "f1");
}

pub fn node_partial_update(store: &mut dyn FlowStore) {
    let created = store.create_node(node("n1", "f1")).unwrap();

    let update = NodeUpdate {
        status: Patch::Set("healthy".into()),
        health: Patch::Set(87),
        ..NodeUpdate::default()
    };
    let updated = store.update_node("n1", update).unwrap();

    assert_eq!(updated.status, "healthy");
    assert_eq!(updated.health, 87);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.position_x, created.position_x);
    assert_eq!(updated.properties, created.properties);
    assert_eq!(updated.created_at, created.created_at);
    let stamped = updated.updated_at.expect("update sets updated_at");
    assert!(stamped >= created.created_at);

    assert_eq!(store.get_node("n1").unwrap().unwrap(), updated);
}

pub fn missing_node_update_and_delete(store: &mut dyn FlowStore) {
    let err = store
        .update_node("ghost", NodeUpdate::default())
        .unwrap_err();
    assert!(matches!(err, StorageError::NodeNotFound(ref id) if id == "ghost"));
    assert!(!store.delete_node("ghost").unwrap());

    store.create_node(node("n1", "f1")).unwrap();
    assert!(store.delete_node("n1").unwrap());
    assert_eq!(store.get_node("n1").unwrap(), None);
    assert!(!store.delete_node("n1").unwrap());
}

pub fn nodes_listed_in_insertion_order_with_paging(store: &mut dyn FlowStore) {
    for (id, flow) in [("c", "f1"), ("a", "f2"), ("d", "f1"), ("b", "f1")] {
        store.create_node(node(id, flow)).unwrap();
    }

    let ids = |nodes: Vec<krok_core::Node>| nodes.into_iter().map(|n| n.node_id).collect::<Vec<_>>();

    assert_eq!(ids(store.list_nodes(Page::default()).unwrap()), ["c", "a", "d", "b"]);
    assert_eq!(ids(store.list_nodes(Page::new(1, 2)).unwrap()), ["a", "d"]);
    assert_eq!(ids(store.list_nodes(Page::new(10, 5)).unwrap()), Vec::<String>::new());
    assert_eq!(ids(store.list_nodes(Page::new(0, 0)).unwrap()), Vec::<String>::new());

    assert_eq!(
        ids(store.list_nodes_by_flow("f1", Page::default()).unwrap()),
        ["c", "d", "b"]
    );
    assert_eq!(ids(store.list_nodes_by_flow("f1", Page::new(1, 1)).unwrap()), ["d"]);
    assert!(store.list_nodes_by_flow("f9", Page::default()).unwrap().is_empty());
}

pub fn delete_nodes_by_flow_counts_matches(store: &mut dyn FlowStore) {
    for (id, flow) in [("a", "f1"), ("b", "f2"), ("c", "f1"), ("d", "f1")] {
        store.create_node(node(id, flow)).unwrap();
    }

    assert_eq!(store.delete_nodes_by_flow("f1").unwrap(), 3);
    assert_eq!(store.delete_nodes_by_flow("f1").unwrap(), 0);

    let remaining = store.list_nodes(Page::default()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].node_id, "b");
}

pub fn flow_lifecycle(store: &mut dyn FlowStore) {
    let mut create = FlowCreate::new("f1", "Ingest");
    create.description = Some("reads sensors".into());
    let created = store.create_flow(create).unwrap();
    assert_eq!(store.get_flow("f1").unwrap(), Some(created.clone()));

    let err = store.create_flow(FlowCreate::new("f1", "Other")).unwrap_err();
    assert!(matches!(err, StorageError::DuplicateFlow(_)));
    assert_eq!(store.get_flow("f1").unwrap().unwrap().name, "Ingest");

    store.create_flow(FlowCreate::new("f2", "Export")).unwrap();
    let names: Vec<_> = store
        .list_flows(Page::default())
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, ["Ingest", "Export"]);
    assert_eq!(store.list_flows(Page::new(1, 10)).unwrap().len(), 1);

    let update = FlowUpdate {
        description: Patch::Set(None),
        ..FlowUpdate::default()
    };
    let updated = store.update_flow("f1", update).unwrap();
    assert_eq!(updated.name, "Ingest");
    assert_eq!(updated.description, None);
    assert!(updated.updated_at.is_some());
    assert_eq!(store.get_flow("f1").unwrap(), Some(updated));

    let err = store.update_flow("nope", FlowUpdate::default()).unwrap_err();
    assert!(matches!(err, StorageError::FlowNotFound(_)));

    assert!(store.delete_flow("f1").unwrap());
    assert!(!store.delete_flow("f1").unwrap());
    assert_eq!(store.get_flow("f1").unwrap(), None);
}

pub fn deleting_flow_keeps_nodes(store: &mut dyn FlowStore) {
    store.create_flow(FlowCreate::new("f1", "Ingest")).unwrap();
    store.create_node(node("n1", "f1")).unwrap();
    // Nodes may reference flows that were never created.
    store.create_node(node("n2", "unknown-flow")).unwrap();

    assert!(store.delete_flow("f1").unwrap());
    assert!(store.get_node("n1").unwrap().is_some());
    assert_eq!(store.list_nodes(Page::default()).unwrap().len(), 2);
}

pub fn oversized_properties_rejected(store: &mut dyn FlowStore) {
    let mut create = node("n1", "f1");
    create.properties = (0..=krok_core::MAX_PROPERTY_KEYS)
        .map(|i| (format!("k{i}"), json!(i)))
        .collect::<Properties>();
    let err = store.create_node(create).unwrap_err();
    assert!(matches!(err, StorageError::Core(_)));
    assert_eq!(store.get_node("n1").unwrap(), None);
}
