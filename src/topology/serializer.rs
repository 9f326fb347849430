//! JSON export and import of a [`GraphStore`].
//!
//! The file format is a single object with a `nodes` array and an `edges`
//! array, in store order. Import is validate-then-swap: nothing touches the
//! store until the whole document has been parsed and checked.

use std::collections::HashSet;

use log::{info, warn};
use serde_json::Value;

use super::error::ImportError;
use super::store::GraphStore;
use super::types::{Edge, Node, TopologyDocument};

/// Serializes the current snapshot, pretty-printed.
pub fn export(store: &GraphStore) -> serde_json::Result<String> {
	serde_json::to_string_pretty(&store.snapshot())
}

/// Parses and validates a document without touching any store.
///
/// Cross references are not checked: edges may name node ids that do not
/// exist. Node ids must be unique.
pub fn parse_document(text: &str) -> Result<TopologyDocument, ImportError> {
	let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
	let Value::Object(mut root) = value else {
		return Err(ImportError::Shape("top level is not an object".to_string()));
	};

	let nodes = match root.remove("nodes") {
		Some(nodes @ Value::Array(_)) => nodes,
		Some(_) => return Err(ImportError::Shape("\"nodes\" is not an array".to_string())),
		None => return Err(ImportError::Shape("missing \"nodes\" array".to_string())),
	};
	let edges = match root.remove("edges") {
		Some(edges @ Value::Array(_)) => edges,
		Some(_) => return Err(ImportError::Shape("\"edges\" is not an array".to_string())),
		None => return Err(ImportError::Shape("missing \"edges\" array".to_string())),
	};

	let nodes: Vec<Node> =
		serde_json::from_value(nodes).map_err(|e| ImportError::Shape(format!("bad node: {e}")))?;
	let edges: Vec<Edge> =
		serde_json::from_value(edges).map_err(|e| ImportError::Shape(format!("bad edge: {e}")))?;

	let mut seen = HashSet::with_capacity(nodes.len());
	if let Some(dup) = nodes.iter().find(|n| !seen.insert(n.id)) {
		return Err(ImportError::Shape(format!("duplicate node id {}", dup.id)));
	}

	Ok(TopologyDocument { nodes, edges })
}

/// Replaces the store's contents with the document in `text`.
///
/// On error the store is left exactly as it was.
pub fn import(store: &mut GraphStore, text: &str) -> Result<(), ImportError> {
	match parse_document(text) {
		Ok(document) => {
			info!(
				"topo-map: imported {} nodes, {} edges",
				document.nodes.len(),
				document.edges.len()
			);
			store.replace(document);
			Ok(())
		}
		Err(e) => {
			warn!("topo-map: import rejected: {}", e);
			Err(e)
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::topology::types::{NodeId, NodeSpec, ServiceGroup};

	fn three_node_store() -> GraphStore {
		let mut store = GraphStore::new();
		store.add_node(NodeSpec::labeled("Load Balancer\n(HAProxy)", ServiceGroup::Network).at(0.0, -200.0));
		store.add_node(NodeSpec::labeled("Web", ServiceGroup::Server).at(-150.0, 0.0));
		store.add_node(NodeSpec::labeled("Queue", ServiceGroup::Other("queue".into())).at(150.5, 0.25));
		store.add_edge(NodeId(1), NodeId(2), "HTTP");
		store.add_edge(NodeId(2), NodeId(3), "AMQP");
		store
	}

	#[test]
	fn export_then_import_is_identity() {
		let original = three_node_store();
		let text = export(&original).unwrap();
		let mut restored = GraphStore::new();
		import(&mut restored, &text).unwrap();
		assert_eq!(restored, original);
	}

	#[test]
	fn export_has_nodes_and_edges_keys() {
		let text = export(&three_node_store()).unwrap();
		let value: Value = serde_json::from_str(&text).unwrap();
		assert_eq!(value["nodes"][0]["id"], 1);
		assert_eq!(value["nodes"][2]["group"], "queue");
		assert_eq!(value["edges"][1]["from"], 2);
		assert_eq!(value["edges"][1]["label"], "AMQP");
	}

	#[test]
	fn empty_object_is_a_shape_error_and_changes_nothing() {
		let mut store = three_node_store();
		let before = store.clone();
		let err = import(&mut store, "{}").unwrap_err();
		assert!(matches!(err, ImportError::Shape(_)));
		assert_eq!(store, before);
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let mut store = three_node_store();
		let before = store.clone();
		let err = import(&mut store, "{\"nodes\": [").unwrap_err();
		assert!(matches!(err, ImportError::Parse(_)));
		assert_eq!(store, before);
	}

	#[test]
	fn one_missing_array_is_rejected() {
		let err = parse_document(r#"{"nodes": []}"#).unwrap_err();
		assert!(matches!(err, ImportError::Shape(_)));
		let err = parse_document(r#"{"nodes": [], "edges": {}}"#).unwrap_err();
		assert!(matches!(err, ImportError::Shape(_)));
	}

	#[test]
	fn non_object_root_is_rejected() {
		assert!(matches!(parse_document("[1, 2]"), Err(ImportError::Shape(_))));
	}

	#[test]
	fn badly_typed_node_is_a_shape_error() {
		let err = parse_document(r#"{"nodes": [{"id": "one"}], "edges": []}"#).unwrap_err();
		assert!(matches!(err, ImportError::Shape(_)));
	}

	#[test]
	fn duplicate_node_ids_are_rejected() {
		let text = r#"{"nodes": [{"id": 1}, {"id": 1}], "edges": []}"#;
		assert!(matches!(parse_document(text), Err(ImportError::Shape(_))));
	}

	#[test]
	fn dangling_edges_are_accepted() {
		let text = r#"{"nodes": [{"id": 1, "label": "a", "group": "app", "x": 0, "y": 0}],
			"edges": [{"from": 1, "to": 42, "label": "ghost"}]}"#;
		let mut store = GraphStore::new();
		import(&mut store, text).unwrap();
		assert_eq!(store.edges().len(), 1);
		assert_eq!(store.edges()[0].to, NodeId(42));
	}

	#[test]
	fn import_replaces_rather_than_merges() {
		let mut store = three_node_store();
		import(&mut store, r#"{"nodes": [{"id": 9}], "edges": []}"#).unwrap();
		assert_eq!(store.nodes().len(), 1);
		assert!(store.edges().is_empty());
		assert_eq!(store.nodes()[0].id, NodeId(9));
	}
}
