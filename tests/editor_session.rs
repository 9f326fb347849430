//! End-to-end editing sessions driven through the public editor API.

#![allow(unused_crate_dependencies)]

use pretty_assertions::assert_eq;
use topo_map::topology::{
	CatalogEntry, ConnectionState, EditorConfig, Effect, GraphStore, ImportError, NodeId, NodeSpec,
	PointerEvent, ServiceCatalog, ServiceGroup, TopologyEditor,
};

fn config() -> EditorConfig {
	EditorConfig {
		settle_delay_ms: 0,
		..EditorConfig::default()
	}
}

fn click(id: i64) -> PointerEvent {
	PointerEvent::Click(Some(NodeId(id)))
}

/// Three nodes, edges 1-2 and 2-3.
fn small_graph() -> TopologyEditor {
	let mut store = GraphStore::new();
	for name in ["gateway", "api", "db"] {
		store.add_node(NodeSpec::labeled(name, ServiceGroup::App));
	}
	store.add_edge(NodeId(1), NodeId(2), "HTTP");
	store.add_edge(NodeId(2), NodeId(3), "SQL");
	TopologyEditor::new(store, config())
}

#[test]
fn cancel_then_connect_in_one_session() {
	let mut store = GraphStore::new();
	store.add_node(NodeSpec::labeled("web", ServiceGroup::Server));
	store.add_node(NodeSpec::labeled("db", ServiceGroup::Database));
	let mut editor = TopologyEditor::new(store, config());

	editor.dispatch(click(1));
	editor.dispatch(click(1));
	assert_eq!(editor.connection_state(), ConnectionState::Idle);
	assert!(editor.store().edges().is_empty());

	editor.dispatch(click(1));
	editor.dispatch(click(2));
	assert_eq!(editor.connection_state(), ConnectionState::Idle);
	let edges = editor.store().edges();
	assert_eq!(edges.len(), 1);
	assert!(edges[0].connects(NodeId(1), NodeId(2)));
	assert_eq!((edges[0].from, edges[0].to), (NodeId(1), NodeId(2)));
}

#[test]
fn clicking_the_same_node_twice_cancels() {
	let mut editor = small_graph();
	editor.dispatch(click(1));
	editor.dispatch(click(1));
	assert_eq!(editor.connection_state(), ConnectionState::Idle);
	assert_eq!(editor.store().edges().len(), 2);
}

#[test]
fn two_distinct_clicks_create_exactly_one_edge() {
	let mut editor = small_graph();
	editor.dispatch(click(1));
	let effects = editor.dispatch(click(3));
	assert!(effects.contains(&Effect::Connect {
		from: NodeId(1),
		to: NodeId(3)
	}));
	let matching: Vec<_> = editor
		.store()
		.edges()
		.iter()
		.filter(|e| e.connects(NodeId(1), NodeId(3)))
		.collect();
	assert_eq!(matching.len(), 1);
	assert_eq!(matching[0].label, "connection");
}

#[test]
fn empty_click_cancels_pending_connection() {
	let mut editor = small_graph();
	editor.dispatch(click(2));
	editor.dispatch(PointerEvent::Click(None));
	assert_eq!(editor.connection_state(), ConnectionState::Idle);
	assert_eq!(editor.selected(), None);
	editor.dispatch(click(3));
	assert_eq!(
		editor.connection_state(),
		ConnectionState::SourceSelected { source: NodeId(3) }
	);
	assert_eq!(editor.store().edges().len(), 2);
}

#[test]
fn settling_blocks_nothing_and_ends_on_timer() {
	let mut editor = TopologyEditor::new(small_graph().store().clone(), EditorConfig::default());
	editor.dispatch(click(1));
	let effects = editor.dispatch(click(3));
	assert!(effects.contains(&Effect::StartSettling));
	assert_eq!(
		editor.connection_state(),
		ConnectionState::Settling { target: NodeId(3) }
	);
	editor.dispatch(PointerEvent::SettleElapsed);
	assert_eq!(editor.connection_state(), ConnectionState::Idle);
}

#[test]
fn importing_an_empty_object_changes_nothing() {
	let mut editor = small_graph();
	let before = editor.store().clone();
	let err = editor.import("{}").unwrap_err();
	assert!(matches!(err, ImportError::Shape(_)));
	assert_eq!(editor.store(), &before);
}

#[test]
fn export_then_import_is_identity() {
	let mut editor = small_graph();
	editor.dispatch(click(3));
	editor.dispatch(click(1));
	editor.move_node(NodeId(2), 42.5, -7.0);
	let text = editor.export().unwrap();

	let mut other = TopologyEditor::new(GraphStore::new(), config());
	other.import(&text).unwrap();
	assert_eq!(other.store(), editor.store());
	assert_eq!(other.export().unwrap(), text);
}

#[test]
fn import_replaces_rather_than_merges() {
	let mut editor = small_graph();
	editor
		.import(r#"{"nodes": [{"id": 9, "label": "solo", "group": "queue"}], "edges": []}"#)
		.unwrap();
	let nodes = editor.store().nodes();
	assert_eq!(nodes.len(), 1);
	assert_eq!(nodes[0].group, ServiceGroup::Other("queue".to_string()));
	assert!(editor.store().edges().is_empty());
	assert_eq!(editor.add_node_at(0.0, 0.0), NodeId(10));
}

#[test]
fn picking_redis_from_the_catalog() {
	let catalog = ServiceCatalog::builtin();
	let redis = catalog.filter("redis").into_iter().next().unwrap().clone();
	let mut editor = small_graph();
	let id = editor.add_from_catalog(&redis, 5.0, 5.0);
	let node = editor.store().node(id).unwrap();
	assert_eq!(node.group, ServiceGroup::Cache);
	assert!(node.label.ends_with("Redis"));
}

#[test]
fn catalog_web_entries_land_in_the_server_group() {
	let mut editor = small_graph();
	let id = editor.add_from_catalog(&CatalogEntry::new("nginx", "🟩", "Web"), 0.0, 0.0);
	assert_eq!(editor.store().node(id).unwrap().group, ServiceGroup::Server);
}

#[test]
fn deleting_a_node_drops_its_edges_and_selection() {
	let mut editor = small_graph();
	editor.dispatch(PointerEvent::DoubleClick {
		node: Some(NodeId(2)),
		edge: None,
	});
	assert!(editor.editor_open());
	assert!(editor.delete_selected());
	assert!(editor.store().edges().is_empty());
	assert_eq!(editor.selected(), None);
	assert!(!editor.editor_open());
}

#[test]
fn double_click_on_edge_asks_before_deleting() {
	let mut editor = small_graph();
	let effects = editor.dispatch(PointerEvent::DoubleClick {
		node: None,
		edge: Some(1),
	});
	assert_eq!(effects, vec![Effect::ConfirmEdgeDelete(1)]);
	assert!(editor.resolve_edge_delete(1, true));
	assert_eq!(editor.store().edges().len(), 1);
	assert_eq!(editor.store().edges()[0].label, "HTTP");
}
