//! Editing session: one store, one controller, and the panel state around
//! them.
//!
//! The canvas and the panels never touch [`GraphStore`] directly; they call
//! into [`TopologyEditor`], which applies controller effects and keeps the
//! selection consistent with the graph (a deleted or replaced node is never
//! left selected, and a deleted node is never left as a pending connection
//! source).

use log::{debug, info};

use super::catalog::CatalogEntry;
use super::config::EditorConfig;
use super::controller::{ConnectionState, Effect, InteractionController, PointerEvent};
use super::error::ImportError;
use super::serializer;
use super::store::GraphStore;
use super::types::{Node, NodeId, NodeSpec, TopologyDocument};

/// Per-frame hints for the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayOptions {
	/// Node drawn with the selection ring.
	pub selected: Option<NodeId>,
	/// Node waiting for the second click of a connection.
	pub connection_source: Option<NodeId>,
}

/// One editing session over a topology.
#[derive(Clone, Debug)]
pub struct TopologyEditor {
	store: GraphStore,
	controller: InteractionController,
	config: EditorConfig,
	selected: Option<NodeId>,
	editor_open: bool,
}

impl Default for TopologyEditor {
	fn default() -> Self {
		Self::new(GraphStore::new(), EditorConfig::default())
	}
}

impl TopologyEditor {
	/// Starts a session on `store`, idle and with nothing selected.
	pub fn new(store: GraphStore, config: EditorConfig) -> Self {
		Self {
			controller: InteractionController::new(config.settling_enabled()),
			store,
			config,
			selected: None,
			editor_open: false,
		}
	}

	/// Starts a session on a parsed document.
	pub fn with_document(document: TopologyDocument, config: EditorConfig) -> Self {
		Self::new(GraphStore::from_document(document), config)
	}

	/// Read access to the graph.
	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	/// Settings the session was created with.
	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/// Where the two-click connection gesture stands.
	pub fn connection_state(&self) -> ConnectionState {
		self.controller.state()
	}

	/// Id of the selected node.
	pub fn selected(&self) -> Option<NodeId> {
		self.selected
	}

	/// The selected node, if it still exists.
	pub fn selected_node(&self) -> Option<&Node> {
		self.selected.and_then(|id| self.store.node(id))
	}

	/// True when the edit panel should be shown: it is open and there is a
	/// selected node to edit.
	pub fn editor_open(&self) -> bool {
		self.editor_open && self.selected_node().is_some()
	}

	/// Selection state for the renderer.
	pub fn display(&self) -> DisplayOptions {
		DisplayOptions {
			selected: self.selected,
			connection_source: self.controller.state().source(),
		}
	}

	/// Feeds one pointer event through the controller and applies the
	/// effects that concern the graph or the panels.
	///
	/// All effects are returned; the host must act on
	/// [`Effect::ConfirmEdgeDelete`] (ask, then call
	/// [`resolve_edge_delete`](Self::resolve_edge_delete)) and
	/// [`Effect::StartSettling`] (schedule [`PointerEvent::SettleElapsed`]).
	pub fn dispatch(&mut self, event: PointerEvent) -> Vec<Effect> {
		let effects = self.controller.handle(event);
		for effect in &effects {
			match *effect {
				Effect::Select(id) => self.select(id),
				Effect::Connect { from, to } => {
					let label = self.config.default_edge_label.clone();
					if self.store.add_edge(from, to, label).is_some() {
						info!("topo-map: connected {} -> {}", from, to);
					}
				}
				Effect::OpenEditor(id) => {
					self.select(Some(id));
					self.editor_open = true;
				}
				Effect::ConfirmEdgeDelete(_) | Effect::StartSettling => {}
			}
		}
		effects
	}

	/// Completes an edge deletion after the user answered the prompt.
	pub fn resolve_edge_delete(&mut self, index: usize, confirmed: bool) -> bool {
		if !confirmed {
			return false;
		}
		match self.store.delete_edge_at(index) {
			Some(edge) => {
				info!("topo-map: deleted edge {} -> {}", edge.from, edge.to);
				true
			}
			None => false,
		}
	}

	fn select(&mut self, id: Option<NodeId>) {
		self.selected = id;
		if id.is_none() {
			self.editor_open = false;
		}
	}

	/// Toolbar "add service": a node named after its id, at `(x, y)`.
	pub fn add_node_at(&mut self, x: f64, y: f64) -> NodeId {
		let spec = NodeSpec {
			label: None,
			group: Some(self.config.new_node_group.clone()),
			position: Some((x, y)),
		};
		let mut node = self.store.add_node(spec).clone();
		node.label = format!("{} {}", self.config.new_node_prefix, node.id);
		let id = node.id;
		self.store.update_node(node);
		id
	}

	/// Adds a node prefilled from a catalog entry.
	pub fn add_from_catalog(&mut self, entry: &CatalogEntry, x: f64, y: f64) -> NodeId {
		let group = self.config.group_mapping.group_for(&entry.category);
		let id = self
			.store
			.add_node(NodeSpec::labeled(entry.label(), group).at(x, y))
			.id;
		debug!("topo-map: added {} from catalog as {}", entry.name, id);
		id
	}

	/// Rewrites the selected node's label and group from a catalog entry.
	/// Position is kept.
	pub fn apply_catalog_to_selected(&mut self, entry: &CatalogEntry) -> bool {
		let Some(mut node) = self.selected_node().cloned() else {
			return false;
		};
		node.label = entry.label();
		node.group = self.config.group_mapping.group_for(&entry.category);
		self.store.update_node(node)
	}

	/// Edit panel "save": replace the node, keep it selected, close the panel.
	pub fn save_node(&mut self, node: Node) -> bool {
		let id = node.id;
		let updated = self.store.update_node(node);
		if updated {
			self.selected = Some(id);
		}
		self.editor_open = false;
		updated
	}

	/// Removes a node with its edges and drops any UI state pointing at it.
	pub fn delete_node(&mut self, id: NodeId) -> bool {
		let removed = self.store.delete_node(id);
		self.controller.forget(id);
		if self.selected == Some(id) {
			self.select(None);
		}
		removed
	}

	/// Deletes the selected node, see [`delete_node`](Self::delete_node).
	pub fn delete_selected(&mut self) -> bool {
		match self.selected {
			Some(id) => self.delete_node(id),
			None => false,
		}
	}

	/// Toolbar edit toggle. Does nothing without a selection.
	pub fn toggle_editor(&mut self) {
		if self.selected_node().is_some() {
			self.editor_open = !self.editor_open;
		}
	}

	/// Closes the edit panel, keeping the selection.
	pub fn close_editor(&mut self) {
		self.editor_open = false;
	}

	/// Relabels the edge at `index`.
	pub fn rename_edge(&mut self, index: usize, label: impl Into<String>) -> bool {
		self.store.rename_edge(index, label)
	}

	/// Commits a dragged node's new position.
	pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> bool {
		self.store.move_node(id, x, y)
	}

	/// Pretty-printed JSON of the current graph.
	pub fn export(&self) -> serde_json::Result<String> {
		serializer::export(&self.store)
	}

	/// Replaces the whole graph from a file's text. On failure nothing
	/// changes, including selection and any pending connection.
	pub fn import(&mut self, text: &str) -> Result<(), ImportError> {
		serializer::import(&mut self.store, text)?;
		self.controller.reset();
		self.select(None);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::topology::sample;
	use crate::topology::types::ServiceGroup;

	fn editor() -> TopologyEditor {
		let config = EditorConfig {
			settle_delay_ms: 0,
			..EditorConfig::default()
		};
		TopologyEditor::with_document(sample::web_stack(), config)
	}

	fn click(id: i64) -> PointerEvent {
		PointerEvent::Click(Some(NodeId(id)))
	}

	#[test]
	fn two_clicks_connect_with_default_label() {
		let mut editor = editor();
		editor.dispatch(click(4));
		editor.dispatch(click(6));
		let edge = editor.store().edges().last().unwrap();
		assert_eq!((edge.from, edge.to), (NodeId(4), NodeId(6)));
		assert_eq!(edge.label, "connection");
		assert_eq!(editor.selected(), Some(NodeId(6)));
		assert_eq!(editor.connection_state(), ConnectionState::Idle);
	}

	#[test]
	fn connecting_an_existing_pair_changes_nothing() {
		let mut editor = editor();
		let before = editor.store().edges().to_vec();
		editor.dispatch(click(2));
		editor.dispatch(click(1));
		assert_eq!(editor.store().edges(), before.as_slice());
	}

	#[test]
	fn deleting_the_pending_source_cancels_connection() {
		let mut editor = editor();
		editor.dispatch(click(5));
		assert!(editor.delete_node(NodeId(5)));
		assert_eq!(editor.connection_state(), ConnectionState::Idle);
		assert_eq!(editor.selected(), None);
		editor.dispatch(click(6));
		assert_eq!(
			editor.connection_state(),
			ConnectionState::SourceSelected { source: NodeId(6) }
		);
	}

	#[test]
	fn double_click_opens_editor_and_empty_click_closes_it() {
		let mut editor = editor();
		editor.dispatch(PointerEvent::DoubleClick {
			node: Some(NodeId(3)),
			edge: None,
		});
		assert!(editor.editor_open());
		assert_eq!(editor.selected_node().unwrap().id, NodeId(3));
		editor.dispatch(PointerEvent::Click(None));
		assert!(!editor.editor_open());
	}

	#[test]
	fn edge_delete_needs_confirmation() {
		let mut editor = editor();
		let effects = editor.dispatch(PointerEvent::DoubleClick {
			node: None,
			edge: Some(0),
		});
		assert_eq!(effects, vec![Effect::ConfirmEdgeDelete(0)]);
		assert_eq!(editor.store().edges().len(), 6);
		assert!(!editor.resolve_edge_delete(0, false));
		assert_eq!(editor.store().edges().len(), 6);
		assert!(editor.resolve_edge_delete(0, true));
		assert_eq!(editor.store().edges().len(), 5);
	}

	#[test]
	fn add_node_names_it_after_its_id() {
		let mut editor = editor();
		let id = editor.add_node_at(10.0, -20.0);
		assert_eq!(id, NodeId(7));
		let node = editor.store().node(id).unwrap();
		assert_eq!(node.label, "New Service 7");
		assert_eq!(node.group, ServiceGroup::App);
		assert_eq!((node.x, node.y), (10.0, -20.0));
	}

	#[test]
	fn catalog_pick_creates_prefilled_node() {
		let mut editor = editor();
		let id = editor.add_from_catalog(&CatalogEntry::new("Redis", "🔴", "cache"), 0.0, 0.0);
		let node = editor.store().node(id).unwrap();
		assert_eq!(node.label, "🔴 Redis");
		assert_eq!(node.group, ServiceGroup::Cache);
	}

	#[test]
	fn catalog_pick_rewrites_selected_node() {
		let mut editor = editor();
		editor.dispatch(PointerEvent::DoubleClick {
			node: Some(NodeId(2)),
			edge: None,
		});
		assert!(editor.apply_catalog_to_selected(&CatalogEntry::new("Apache", "🪶", "Web")));
		let node = editor.store().node(NodeId(2)).unwrap();
		assert_eq!(node.label, "🪶 Apache");
		assert_eq!(node.group, ServiceGroup::Server);
		assert_eq!((node.x, node.y), (-150.0, 0.0));
	}

	#[test]
	fn save_closes_panel_and_keeps_selection() {
		let mut editor = editor();
		editor.dispatch(PointerEvent::DoubleClick {
			node: Some(NodeId(1)),
			edge: None,
		});
		let mut node = editor.selected_node().unwrap().clone();
		node.label = "Edge Proxy".to_string();
		assert!(editor.save_node(node));
		assert!(!editor.editor_open());
		assert_eq!(editor.selected_node().unwrap().label, "Edge Proxy");
	}

	#[test]
	fn toggle_requires_selection() {
		let mut editor = editor();
		editor.toggle_editor();
		assert!(!editor.editor_open());
		editor.dispatch(click(1));
		editor.toggle_editor();
		assert!(editor.editor_open());
	}

	#[test]
	fn failed_import_keeps_ui_state() {
		let mut editor = editor();
		editor.dispatch(click(1));
		assert!(editor.import("{}").is_err());
		assert_eq!(editor.selected(), Some(NodeId(1)));
		assert_eq!(editor.connection_state().source(), Some(NodeId(1)));
	}

	#[test]
	fn successful_import_resets_ui_state() {
		let mut editor = editor();
		editor.dispatch(click(1));
		editor.import(r#"{"nodes": [], "edges": []}"#).unwrap();
		assert_eq!(editor.selected(), None);
		assert_eq!(editor.connection_state(), ConnectionState::Idle);
		assert!(editor.store().nodes().is_empty());
	}
}
