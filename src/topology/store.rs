//! Canonical owner of the topology's nodes and edges.
//!
//! All mutation goes through [`GraphStore`]. Forgiving operations (unknown
//! ids, duplicate connections, stale edge indices) are no-ops reported
//! through the return value rather than errors.

use log::debug;

use super::types::{Edge, Node, NodeId, NodeSpec, Snapshot, TopologyDocument};

/// Ordered node and edge collections with the topology invariants applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl GraphStore {
	/// Empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a store from an already validated document.
	pub fn from_document(document: TopologyDocument) -> Self {
		Self {
			nodes: document.nodes,
			edges: document.edges,
		}
	}

	/// Next id: one past the current maximum, `1` for an empty graph.
	fn next_id(&self) -> NodeId {
		match self.nodes.iter().map(|n| n.id.0).max() {
			None => NodeId(1),
			Some(max) => match max.checked_add(1) {
				Some(next) => NodeId(next),
				None => (1..)
					.map(NodeId)
					.find(|id| !self.contains(*id))
					.unwrap_or(NodeId(i64::MIN)),
			},
		}
	}

	/// Appends a node with a fresh id and returns it.
	pub fn add_node(&mut self, spec: NodeSpec) -> &Node {
		let id = self.next_id();
		let (x, y) = spec.position.unwrap_or((0.0, 0.0));
		debug!("topo-map: adding node {}", id);
		self.nodes.push(Node {
			id,
			label: spec.label.unwrap_or_default(),
			group: spec.group.unwrap_or_default(),
			x,
			y,
		});
		&self.nodes[self.nodes.len() - 1]
	}

	/// Replaces the node with the same id in place. Returns `false` when no
	/// such node exists, leaving the store untouched.
	pub fn update_node(&mut self, node: Node) -> bool {
		match self.nodes.iter_mut().find(|n| n.id == node.id) {
			Some(slot) => {
				*slot = node;
				true
			}
			None => {
				debug!("topo-map: update of unknown node {} ignored", node.id);
				false
			}
		}
	}

	/// Position-only update, fed by canvas drags.
	pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> bool {
		match self.nodes.iter_mut().find(|n| n.id == id) {
			Some(node) => {
				node.x = x;
				node.y = y;
				true
			}
			None => false,
		}
	}

	/// Removes a node and every edge touching it. Idempotent.
	pub fn delete_node(&mut self, id: NodeId) -> bool {
		let before = self.nodes.len();
		self.nodes.retain(|n| n.id != id);
		self.edges.retain(|e| !e.touches(id));
		let removed = self.nodes.len() != before;
		if removed {
			debug!("topo-map: deleted node {}", id);
		}
		removed
	}

	/// Connects `from` to `to` unless the pair is already connected in
	/// either direction, in which case nothing changes and `None` is
	/// returned.
	pub fn add_edge(&mut self, from: NodeId, to: NodeId, label: impl Into<String>) -> Option<&Edge> {
		if self.edges.iter().any(|e| e.connects(from, to)) {
			debug!("topo-map: {} and {} already connected", from, to);
			return None;
		}
		self.edges.push(Edge {
			from,
			to,
			label: label.into(),
		});
		self.edges.last()
	}

	/// Removes the edge at `index` in the current ordering.
	pub fn delete_edge_at(&mut self, index: usize) -> Option<Edge> {
		if index < self.edges.len() {
			Some(self.edges.remove(index))
		} else {
			debug!("topo-map: edge index {} out of range", index);
			None
		}
	}

	/// Relabels the edge at `index`. Out of range is a no-op returning `false`.
	pub fn rename_edge(&mut self, index: usize, label: impl Into<String>) -> bool {
		match self.edges.get_mut(index) {
			Some(edge) => {
				edge.label = label.into();
				true
			}
			None => false,
		}
	}

	/// Borrowed view of both collections, in order.
	pub fn snapshot(&self) -> Snapshot<'_> {
		Snapshot {
			nodes: &self.nodes,
			edges: &self.edges,
		}
	}

	/// Swaps in a whole new topology. Only import calls this, after
	/// validation has passed.
	pub(crate) fn replace(&mut self, document: TopologyDocument) {
		self.nodes = document.nodes;
		self.edges = document.edges;
	}

	/// Node with the given id.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: NodeId) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in insertion order. Indices are what the edge operations take.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Edges with `id` at either end, paired with their current index.
	pub fn edges_touching(&self, id: NodeId) -> impl Iterator<Item = (usize, &Edge)> {
		self.edges.iter().enumerate().filter(move |(_, e)| e.touches(id))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;
	use crate::topology::types::ServiceGroup;

	fn store_with(count: usize) -> GraphStore {
		let mut store = GraphStore::new();
		for i in 0..count {
			store.add_node(NodeSpec::labeled(format!("svc {i}"), ServiceGroup::App));
		}
		store
	}

	#[test]
	fn first_node_gets_id_one() {
		let mut store = GraphStore::new();
		assert_eq!(store.add_node(NodeSpec::default()).id, NodeId(1));
	}

	#[test]
	fn ids_follow_the_current_maximum() {
		let mut store = store_with(3);
		store.delete_node(NodeId(2));
		assert_eq!(store.add_node(NodeSpec::default()).id, NodeId(4));
		store.delete_node(NodeId(4));
		store.delete_node(NodeId(3));
		assert_eq!(store.add_node(NodeSpec::default()).id, NodeId(2));
	}

	#[test]
	fn overflowing_maximum_falls_back_to_smallest_free_id() {
		let mut store = GraphStore::from_document(TopologyDocument {
			nodes: vec![Node {
				id: NodeId(i64::MAX),
				label: String::new(),
				group: ServiceGroup::App,
				x: 0.0,
				y: 0.0,
			}],
			edges: vec![],
		});
		assert_eq!(store.add_node(NodeSpec::default()).id, NodeId(1));
	}

	#[test]
	fn add_node_applies_spec() {
		let mut store = GraphStore::new();
		let node = store
			.add_node(NodeSpec::labeled("Cache\n(Redis)", ServiceGroup::Cache).at(-200.0, 200.0))
			.clone();
		assert_eq!(node.label, "Cache\n(Redis)");
		assert_eq!(node.group, ServiceGroup::Cache);
		assert_eq!((node.x, node.y), (-200.0, 200.0));
	}

	#[test]
	fn update_preserves_order() {
		let mut store = store_with(3);
		let mut middle = store.node(NodeId(2)).unwrap().clone();
		middle.label = "renamed".to_string();
		middle.group = ServiceGroup::Database;
		assert!(store.update_node(middle));
		let labels: Vec<_> = store.nodes().iter().map(|n| n.label.as_str()).collect();
		assert_eq!(labels, vec!["svc 0", "renamed", "svc 2"]);
	}

	#[test]
	fn update_of_unknown_id_is_a_noop() {
		let mut store = store_with(2);
		let before = store.clone();
		let ghost = Node {
			id: NodeId(99),
			label: "ghost".to_string(),
			group: ServiceGroup::App,
			x: 0.0,
			y: 0.0,
		};
		assert!(!store.update_node(ghost));
		assert_eq!(store, before);
	}

	#[test]
	fn delete_cascades_to_edges() {
		let mut store = store_with(3);
		store.add_edge(NodeId(1), NodeId(2), "HTTP");
		store.add_edge(NodeId(3), NodeId(1), "SQL");
		store.add_edge(NodeId(2), NodeId(3), "gRPC");
		assert!(store.delete_node(NodeId(1)));
		assert_eq!(store.edges().len(), 1);
		assert!(store.edges().iter().all(|e| !e.touches(NodeId(1))));
		assert!(!store.delete_node(NodeId(1)));
	}

	#[test]
	fn reverse_edge_is_rejected() {
		let mut store = store_with(2);
		assert!(store.add_edge(NodeId(1), NodeId(2), "HTTP").is_some());
		assert!(store.add_edge(NodeId(2), NodeId(1), "HTTP").is_none());
		assert!(store.add_edge(NodeId(1), NodeId(2), "other").is_none());
		assert_eq!(store.edges().len(), 1);
	}

	#[test]
	fn delete_edge_at_is_positional() {
		let mut store = store_with(3);
		store.add_edge(NodeId(1), NodeId(2), "a");
		store.add_edge(NodeId(2), NodeId(3), "b");
		store.add_edge(NodeId(1), NodeId(3), "c");
		let removed = store.delete_edge_at(1).unwrap();
		assert_eq!(removed.label, "b");
		assert_eq!(store.delete_edge_at(5), None);
		let labels: Vec<_> = store.edges().iter().map(|e| e.label.as_str()).collect();
		assert_eq!(labels, vec!["a", "c"]);
	}

	#[test]
	fn dangling_edges_are_removed_by_id_match() {
		let mut store = GraphStore::from_document(TopologyDocument {
			nodes: vec![],
			edges: vec![Edge {
				from: NodeId(5),
				to: NodeId(6),
				label: String::new(),
			}],
		});
		assert!(!store.delete_node(NodeId(5)));
		assert!(store.edges().is_empty());
	}

	proptest! {
		#[test]
		fn assigned_ids_are_distinct_and_max_plus_one(
			ops in proptest::collection::vec(any::<Option<u8>>(), 1..40)
		) {
			let mut store = GraphStore::new();
			for op in ops {
				match op {
					None => {
						let expected = store.nodes().iter().map(|n| n.id.0).max().unwrap_or(0) + 1;
						let id = store.add_node(NodeSpec::default()).id;
						prop_assert_eq!(id, NodeId(expected));
					}
					Some(victim) => {
						store.delete_node(NodeId(i64::from(victim % 8)));
					}
				}
				let mut ids: Vec<_> = store.nodes().iter().map(|n| n.id).collect();
				ids.sort();
				ids.dedup();
				prop_assert_eq!(ids.len(), store.nodes().len());
			}
		}

		#[test]
		fn no_edge_survives_its_endpoint(
			pairs in proptest::collection::vec((1i64..6, 1i64..6), 0..20),
			victim in 1i64..6,
		) {
			let mut store = store_with(5);
			for (a, b) in pairs {
				store.add_edge(NodeId(a), NodeId(b), "");
			}
			store.delete_node(NodeId(victim));
			prop_assert!(store.edges().iter().all(|e| !e.touches(NodeId(victim))));
		}
	}
}
