//! Starter topology shown when the page embeds no document.

use super::types::{Edge, Node, NodeId, ServiceGroup, TopologyDocument};

fn node(id: i64, label: &str, group: ServiceGroup, x: f64, y: f64) -> Node {
	Node {
		id: NodeId(id),
		label: label.to_string(),
		group,
		x,
		y,
	}
}

fn edge(from: i64, to: i64, label: &str) -> Edge {
	Edge {
		from: NodeId(from),
		to: NodeId(to),
		label: label.to_string(),
	}
}

/// A classic three-tier web stack.
pub fn web_stack() -> TopologyDocument {
	TopologyDocument {
		nodes: vec![
			node(1, "Load Balancer\n(HAProxy)", ServiceGroup::Network, 0.0, -200.0),
			node(2, "Web Server\n(nginx)", ServiceGroup::Server, -150.0, 0.0),
			node(3, "App Server\n(Node.js)", ServiceGroup::App, 150.0, 0.0),
			node(4, "Database\n(PostgreSQL)", ServiceGroup::Database, 0.0, 200.0),
			node(5, "Cache\n(Redis)", ServiceGroup::Cache, -200.0, 200.0),
			node(6, "Storage\n(S3)", ServiceGroup::Storage, 200.0, 200.0),
		],
		edges: vec![
			edge(1, 2, "HTTP"),
			edge(1, 3, "HTTP"),
			edge(2, 3, "Proxy"),
			edge(3, 4, "SQL"),
			edge(3, 5, "Cache"),
			edge(3, 6, "Files"),
		],
	}
}
