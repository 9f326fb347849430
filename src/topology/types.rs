//! Graph data structures shared by the store, the serializer and the canvas.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer node identifier, unique within a topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<i64> for NodeId {
	fn from(value: i64) -> Self {
		Self(value)
	}
}

/// Presentation category of a node.
///
/// The set is open-ended: tags outside the known list are kept verbatim in
/// [`ServiceGroup::Other`] so they survive an export/import cycle, and are
/// drawn with the theme's fallback color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceGroup {
	/// Web servers and reverse proxies.
	Server,
	/// Application servers.
	#[default]
	App,
	/// Databases.
	Database,
	/// Load balancers, CDNs and other network gear.
	Network,
	/// Caches.
	Cache,
	/// Object and file storage.
	Storage,
	/// API gateways.
	Api,
	/// CI and container tooling.
	Devops,
	/// Any other tag, kept as written.
	Other(String),
}

impl ServiceGroup {
	/// Groups offered in the node editor's type selector.
	pub const KNOWN: [ServiceGroup; 8] = [
		ServiceGroup::Server,
		ServiceGroup::App,
		ServiceGroup::Database,
		ServiceGroup::Network,
		ServiceGroup::Cache,
		ServiceGroup::Storage,
		ServiceGroup::Api,
		ServiceGroup::Devops,
	];

	/// Tag used in files and in the group selector.
	pub fn as_str(&self) -> &str {
		match self {
			ServiceGroup::Server => "server",
			ServiceGroup::App => "app",
			ServiceGroup::Database => "database",
			ServiceGroup::Network => "network",
			ServiceGroup::Cache => "cache",
			ServiceGroup::Storage => "storage",
			ServiceGroup::Api => "api",
			ServiceGroup::Devops => "devops",
			ServiceGroup::Other(tag) => tag,
		}
	}

	/// Human-readable caption for the type selector.
	pub fn caption(&self) -> &str {
		match self {
			ServiceGroup::Server => "🖥️ Web Server",
			ServiceGroup::App => "⚙️ App Server",
			ServiceGroup::Database => "🗄️ Database",
			ServiceGroup::Network => "🌐 Network",
			ServiceGroup::Cache => "⚡ Cache",
			ServiceGroup::Storage => "💾 Storage",
			ServiceGroup::Api => "🔌 API Gateway",
			ServiceGroup::Devops => "🛠️ DevOps",
			ServiceGroup::Other(tag) => tag,
		}
	}
}

impl From<&str> for ServiceGroup {
	fn from(value: &str) -> Self {
		match value {
			"server" => ServiceGroup::Server,
			"app" => ServiceGroup::App,
			"database" => ServiceGroup::Database,
			"network" => ServiceGroup::Network,
			"cache" => ServiceGroup::Cache,
			"storage" => ServiceGroup::Storage,
			"api" => ServiceGroup::Api,
			"devops" => ServiceGroup::Devops,
			other => ServiceGroup::Other(other.to_string()),
		}
	}
}

impl From<String> for ServiceGroup {
	fn from(value: String) -> Self {
		Self::from(value.as_str())
	}
}

impl From<ServiceGroup> for String {
	fn from(value: ServiceGroup) -> Self {
		match value {
			ServiceGroup::Other(tag) => tag,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for ServiceGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A service in the topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Unique within a topology.
	pub id: NodeId,
	/// Display caption. A `\n` splits it over several lines.
	#[serde(default)]
	pub label: String,
	/// Decides the node's colors.
	#[serde(default)]
	pub group: ServiceGroup,
	/// Position hints, owned by the renderer and only passed through here.
	#[serde(default)]
	pub x: f64,
	/// Vertical position hint.
	#[serde(default)]
	pub y: f64,
}

impl Node {
	/// Label flattened onto one line, as shown in the toolbar.
	pub fn caption(&self) -> String {
		self.label.replace('\n', " ")
	}
}

/// A labeled flow from one service to another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Source node.
	pub from: NodeId,
	/// Target node.
	pub to: NodeId,
	/// Shown at the middle of the edge.
	#[serde(default)]
	pub label: String,
}

impl Edge {
	/// True when this edge joins `a` and `b` in either direction.
	pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
		(self.from == a && self.to == b) || (self.from == b && self.to == a)
	}

	/// True if `id` is either end.
	pub fn touches(&self, id: NodeId) -> bool {
		self.from == id || self.to == id
	}
}

/// Attributes for a node that does not exist yet; the store assigns the id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeSpec {
	/// Caption, empty when `None`.
	pub label: Option<String>,
	/// Group, [`ServiceGroup::App`] when `None`.
	pub group: Option<ServiceGroup>,
	/// Position, the origin when `None`.
	pub position: Option<(f64, f64)>,
}

impl NodeSpec {
	/// Spec with a label and a group and no position.
	pub fn labeled(label: impl Into<String>, group: ServiceGroup) -> Self {
		Self {
			label: Some(label.into()),
			group: Some(group),
			position: None,
		}
	}

	/// Places the node at `(x, y)`.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.position = Some((x, y));
		self
	}
}

/// Read-only view of the ordered collections, for rendering and export.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Snapshot<'a> {
	/// Nodes in store order.
	pub nodes: &'a [Node],
	/// Edges in store order.
	pub edges: &'a [Edge],
}

impl Snapshot<'_> {
	/// Owned copy, for tests and file round trips.
	pub fn to_document(&self) -> TopologyDocument {
		TopologyDocument {
			nodes: self.nodes.to_vec(),
			edges: self.edges.to_vec(),
		}
	}
}

/// Owned topology, as read from a file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyDocument {
	/// Nodes in file order.
	pub nodes: Vec<Node>,
	/// Edges in file order.
	pub edges: Vec<Edge>,
}
