//! Editor tunables.
//!
//! Every field has a default; a page may override any subset by embedding a
//! JSON object in `<script id="editor-config">`.

use serde::Deserialize;

use super::catalog::GroupMapping;
use super::types::ServiceGroup;

/// Editor tunables, overridable from page config.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// Label given to edges created by the two-click gesture.
	pub default_edge_label: String,
	/// New nodes from the toolbar are called `"{prefix} {id}"`.
	pub new_node_prefix: String,
	/// Group given to nodes added from the toolbar.
	pub new_node_group: ServiceGroup,
	/// New nodes are dropped at a random point within this distance of the
	/// origin on each axis.
	pub spawn_extent: f64,
	/// Length of the cosmetic pause after a connection, in milliseconds.
	/// Zero disables it.
	pub settle_delay_ms: u32,
	/// Catalog category to node group mapping.
	pub group_mapping: GroupMapping,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			default_edge_label: "connection".to_string(),
			new_node_prefix: "New Service".to_string(),
			new_node_group: ServiceGroup::App,
			spawn_extent: 200.0,
			settle_delay_ms: 300,
			group_mapping: GroupMapping::default(),
		}
	}
}

impl EditorConfig {
	/// Whether connections go through the settling pause.
	pub fn settling_enabled(&self) -> bool {
		self.settle_delay_ms > 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config: EditorConfig =
			serde_json::from_str(r#"{"default_edge_label": "TCP", "settle_delay_ms": 0}"#).unwrap();
		assert_eq!(config.default_edge_label, "TCP");
		assert!(!config.settling_enabled());
		assert_eq!(config.new_node_prefix, "New Service");
		assert_eq!(config.group_mapping, GroupMapping::default());
	}

	#[test]
	fn mapping_override_replaces_table() {
		let config: EditorConfig =
			serde_json::from_str(r#"{"group_mapping": {"overrides": {"ci": "devops"}}}"#).unwrap();
		assert_eq!(config.group_mapping.group_for("CI"), ServiceGroup::Devops);
		assert_eq!(
			config.group_mapping.group_for("web"),
			ServiceGroup::Other("web".to_string())
		);
	}
}
