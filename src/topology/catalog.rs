//! Static catalog of well-known services used to prefill nodes.

use std::collections::HashMap;

use serde::Deserialize;

use super::types::ServiceGroup;

/// One catalog row.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
	/// Product name, e.g. `Redis`.
	pub name: String,
	/// Emoji shown before the name.
	pub logo: String,
	/// Catalog category, mapped to a group by [`GroupMapping`].
	pub category: String,
}

impl CatalogEntry {
	/// Builds an entry from string literals.
	pub fn new(name: &str, logo: &str, category: &str) -> Self {
		Self {
			name: name.to_string(),
			logo: logo.to_string(),
			category: category.to_string(),
		}
	}

	/// Node label for this entry, e.g. `"🔴 Redis"`.
	pub fn label(&self) -> String {
		format!("{} {}", self.logo, self.name)
	}
}

/// Maps catalog categories to node groups.
///
/// Categories are lowercased and used as the group tag, except where an
/// override says otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupMapping {
	/// Lowercased category -> group tag.
	pub overrides: HashMap<String, String>,
}

impl Default for GroupMapping {
	fn default() -> Self {
		// "Web" predates the server group and never matched its own tag.
		let overrides = [("web", "server")]
			.into_iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Self { overrides }
	}
}

impl GroupMapping {
	/// Group for a catalog category.
	pub fn group_for(&self, category: &str) -> ServiceGroup {
		let folded = category.to_lowercase();
		match self.overrides.get(&folded) {
			Some(tag) => ServiceGroup::from(tag.as_str()),
			None => ServiceGroup::from(folded),
		}
	}
}

/// The catalog list plus its search.
#[derive(Clone, Debug, Default)]
pub struct ServiceCatalog {
	entries: Vec<CatalogEntry>,
}

impl ServiceCatalog {
	/// Catalog over the given entries.
	pub fn new(entries: Vec<CatalogEntry>) -> Self {
		Self { entries }
	}

	/// Services offered out of the box.
	pub fn builtin() -> Self {
		Self::new(vec![
			CatalogEntry::new("nginx", "🟩", "Web"),
			CatalogEntry::new("Apache", "🪶", "Web"),
			CatalogEntry::new("Node.js", "🟢", "App"),
			CatalogEntry::new("Spring Boot", "🍃", "App"),
			CatalogEntry::new("Django", "🐍", "App"),
			CatalogEntry::new("PostgreSQL", "🐘", "Database"),
			CatalogEntry::new("MySQL", "🐬", "Database"),
			CatalogEntry::new("MongoDB", "🍀", "Database"),
			CatalogEntry::new("Redis", "🔴", "Cache"),
			CatalogEntry::new("Memcached", "🧊", "Cache"),
			CatalogEntry::new("HAProxy", "⚖️", "Network"),
			CatalogEntry::new("Cloudflare", "☁️", "Network"),
			CatalogEntry::new("Amazon S3", "🪣", "Storage"),
			CatalogEntry::new("MinIO", "🦩", "Storage"),
			CatalogEntry::new("Kong", "🦍", "API"),
			CatalogEntry::new("GraphQL Gateway", "🔷", "API"),
			CatalogEntry::new("Docker", "🐳", "DevOps"),
			CatalogEntry::new("Kubernetes", "☸️", "DevOps"),
			CatalogEntry::new("Jenkins", "🤵", "DevOps"),
		])
	}

	/// All entries in catalog order.
	pub fn entries(&self) -> &[CatalogEntry] {
		&self.entries
	}

	/// Case-insensitive substring match on name or category. An empty or
	/// blank query matches everything.
	pub fn filter(&self, query: &str) -> Vec<&CatalogEntry> {
		let needle = query.trim().to_lowercase();
		self.entries
			.iter()
			.filter(|e| {
				needle.is_empty()
					|| e.name.to_lowercase().contains(&needle)
					|| e.category.to_lowercase().contains(&needle)
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn label_prefixes_logo() {
		let entry = CatalogEntry::new("Redis", "🔴", "cache");
		assert_eq!(entry.label(), "🔴 Redis");
	}

	#[test]
	fn category_is_case_folded() {
		let mapping = GroupMapping::default();
		assert_eq!(mapping.group_for("Cache"), ServiceGroup::Cache);
		assert_eq!(mapping.group_for("DevOps"), ServiceGroup::Devops);
		assert_eq!(mapping.group_for("API"), ServiceGroup::Api);
	}

	#[test]
	fn legacy_web_category_maps_to_server() {
		assert_eq!(GroupMapping::default().group_for("Web"), ServiceGroup::Server);
	}

	#[test]
	fn overrides_are_configurable() {
		let mut mapping = GroupMapping::default();
		mapping
			.overrides
			.insert("queue".to_string(), "app".to_string());
		assert_eq!(mapping.group_for("Queue"), ServiceGroup::App);
		assert_eq!(
			mapping.group_for("Mainframe"),
			ServiceGroup::Other("mainframe".to_string())
		);
	}

	#[test]
	fn filter_matches_name_and_category() {
		let catalog = ServiceCatalog::builtin();
		let names: Vec<_> = catalog.filter("redis").iter().map(|e| e.name.as_str()).collect();
		assert_eq!(names, vec!["Redis"]);
		assert_eq!(catalog.filter("database").len(), 3);
		assert_eq!(catalog.filter("  ").len(), catalog.entries().len());
		assert!(catalog.filter("no such thing").is_empty());
	}
}
