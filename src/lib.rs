//! topo-map: interactive infrastructure topology editor.
//!
//! This crate provides a WASM-based editor for service topologies: nodes are
//! services, edges are the connections between them. Nodes are connected by
//! clicking two of them in turn, edited in a side panel, prefilled from a
//! service catalog, and the whole graph is exported to and imported from
//! JSON files.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod topology;

pub use components::catalog_picker::CatalogPicker;
pub use components::node_editor::NodeEditor;
pub use components::toolbar::Toolbar;
pub use components::topology_canvas::TopologyCanvas;
pub use topology::{EditorConfig, TopologyDocument, TopologyEditor};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("topo-map: logging initialized");
}

/// Text content of the script element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Editor tunables from `<script id="editor-config">`, if present.
fn load_config() -> Option<EditorConfig> {
	let text = script_text("editor-config")?;
	parse_logged::<EditorConfig>("editor config", &text)
}

fn parse_logged<T: DeserializeOwned>(what: &str, text: &str) -> Option<T> {
	match serde_json::from_str(text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("topo-map: failed to parse {}: {}", what, e);
			None
		}
	}
}

/// Initial topology from `<script id="topology-data">`.
/// Expected format: the same JSON the editor exports.
fn load_topology() -> Option<TopologyDocument> {
	let text = script_text("topology-data")?;
	match topology::serializer::parse_document(&text) {
		Ok(document) => {
			info!(
				"topo-map: loaded {} nodes, {} edges",
				document.nodes.len(),
				document.edges.len()
			);
			Some(document)
		}
		Err(e) => {
			warn!("topo-map: failed to load topology data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the topology and config from the DOM, falling back to the sample
/// web stack, and lays out the canvas with its panels.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let document = load_topology().unwrap_or_else(topology::sample::web_stack);
	let editor = RwSignal::new(TopologyEditor::with_document(document, config));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Infrastructure Topology" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="topology-app">
			<Toolbar editor=editor />
			<div class="topology-main">
				<div class="topology-stage">
					<TopologyCanvas editor=editor />
				</div>
				<aside class="topology-sidebar">
					<NodeEditor editor=editor />
					<CatalogPicker editor=editor />
				</aside>
			</div>
			<p class="topology-hint">
				"Click two services to connect them. Double-click a service to edit it, a connection to delete it. Drag to move, scroll to zoom."
			</p>
		</div>
	}
}
