//! Toolbar: add, export, import, edit toggle and the selection caption.

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlInputElement;

use crate::topology::TopologyEditor;

use super::files;

/// Random point in the square spanned by `extent` around the origin.
pub fn spawn_point(extent: f64) -> (f64, f64) {
	(
		js_sys::Math::random() * 2.0 * extent - extent,
		js_sys::Math::random() * 2.0 * extent - extent,
	)
}

fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

/// Toolbar above the canvas.
#[component]
pub fn Toolbar(editor: RwSignal<TopologyEditor>) -> impl IntoView {
	let add_node = move |_| {
		let extent = editor.with_untracked(|e| e.config().spawn_extent);
		let (x, y) = spawn_point(extent);
		editor.update(|e| {
			e.add_node_at(x, y);
		});
	};

	let export = move |_| {
		let text = match editor.with_untracked(|e| e.export()) {
			Ok(text) => text,
			Err(e) => {
				warn!("topo-map: export failed: {}", e);
				return;
			}
		};
		if let Err(e) = files::download_json("topology.json", &text) {
			warn!("topo-map: download failed: {:?}", e);
		}
	};

	let import = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|list| list.get(0)) else {
			return;
		};
		// Clear so picking the same file again still fires `change`.
		input.set_value("");
		let started = files::read_text(&file, move |text| {
			let outcome = editor.try_update(|e| e.import(&text));
			if let Some(Err(err)) = outcome {
				alert(err.public_message());
			}
		});
		if let Err(e) = started {
			warn!("topo-map: could not read {}: {:?}", file.name(), e);
		}
	};

	let has_selection = move || editor.with(|e| e.selected_node().is_some());
	let editor_open = move || editor.with(|e| e.editor_open());
	let caption = move || {
		editor.with(|e| e.selected_node().map(|n| n.caption()).unwrap_or_default())
	};

	view! {
		<div class="topology-toolbar">
			<h2 class="topology-title">"🗺️ Infrastructure Topology"</h2>
			<button class="topology-btn add" on:click=add_node>
				"+ Add Service"
			</button>
			<button class="topology-btn export" on:click=export>
				"📥 Export"
			</button>
			<label class="topology-btn import">
				"📤 Import"
				<input type="file" accept=".json" on:change=import style="display: none" />
			</label>
			<Show when=has_selection>
				<button
					class=move || if editor_open() { "topology-btn edit active" } else { "topology-btn edit" }
					on:click=move |_| editor.update(|e| e.toggle_editor())
				>
					{move || if editor_open() { "📋 Show Map" } else { "✏️ Edit" }}
				</button>
				<div class="selected-node-info">"Selected: " {caption}</div>
			</Show>
		</div>
	}
}
