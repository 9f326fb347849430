//! Searchable list of well-known services.
//!
//! Picking an entry while the edit panel is open rewrites the selected node;
//! otherwise a new node is placed at a random spot near the origin.

use leptos::prelude::*;

use crate::topology::{CatalogEntry, ServiceCatalog, TopologyEditor};

use super::toolbar::spawn_point;

fn pick(editor: RwSignal<TopologyEditor>, entry: &CatalogEntry) {
	let (open, extent) = editor.with_untracked(|e| (e.editor_open(), e.config().spawn_extent));
	if open {
		editor.update(|e| {
			e.apply_catalog_to_selected(entry);
		});
	} else {
		let (x, y) = spawn_point(extent);
		editor.update(|e| {
			e.add_from_catalog(entry, x, y);
		});
	}
}

/// Catalog search box and results. Defaults to [`ServiceCatalog::builtin`].
#[component]
pub fn CatalogPicker(
	editor: RwSignal<TopologyEditor>,
	#[prop(optional)] catalog: Option<ServiceCatalog>,
) -> impl IntoView {
	let catalog = StoredValue::new(catalog.unwrap_or_else(ServiceCatalog::builtin));
	let query = RwSignal::new(String::new());

	let matches = move || {
		let query = query.get();
		catalog.with_value(|c| c.filter(&query).into_iter().cloned().collect::<Vec<_>>())
	};

	view! {
		<div class="catalog-picker">
			<h3>"📚 Service Catalog"</h3>
			<input
				type="search"
				placeholder="Search services…"
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>
			<ul class="catalog-entries">
				<For
					each=matches
					key=|entry| entry.name.clone()
					children=move |entry| {
						let text = entry.label();
						let category = entry.category.clone();
						view! {
							<li class="catalog-entry" on:click=move |_| pick(editor, &entry)>
								<span class="catalog-name">{text}</span>
								<span class="catalog-category">{category}</span>
							</li>
						}
					}
				/>
			</ul>
		</div>
	}
}
