//! Side panel for editing the selected node and its connections.

use leptos::prelude::*;

use crate::topology::{NodeId, ServiceGroup, TopologyEditor};

/// Groups offered in the select: the known set plus the node's own group
/// when a file brought in one we don't know.
fn group_choices(current: &ServiceGroup) -> Vec<ServiceGroup> {
	let mut choices = ServiceGroup::KNOWN.to_vec();
	if !choices.contains(current) {
		choices.push(current.clone());
	}
	choices
}

/// What the draft is loaded from: the selected node and the fields the
/// panel edits. Moving the node or editing its connections leaves it as is.
fn draft_source(editor: &TopologyEditor) -> Option<(NodeId, String, ServiceGroup)> {
	editor
		.selected_node()
		.map(|n| (n.id, n.label.clone(), n.group.clone()))
}

/// Edit panel for the selected node, shown while the editor is open.
///
/// Label and group are edited as a draft and only written back on save.
/// Each connection's label is written back as soon as its input changes.
#[component]
pub fn NodeEditor(editor: RwSignal<TopologyEditor>) -> impl IntoView {
	let draft_label = RwSignal::new(String::new());
	let draft_group = RwSignal::new(ServiceGroup::default());
	let source = Memo::new(move |_| editor.with(draft_source));

	// Reload the draft when another node is selected, or when a catalog pick
	// rewrote this one.
	Effect::new(move |_| {
		if let Some((_, label, group)) = source.get() {
			draft_label.set(label);
			draft_group.set(group);
		}
	});

	let save = move |_| {
		editor.update(|e| {
			let Some(mut node) = e.selected_node().cloned() else {
				return;
			};
			node.label = draft_label.get_untracked();
			node.group = draft_group.get_untracked();
			e.save_node(node);
		});
	};

	let connections = move || {
		editor.with(|e| {
			let Some(id) = e.selected() else {
				return Vec::new();
			};
			let store = e.store();
			store
				.edges_touching(id)
				.map(|(index, edge)| {
					let other = if edge.from == id { edge.to } else { edge.from };
					let name = store
						.node(other)
						.map(|n| n.caption())
						.unwrap_or_else(|| other.to_string());
					let arrow = if edge.from == id { "→" } else { "←" };
					(index, format!("{arrow} {name}"), edge.label.clone())
				})
				.collect::<Vec<_>>()
		})
	};

	let node_id = move || {
		source.with(|s| s.as_ref().map(|(id, ..)| id.to_string()).unwrap_or_default())
	};

	view! {
		<Show when=move || editor.with(|e| e.editor_open())>
			<div class="node-editor">
				<h3>"Edit Service"</h3>
				<p class="node-id">"ID: " {node_id}</p>

				<label for="node-label">"Label"</label>
				<textarea
					id="node-label"
					rows="3"
					prop:value=move || draft_label.get()
					on:input=move |ev| draft_label.set(event_target_value(&ev))
				/>

				<label for="node-group">"Group"</label>
				<select
					id="node-group"
					on:change=move |ev| draft_group.set(ServiceGroup::from(event_target_value(&ev)))
				>
					{move || {
						let current = draft_group.get();
						group_choices(&current)
							.into_iter()
							.map(|group| {
								let selected = group == current;
								view! {
									<option value=group.as_str().to_string() selected=selected>
										{group.caption().to_string()}
									</option>
								}
							})
							.collect_view()
					}}
				</select>

				<div class="node-editor-actions">
					<button class="topology-btn save" on:click=save>
						"💾 Save"
					</button>
					<button
						class="topology-btn delete"
						on:click=move |_| {
							editor.update(|e| {
								e.delete_selected();
							})
						}
					>
						"🗑️ Delete"
					</button>
					<button class="topology-btn close" on:click=move |_| editor.update(|e| e.close_editor())>
						"✖ Close"
					</button>
				</div>

				<h4>"Connections"</h4>
				<ul class="node-connections">
					<For
						each=connections
						key=|(index, peer, label)| (*index, peer.clone(), label.clone())
						children=move |(index, peer, label)| {
							view! {
								<li>
									<span class="peer">{peer}</span>
									<input
										type="text"
										value=label
										on:change=move |ev| {
											let text = event_target_value(&ev);
											editor.update(|e| {
												e.rename_edge(index, text);
											});
										}
									/>
								</li>
							}
						}
					/>
				</ul>
			</div>
		</Show>
	}
}
