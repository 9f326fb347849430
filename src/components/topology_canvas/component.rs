//! Leptos component wrapping the topology canvas.
//!
//! The component creates an HTML canvas element and wires up pointer
//! handlers once, on mount. Clicks and double-clicks are resolved to a node
//! id or edge index and dispatched into the shared [`TopologyEditor`];
//! presses drag nodes or pan the view, and wheel events zoom. An animation
//! loop runs via `requestAnimationFrame` and redraws the editor's current
//! snapshot every frame, so graph changes never require re-subscribing.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use crate::topology::{Effect as EditorEffect, PointerEvent, TopologyEditor};

use super::render;
use super::state::CanvasState;
use super::theme::Theme;

/// Bundles view state with visual configuration.
struct CanvasContext {
	state: CanvasState,
	theme: Theme,
}

/// Acts on the effects the editor leaves to the host: edge deletion
/// prompts and the settling timer.
pub fn run_host_effects(editor: RwSignal<TopologyEditor>, effects: Vec<EditorEffect>) {
	for effect in effects {
		match effect {
			EditorEffect::ConfirmEdgeDelete(index) => {
				let Some(description) = editor.with_untracked(|e| {
					let store = e.store();
					store.edges().get(index).map(|edge| {
						let name = |id| store.node(id).map(|n| n.caption()).unwrap_or_else(|| id.to_string());
						format!("{} → {} ({})", name(edge.from), name(edge.to), edge.label)
					})
				}) else {
					continue;
				};
				let confirmed = web_sys::window()
					.and_then(|w| w.confirm_with_message(&format!("Delete connection {description}?")).ok())
					.unwrap_or(false);
				editor.update(|e| {
					e.resolve_edge_delete(index, confirmed);
				});
			}
			EditorEffect::StartSettling => schedule_settle(editor),
			_ => {}
		}
	}
}

fn schedule_settle(editor: RwSignal<TopologyEditor>) {
	let delay = editor.with_untracked(|e| e.config().settle_delay_ms);
	let Some(window) = web_sys::window() else {
		return;
	};
	let callback = Closure::once_into_js(move || {
		// The component may be gone by the time the timer fires.
		let _ = editor.try_update(|e| e.dispatch(PointerEvent::SettleElapsed));
	});
	if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
		callback.unchecked_ref(),
		delay as i32,
	) {
		warn!("topo-map: could not schedule settle timer: {:?}", e);
	}
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the editor's topology on a canvas and feeds pointer input back.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize automatically with
/// the window.
#[component]
pub fn TopologyCanvas(
	editor: RwSignal<TopologyEditor>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window)
		} else {
			canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or((800.0, 600.0))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("topo-map: canvas has no 2d context");
				return;
			}
		};

		*context_init.borrow_mut() = Some(CanvasContext {
			state: CanvasState::new(w, h),
			theme: Theme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref c) = *context_anim.borrow() {
				let drawn = editor.try_with_untracked(|e| {
					render::render(&c.state, &ctx, e.store().snapshot(), e.display(), &c.theme);
				});
				if drawn.is_none() {
					return;
				}
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			editor.with_untracked(|e| c.state.press(e.store().nodes(), x, y));
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.node.is_none() {
				c.state.hovered =
					editor.with_untracked(|e| c.state.node_at_position(e.store().nodes(), x, y));
			}
			c.state.pointer_moved(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let moved = context_mu.borrow_mut().as_mut().and_then(|c| c.state.release());
		if let Some((id, x, y)) = moved {
			editor.update(|e| {
				e.move_node(id, x, y);
			});
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.cancel();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	let context_cl = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let hit = match *context_cl.borrow_mut() {
			Some(ref mut c) => {
				if c.state.take_suppressed_click() {
					return;
				}
				editor.with_untracked(|e| c.state.node_at_position(e.store().nodes(), x, y))
			}
			None => return,
		};
		if let Some(effects) = editor.try_update(|e| e.dispatch(PointerEvent::Click(hit))) {
			run_host_effects(editor, effects);
		}
	};

	let context_dc = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let event = match *context_dc.borrow() {
			Some(ref c) => editor.with_untracked(|e| {
				let store = e.store();
				let node = c.state.node_at_position(store.nodes(), x, y);
				let edge = match node {
					Some(_) => None,
					None => c.state.edge_at_position(store.nodes(), store.edges(), x, y),
				};
				PointerEvent::DoubleClick { node, edge }
			}),
			None => return,
		};
		if let Some(effects) = editor.try_update(|e| e.dispatch(event)) {
			run_host_effects(editor, effects);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="topology-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:click=on_click
			on:dblclick=on_dblclick
			style="display: block; cursor: grab;"
		/>
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
	let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
	(w, h)
}
