//! Canvas rendering for the topology.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edge lines and arrowheads, then edge labels (world space)
//! 3. Node boxes in store order, then selection rings on top

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::topology::{DisplayOptions, Edge, Node, Snapshot};

use super::scale::ScaledValues;
use super::state::CanvasState;
use super::theme::{Color, Theme};

/// Renders the complete topology to the canvas.
pub fn render(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	snapshot: Snapshot<'_>,
	display: DisplayOptions,
	theme: &Theme,
) {
	let scale = state.scaled();

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	for edge in snapshot.edges {
		if let Some(ends) = endpoints(state, snapshot.nodes, edge, &scale) {
			draw_edge_line(ctx, &scale, theme, ends);
		}
	}
	for edge in snapshot.edges {
		if let Some(ends) = endpoints(state, snapshot.nodes, edge, &scale) {
			draw_edge_label(ctx, &scale, theme, &edge.label, ends);
		}
	}

	for node in snapshot.nodes {
		draw_node(state, ctx, &scale, theme, node);
	}
	for node in snapshot.nodes {
		if display.connection_source == Some(node.id) {
			draw_ring(state, ctx, &scale, node, theme.selection.source, true);
		} else if display.selected == Some(node.id) {
			draw_ring(state, ctx, &scale, node, theme.selection.selected, false);
		}
	}

	ctx.restore();
}

fn draw_background(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		if let Ok(gradient) = ctx.create_radial_gradient(
			state.width / 2.0,
			state.height / 2.0,
			0.0,
			state.width / 2.0,
			state.height / 2.0,
			(state.width.max(state.height)) * 0.8,
		) {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());

			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Clipped edge geometry: start on the source box border, tip on the
/// target box border.
#[derive(Clone, Copy)]
struct Endpoints {
	start: (f64, f64),
	tip: (f64, f64),
	/// Unit direction from source to target.
	dir: (f64, f64),
}

fn endpoints(state: &CanvasState, nodes: &[Node], edge: &Edge, scale: &ScaledValues) -> Option<Endpoints> {
	let from = nodes.iter().find(|n| n.id == edge.from)?;
	let to = nodes.iter().find(|n| n.id == edge.to)?;
	let (x1, y1) = state.position_of(from);
	let (x2, y2) = state.position_of(to);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}
	let dir = (dx / dist, dy / dist);
	let out = box_exit(scale.node_box(&from.label), dir);
	let inn = box_exit(scale.node_box(&to.label), dir);
	if out + inn >= dist {
		return None;
	}
	Some(Endpoints {
		start: (x1 + dir.0 * out, y1 + dir.1 * out),
		tip: (x2 - dir.0 * inn, y2 - dir.1 * inn),
		dir,
	})
}

/// Distance from a box center to its border along a unit direction.
fn box_exit((w, h): (f64, f64), (ux, uy): (f64, f64)) -> f64 {
	let tx = if ux.abs() > 1e-9 { (w / 2.0) / ux.abs() } else { f64::INFINITY };
	let ty = if uy.abs() > 1e-9 { (h / 2.0) / uy.abs() } else { f64::INFINITY };
	tx.min(ty)
}

fn draw_edge_line(ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme, ends: Endpoints) {
	let color = theme.edge.color.to_css();
	let (ux, uy) = ends.dir;
	let (tip_x, tip_y) = ends.tip;
	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);

	ctx.set_stroke_style_str(&color);
	ctx.set_line_width(scale.edge_line_width);
	ctx.begin_path();
	ctx.move_to(ends.start.0, ends.start.1);
	ctx.line_to(back_x, back_y);
	ctx.stroke();

	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);
	ctx.set_fill_style_str(&color);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_edge_label(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	label: &str,
	ends: Endpoints,
) {
	if label.is_empty() {
		return;
	}
	let (mx, my) = (
		(ends.start.0 + ends.tip.0) / 2.0,
		(ends.start.1 + ends.tip.1) / 2.0,
	);
	ctx.set_font(&scale.edge_label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	if let Ok(metrics) = ctx.measure_text(label) {
		let pad = 2.0 / scale.k;
		let w = metrics.width() + 2.0 * pad;
		let h = scale.label_size;
		ctx.set_fill_style_str(&theme.edge.label_background.to_css());
		ctx.fill_rect(mx - w / 2.0, my - h / 2.0, w, h);
	}

	ctx.set_fill_style_str(&theme.edge.label_color.to_css());
	let _ = ctx.fill_text(label, mx, my);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_node(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node: &Node,
) {
	let (x, y) = state.position_of(node);
	let (w, h) = scale.node_box(&node.label);
	let style = theme.group_style(&node.group);
	let background = if state.hovered == Some(node.id) {
		style.background.lighten(0.15)
	} else {
		style.background
	};

	ctx.save();
	if let Some(shadow) = theme.node.shadow {
		ctx.set_shadow_color(&shadow.to_css());
		ctx.set_shadow_blur(6.0);
		ctx.set_shadow_offset_x(2.0);
		ctx.set_shadow_offset_y(2.0);
	}
	rounded_rect(ctx, x - w / 2.0, y - h / 2.0, w, h, theme.node.corner_radius);
	ctx.set_fill_style_str(&background.to_css());
	ctx.fill();
	ctx.restore();

	rounded_rect(ctx, x - w / 2.0, y - h / 2.0, w, h, theme.node.corner_radius);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(scale.border_width);
	ctx.stroke();

	ctx.set_fill_style_str(&theme.node.text_color.to_css());
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let lines: Vec<&str> = node.label.split('\n').collect();
	let top = y - (lines.len() as f64 - 1.0) * scale.line_height / 2.0;
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x, top + i as f64 * scale.line_height);
	}
}

fn draw_ring(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	node: &Node,
	color: Color,
	dashed: bool,
) {
	let (x, y) = state.position_of(node);
	let (w, h) = scale.node_box(&node.label);
	let o = scale.ring_offset;

	if dashed {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(scale.ring_dash.0),
			&JsValue::from_f64(scale.ring_dash.1),
		));
	}
	rounded_rect(ctx, x - w / 2.0 - o, y - h / 2.0 - o, w + 2.0 * o, h + 2.0 * o, 8.0);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(scale.ring_width);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}
