//! Canvas view state and pointer hit testing.
//!
//! Holds what the canvas needs between frames but the topology does not:
//! the pan/zoom transform, an in-progress node drag or canvas pan, and the
//! canvas size. Hit testing resolves screen coordinates to a node id or an
//! edge index against the current node and edge slices.

use crate::topology::{Edge, Node, NodeId};

use super::scale::{ScaleConfig, ScaledValues};

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal pan offset in screen pixels.
	pub x: f64,
	/// Vertical pan offset in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Pointer travel (screen pixels) below which a press-release is a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Node being dragged, if any.
	pub node: Option<NodeId>,
	/// Screen x where the press started.
	pub start_x: f64,
	/// Screen y where the press started.
	pub start_y: f64,
	/// Node x when the press started.
	pub node_start_x: f64,
	/// Node y when the press started.
	pub node_start_y: f64,
	/// Current world x of the dragged node.
	pub x: f64,
	/// Current world y of the dragged node.
	pub y: f64,
	/// Set once the pointer travelled past the click threshold; the click
	/// that ends the drag is then swallowed.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// A pan is in progress.
	pub active: bool,
	/// Screen x where the press started.
	pub start_x: f64,
	/// Screen y where the press started.
	pub start_y: f64,
	/// Pan x offset when the press started.
	pub transform_start_x: f64,
	/// Pan y offset when the press started.
	pub transform_start_y: f64,
	/// Pointer travelled past the click threshold.
	pub moved: bool,
}

/// Everything the canvas keeps between frames besides the topology itself.
pub struct CanvasState {
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Node drag in progress.
	pub drag: DragState,
	/// Canvas pan in progress.
	pub pan: PanState,
	/// Node under the pointer, drawn lightened.
	pub hovered: Option<NodeId>,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Zoom-dependent sizes, resolved per frame by [`CanvasState::scaled`].
	pub scale: ScaleConfig,
}

impl CanvasState {
	/// Centers the world origin in a `width` x `height` canvas.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			scale: ScaleConfig::default(),
		}
	}

	/// Sizes for the current zoom level.
	pub fn scaled(&self) -> ScaledValues {
		ScaledValues::new(&self.scale, self.transform.k)
	}

	/// Converts a screen point to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Where `node` is drawn: its stored position, or the drag preview.
	pub fn position_of(&self, node: &Node) -> (f64, f64) {
		if self.drag.node == Some(node.id) {
			(self.drag.x, self.drag.y)
		} else {
			(node.x, node.y)
		}
	}

	/// Topmost node whose box contains the screen point.
	pub fn node_at_position(&self, nodes: &[Node], sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = self.scaled();
		// Later nodes are drawn on top.
		nodes.iter().rev().find_map(|node| {
			let (x, y) = self.position_of(node);
			let (w, h) = scale.node_box(&node.label);
			((gx - x).abs() <= w / 2.0 && (gy - y).abs() <= h / 2.0).then_some(node.id)
		})
	}

	/// Index of the edge closest to the screen point, within the hit
	/// tolerance. Edges with a missing endpoint are never hit.
	pub fn edge_at_position(&self, nodes: &[Node], edges: &[Edge], sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let tolerance = self.scaled().edge_hit_tolerance;
		let mut best: Option<(usize, f64)> = None;
		for (index, edge) in edges.iter().enumerate() {
			let (Some(from), Some(to)) = (
				nodes.iter().find(|n| n.id == edge.from),
				nodes.iter().find(|n| n.id == edge.to),
			) else {
				continue;
			};
			let d = distance_to_segment((gx, gy), self.position_of(from), self.position_of(to));
			if d <= tolerance && best.is_none_or(|(_, bd)| d < bd) {
				best = Some((index, d));
			}
		}
		best.map(|(index, _)| index)
	}

	/// Starts a node drag or a canvas pan at a screen point.
	pub fn press(&mut self, nodes: &[Node], sx: f64, sy: f64) {
		match self.node_at_position(nodes, sx, sy) {
			Some(id) => {
				let (x, y) = nodes
					.iter()
					.find(|n| n.id == id)
					.map(|n| (n.x, n.y))
					.unwrap_or_default();
				self.drag = DragState {
					node: Some(id),
					start_x: sx,
					start_y: sy,
					node_start_x: x,
					node_start_y: y,
					x,
					y,
					moved: false,
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
					moved: false,
				};
			}
		}
	}

	/// Follows the pointer while a drag or pan is in progress.
	pub fn pointer_moved(&mut self, sx: f64, sy: f64) {
		if self.drag.node.is_some() {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if dx.hypot(dy) > DRAG_THRESHOLD {
				self.drag.moved = true;
			}
			self.drag.x = self.drag.node_start_x + dx / self.transform.k;
			self.drag.y = self.drag.node_start_y + dy / self.transform.k;
		} else if self.pan.active {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			if dx.hypot(dy) > DRAG_THRESHOLD {
				self.pan.moved = true;
			}
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		}
	}

	/// Ends a drag or pan. Returns the dragged node's final position when it
	/// actually moved, for the caller to commit to the store.
	pub fn release(&mut self) -> Option<(NodeId, f64, f64)> {
		self.pan.active = false;
		match self.drag.node.take() {
			Some(id) if self.drag.moved => Some((id, self.drag.x, self.drag.y)),
			_ => None,
		}
	}

	/// True once after a press that turned into a drag or pan, so the click
	/// event the browser fires on release can be ignored.
	pub fn take_suppressed_click(&mut self) -> bool {
		let suppressed = self.drag.moved || self.pan.moved;
		self.drag.moved = false;
		self.pan.moved = false;
		suppressed
	}

	/// Abandons any drag or pan without committing it.
	pub fn cancel(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hovered = None;
	}

	/// Zooms by `factor` keeping the screen point under the cursor fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Records a new canvas size after the element was resized.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len2 = abx * abx + aby * aby;
	let t = if len2 < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * abx, a.1 + t * aby);
	(p.0 - cx).hypot(p.1 - cy)
}
