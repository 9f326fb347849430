//! Zoom-dependent scaling configuration for canvas visuals.
//!
//! Node boxes and their captions live in world space and grow with zoom.
//! Strokes, hit tolerances and selection rings are screen-space so they stay
//! crisp and easy to hit at any zoom level.
//!
//! # Scaling Behaviors
//!
//! - [`ScaleBehavior::World`]: Scales with zoom. Size in world units stays constant.
//! - [`ScaleBehavior::Screen`]: Constant screen size. Divides by `k` to counteract
//!   the canvas transform, maintaining fixed pixel size.
//! - [`ScaleBehavior::Clamped`]: World-space scaling with min/max screen-size bounds.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size.
		min_screen: f64,
		/// Largest on-screen size.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Configuration for node box scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Caption font size in world units.
	pub label_size: f64,
	/// How the caption font scales with zoom.
	pub label_behavior: ScaleBehavior,
	/// Line height as a multiple of the font size.
	pub line_height: f64,
	/// Padding between caption and box edge, world units.
	pub margin: f64,
	/// Average glyph width as a multiple of the font size. Used to size
	/// boxes without a text measuring context, so hit testing and drawing
	/// agree.
	pub glyph_width: f64,
	/// Box outline width in screen pixels.
	pub border_width: f64,
	/// How the outline width scales with zoom.
	pub border_behavior: ScaleBehavior,
}

/// Configuration for edge scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
	/// Label font size in world units.
	pub label_size: f64,
	/// How the label font scales with zoom.
	pub label_behavior: ScaleBehavior,
	/// How close (screen pixels) a pointer must be to count as on the edge.
	pub hit_tolerance: f64,
}

/// Configuration for arrow visual scaling.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow size in world units.
	pub size: f64,
	/// How arrow size scales with zoom.
	pub size_behavior: ScaleBehavior,
}

/// Configuration for selection and connection-source rings.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Stroke width in screen pixels.
	pub width: f64,
	/// Gap between box and ring in screen pixels.
	pub offset: f64,
	/// Dash pattern for the connection-source ring, screen pixels.
	pub dash: (f64, f64),
}

/// Complete scale configuration for all canvas elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node boxes and captions.
	pub node: NodeScaleConfig,
	/// Edge lines and labels.
	pub edge: EdgeScaleConfig,
	/// Arrowheads.
	pub arrow: ArrowScaleConfig,
	/// Selection and connection-source rings.
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				label_size: 12.0,
				label_behavior: ScaleBehavior::World,
				line_height: 1.3,
				margin: 10.0,
				glyph_width: 0.6,
				border_width: 2.0,
				border_behavior: ScaleBehavior::Screen,
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				label_size: 10.0,
				label_behavior: ScaleBehavior::Clamped {
					min_screen: 7.0,
					max_screen: f64::INFINITY,
				},
				hit_tolerance: 6.0,
			},
			arrow: ArrowScaleConfig {
				size: 10.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: 18.0,
				},
			},
			ring: RingScaleConfig {
				width: 2.0,
				offset: 4.0,
				dash: (6.0, 4.0),
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering and hit-testing
/// functions. All sizes are in world-space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Caption font size.
	pub label_size: f64,
	/// Caption font string (e.g., "12px sans-serif").
	pub label_font: String,
	/// Distance between caption lines.
	pub line_height: f64,
	/// Padding inside node boxes.
	pub margin: f64,
	/// Average glyph width as a fraction of the font size.
	pub glyph_width: f64,
	/// Node outline width.
	pub border_width: f64,
	/// Edge stroke width.
	pub edge_line_width: f64,
	/// Edge label font string.
	pub edge_label_font: String,
	/// Pointer distance that still hits an edge.
	pub edge_hit_tolerance: f64,
	/// Arrowhead length.
	pub arrow_size: f64,
	/// Ring stroke width.
	pub ring_width: f64,
	/// Gap between a box and its ring.
	pub ring_offset: f64,
	/// Dash and gap lengths of the source ring.
	pub ring_dash: (f64, f64),
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.node.label_behavior.apply(config.node.label_size, k);
		let edge_label_size = config.edge.label_behavior.apply(config.edge.label_size, k);

		Self {
			k,
			label_size,
			label_font: format!("{}px sans-serif", label_size),
			line_height: label_size * config.node.line_height,
			margin: config.node.margin,
			glyph_width: label_size * config.node.glyph_width,
			border_width: config.node.border_behavior.apply(config.node.border_width, k),
			edge_line_width: config.edge.line_width / k,
			edge_label_font: format!("{}px sans-serif", edge_label_size),
			edge_hit_tolerance: config.edge.hit_tolerance / k,
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			ring_width: config.ring.width / k,
			ring_offset: config.ring.offset / k,
			ring_dash: (config.ring.dash.0 / k, config.ring.dash.1 / k),
		}
	}

	/// Width and height of the box drawn for a caption.
	pub fn node_box(&self, label: &str) -> (f64, f64) {
		let lines: Vec<&str> = label.split('\n').collect();
		let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(1);
		(
			widest as f64 * self.glyph_width + 2.0 * self.margin,
			lines.len() as f64 * self.line_height + 2.0 * self.margin,
		)
	}
}
