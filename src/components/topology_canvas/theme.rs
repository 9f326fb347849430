//! Visual theming for the topology canvas.
//!
//! Node colors come from the node's group; anything outside the known groups
//! uses the fallback style.

use crate::topology::ServiceGroup;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Builds a color from a `0xRRGGBB` literal.
	pub const fn hex(rgb: u32) -> Self {
		Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill and outline of a node box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupStyle {
	/// Box fill.
	pub background: Color,
	/// Box outline.
	pub border: Color,
}

impl GroupStyle {
	const fn new(background: u32, border: u32) -> Self {
		Self {
			background: Color::hex(background),
			border: Color::hex(border),
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line and arrowhead color.
	pub color: Color,
	/// Label text color.
	pub label_color: Color,
	/// Fill behind edge labels so they stay legible over the line.
	pub label_background: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Caption color.
	pub text_color: Color,
	/// Box corner radius in world units.
	pub corner_radius: f64,
	/// Drop shadow under node boxes.
	pub shadow: Option<Color>,
	/// Group colors used for tags not in [`ServiceGroup::KNOWN`].
	pub fallback: GroupStyle,
}

/// Colors marking the interaction state.
#[derive(Clone, Debug)]
pub struct SelectionStyle {
	/// Ring around the selected node.
	pub selected: Color,
	/// Dashed ring around a pending connection source.
	pub source: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Edges and their labels.
	pub edge: EdgeStyle,
	/// Node boxes.
	pub node: NodeStyle,
	/// Rings for selection and a pending connection.
	pub selection: SelectionStyle,
}

impl Theme {
	/// Dark theme with material group colors (default)
	pub fn default_theme() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(170, 185, 200, 0.8),
				label_color: Color::rgb(220, 228, 236),
				label_background: Color::rgba(22, 27, 34, 0.85),
			},
			node: NodeStyle {
				text_color: Color::rgb(255, 255, 255),
				corner_radius: 6.0,
				shadow: Some(Color::rgba(0, 0, 0, 0.45)),
				fallback: GroupStyle::new(0x9e9e9e, 0x424242),
			},
			selection: SelectionStyle {
				selected: Color::rgb(255, 214, 0),
				source: Color::rgb(0, 229, 255),
			},
		}
	}

	/// Fill and outline for a node of this group.
	pub fn group_style(&self, group: &ServiceGroup) -> GroupStyle {
		match group {
			ServiceGroup::Server => GroupStyle::new(0x4caf50, 0x2e7d32),
			ServiceGroup::App => GroupStyle::new(0x2196f3, 0x1565c0),
			ServiceGroup::Database => GroupStyle::new(0xff9800, 0xe65100),
			ServiceGroup::Network => GroupStyle::new(0x9c27b0, 0x4a148c),
			ServiceGroup::Cache => GroupStyle::new(0xf44336, 0xb71c1c),
			ServiceGroup::Storage => GroupStyle::new(0x795548, 0x3e2723),
			ServiceGroup::Api => GroupStyle::new(0x607d8b, 0x263238),
			ServiceGroup::Devops => GroupStyle::new(0x009688, 0x004d40),
			ServiceGroup::Other(_) => self.node.fallback,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_round_trips_through_css() {
		assert_eq!(Color::hex(0x4caf50).to_css(), "#4caf50");
		assert_eq!(
			Color::rgba(76, 175, 80, 0.5).to_css(),
			"rgba(76, 175, 80, 0.5)"
		);
	}

	#[test]
	fn unknown_group_uses_fallback() {
		let theme = Theme::default();
		let style = theme.group_style(&ServiceGroup::Other("queue".to_string()));
		assert_eq!(style, theme.node.fallback);
		assert_ne!(theme.group_style(&ServiceGroup::Cache), theme.node.fallback);
	}

	#[test]
	fn lighten_moves_towards_white() {
		let c = Color::rgb(100, 0, 200).lighten(0.5);
		assert_eq!((c.r, c.g, c.b), (177, 127, 227));
	}
}
