//! Topology canvas component.
//!
//! Renders the editor's graph on an HTML canvas with:
//! - Nodes as rounded boxes colored by service group, with multi-line captions
//! - Edges as labeled arrows clipped to the box borders
//! - Selection and pending-connection rings
//! - Pan, zoom and node dragging
//!
//! # Example
//!
//! ```ignore
//! use topo_map::{TopologyCanvas, TopologyEditor};
//!
//! let editor = RwSignal::new(TopologyEditor::default());
//! view! { <TopologyCanvas editor=editor fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::{TopologyCanvas, run_host_effects};
pub use theme::Theme;
