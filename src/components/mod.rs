//! UI components: the canvas and the panels around it.

pub mod catalog_picker;
mod files;
pub mod node_editor;
pub mod toolbar;
pub mod topology_canvas;
