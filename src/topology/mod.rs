//! Topology editing core.
//!
//! Everything in this module is free of DOM access: the graph store, the
//! pointer interaction state machine, JSON import/export, the service
//! catalog and the editor session that ties them together. The canvas
//! component in [`crate::components`] only resolves pointer coordinates to
//! node ids or edge indices and feeds them into [`TopologyEditor::dispatch`].

pub mod catalog;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod sample;
pub mod serializer;
pub mod store;
pub mod types;

pub use catalog::{CatalogEntry, GroupMapping, ServiceCatalog};
pub use config::EditorConfig;
pub use controller::{ConnectionState, Effect, InteractionController, PointerEvent};
pub use editor::{DisplayOptions, TopologyEditor};
pub use error::ImportError;
pub use store::GraphStore;
pub use types::{Edge, Node, NodeId, NodeSpec, ServiceGroup, Snapshot, TopologyDocument};
