//! Pointer interaction state machine.
//!
//! Turns resolved pointer events (a click on a node or on empty canvas, a
//! double-click on a node or an edge) into graph effects. Edge creation is a
//! two-click gesture: the first click on a node marks it as the connection
//! source, a click on a different node connects the two. Clicking the source
//! again, or the empty canvas, abandons the pending connection.
//!
//! [`transition`] is pure; [`InteractionController`] only stores the current
//! state between events. Applying the effects to a store is the caller's job
//! (see [`TopologyEditor`](super::TopologyEditor)).

use log::debug;

use super::types::NodeId;

/// Connection-mode state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
	/// No connection source.
	#[default]
	Idle,
	/// `source` is waiting for a second click on another node.
	SourceSelected {
		/// First node of the pending connection.
		source: NodeId,
	},
	/// A connection to `target` was just made. Purely cosmetic: behaves
	/// like [`ConnectionState::Idle`] for every input.
	Settling {
		/// Node the connection ended on.
		target: NodeId,
	},
}

impl ConnectionState {
	/// Pending connection source, if any.
	pub fn source(&self) -> Option<NodeId> {
		match self {
			ConnectionState::SourceSelected { source } => Some(*source),
			_ => None,
		}
	}
}

/// Pointer input, already resolved against the rendered graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
	/// Single click on a node, or on empty canvas when `None`.
	Click(Option<NodeId>),
	/// Double click. A node hit takes precedence over an edge hit.
	DoubleClick {
		/// Node under the pointer.
		node: Option<NodeId>,
		/// Index of the edge under the pointer.
		edge: Option<usize>,
	},
	/// The settling delay started by [`Effect::StartSettling`] ran out.
	SettleElapsed,
}

/// Work requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
	/// Replace the current selection.
	Select(Option<NodeId>),
	/// Create an edge `from -> to` with the default label.
	Connect {
		/// Source node.
		from: NodeId,
		/// Target node.
		to: NodeId,
	},
	/// Open the edit panel for a node.
	OpenEditor(NodeId),
	/// Ask the user whether the edge at this index should be deleted.
	ConfirmEdgeDelete(usize),
	/// Schedule a [`PointerEvent::SettleElapsed`] after the settling delay.
	StartSettling,
}

/// Computes the next state and the effects for one event.
///
/// With `settle` off, a completed connection returns straight to
/// [`ConnectionState::Idle`].
pub fn transition(
	state: ConnectionState,
	event: PointerEvent,
	settle: bool,
) -> (ConnectionState, Vec<Effect>) {
	use ConnectionState::*;

	match (state, event) {
		(Idle | Settling { .. }, PointerEvent::Click(Some(node))) => (
			SourceSelected { source: node },
			vec![Effect::Select(Some(node))],
		),
		(Idle | Settling { .. }, PointerEvent::Click(None)) => (Idle, vec![Effect::Select(None)]),
		(SourceSelected { source }, PointerEvent::Click(Some(node))) if node != source => {
			let mut effects = vec![
				Effect::Connect {
					from: source,
					to: node,
				},
				Effect::Select(Some(node)),
			];
			if settle {
				effects.push(Effect::StartSettling);
				(Settling { target: node }, effects)
			} else {
				(Idle, effects)
			}
		}
		// Same node again, or empty canvas: abandon the pending connection.
		(SourceSelected { .. }, PointerEvent::Click(_)) => (Idle, vec![Effect::Select(None)]),
		(state, PointerEvent::DoubleClick { node: Some(node), .. }) => (
			state,
			vec![Effect::Select(Some(node)), Effect::OpenEditor(node)],
		),
		(state, PointerEvent::DoubleClick {
			node: None,
			edge: Some(index),
		}) => (state, vec![Effect::ConfirmEdgeDelete(index)]),
		(state, PointerEvent::DoubleClick { .. }) => (state, Vec::new()),
		(Settling { .. }, PointerEvent::SettleElapsed) => (Idle, Vec::new()),
		(state, PointerEvent::SettleElapsed) => (state, Vec::new()),
	}
}

/// Holds the connection state between pointer events.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	state: ConnectionState,
	settle: bool,
}

impl InteractionController {
	/// `settle` enables the cosmetic [`ConnectionState::Settling`] phase.
	pub fn new(settle: bool) -> Self {
		Self {
			state: ConnectionState::Idle,
			settle,
		}
	}

	/// Current connection state.
	pub fn state(&self) -> ConnectionState {
		self.state
	}

	/// Runs one event through [`transition`] and returns its effects.
	pub fn handle(&mut self, event: PointerEvent) -> Vec<Effect> {
		let (next, effects) = transition(self.state, event, self.settle);
		if next != self.state {
			debug!("topo-map: {:?} -> {:?} on {:?}", self.state, next, event);
		}
		self.state = next;
		effects
	}

	/// Drops a pending connection whose source no longer exists.
	pub fn forget(&mut self, id: NodeId) {
		if self.state.source() == Some(id) {
			self.state = ConnectionState::Idle;
		}
	}

	/// Back to idle, dropping any pending connection.
	pub fn reset(&mut self) {
		self.state = ConnectionState::Idle;
	}
}
