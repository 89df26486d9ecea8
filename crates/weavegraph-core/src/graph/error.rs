use std::fmt;

use thiserror::Error;

use crate::graph::ids::NodeId;

/// Error type for graph construction: the arena and the edge table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Attempted to access a node id that does not exist in the arena.
    #[error("missing node with id {node_id}")]
    MissingNode { node_id: NodeId },

    /// Attempted to hang an edge off a node that is not a vertex of the edge table.
    #[error("source vertex {node_id} does not exist in the edge table")]
    MissingVertex { node_id: NodeId },

    /// Completing the edge `origin -> destination` would close a directed cycle.
    #[error("edge {origin} -> {destination} would create a cycle")]
    CycleDetected {
        origin: NodeId,
        destination: NodeId,
    },
}

/// Error type for a running search.
/// Every variant except `Graph` signals a broken collaborator and aborts the decision.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The heuristic produced NaN or an infinity.
    #[error("heuristic returned non-finite value {value}")]
    NonFiniteHeuristic { value: f64 },

    /// The forward model offered no action in a non-terminal state.
    #[error("no available actions in a non-terminal state during {phase} at depth {depth}")]
    NoAvailableActions { phase: SearchPhase, depth: usize },

    /// Rollout policy returned an index outside `[0, num_actions)`.
    #[error("rollout policy selected invalid action {index} out of {num_actions} actions")]
    InvalidRolloutAction { index: usize, num_actions: usize },

    /// UCB selection found no candidate at a fully expanded node.
    #[error("failed to select action on node {node_id}")]
    ActionSelectionFailed { node_id: NodeId },

    /// The root has no outgoing edges to recommend from.
    #[error("root has no edges, no action can be recommended")]
    EmptyRoot,

    /// The searching player is not a player of the root state.
    #[error("player {player} is out of range for a {num_players}-player game")]
    InvalidPlayer { player: usize, num_players: usize },

    /// The decision state is already terminal.
    #[error("cannot search from a terminal root state")]
    TerminalRoot,
}

/// Part of an iteration an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Selection,
    Rollout,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPhase::Selection => write!(f, "selection"),
            SearchPhase::Rollout => write!(f, "rollout"),
        }
    }
}
