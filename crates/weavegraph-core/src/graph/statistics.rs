use std::fmt;

use serde::Serialize;

use crate::graph::{game::GameState, search_graph::SearchGraph};

/// Diagnostic summary of a finished search graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    /// Nodes whose outgoing edges have never been backed up.
    pub total_leaves: usize,
    pub total_terminal_nodes: usize,
    pub max_actions_at_node: usize,
    pub depth_reached: usize,
}

impl<S, A> SearchGraph<S, A>
where
    S: GameState,
    A: Clone + Eq + fmt::Debug,
{
    /// Compute the statistics without touching the graph.
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            total_nodes: self.node_count(),
            total_leaves: 0,
            total_terminal_nodes: 0,
            max_actions_at_node: 0,
            depth_reached: self.depth_reached(),
        };

        for (node_id, node) in self.nodes() {
            if self.total_visits(node_id) == 0 {
                stats.total_leaves += 1;
            }
            if node.is_terminal() {
                stats.total_terminal_nodes += 1;
            }
            stats.max_actions_at_node = stats.max_actions_at_node.max(self.edges(node_id).len());
        }

        stats
    }
}

impl fmt::Display for GraphStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} leaves, {} terminal nodes, {} max actions, with maximum depth {}",
            self.total_nodes,
            self.total_leaves,
            self.total_terminal_nodes,
            self.max_actions_at_node,
            self.depth_reached
        )
    }
}
