use std::fmt::Debug;

use serde::Serialize;

use crate::graph::{game::GameState, search_graph::SearchGraph};

const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub schema_version: u32,
    pub root_node_id: usize,
    pub node_count: usize,
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub node_id: usize,
    pub fingerprint: String,
    pub is_terminal: bool,
    pub is_canonical: bool,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeSnapshot {
    pub action: String,
    pub destination_node_id: Option<usize>,
    pub visits: u64,
    pub total_value: f64,
    pub mean: f64,
}

impl GraphSnapshot {
    /// Render the snapshot as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<S, A> SearchGraph<S, A>
where
    S: GameState,
    A: Clone + Eq + Debug,
{
    /// Read-only, serializable copy of the graph structure and statistics.
    pub fn snapshot(&self) -> GraphSnapshot {
        let nodes = self
            .nodes()
            .map(|(node_id, node)| NodeSnapshot {
                node_id: node_id.index(),
                fingerprint: node.fingerprint().to_string(),
                is_terminal: node.is_terminal(),
                is_canonical: node.is_canonical(),
                edges: self
                    .edges(node_id)
                    .iter()
                    .map(|edge| EdgeSnapshot {
                        action: format!("{:?}", edge.action()),
                        destination_node_id: edge.destination().map(|id| id.index()),
                        visits: edge.visits(),
                        total_value: edge.stats().total_value(),
                        mean: edge.stats().mean(),
                    })
                    .collect(),
            })
            .collect();

        GraphSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            root_node_id: self.root_id().index(),
            node_count: self.node_count(),
            nodes,
        }
    }
}
