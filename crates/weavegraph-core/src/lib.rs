mod graph;

pub use graph::budget::{Budget, SearchProgress};
pub use graph::edge_table::EdgeTable;
pub use graph::edges::Edge;
pub use graph::error::{GraphError, SearchError, SearchPhase};
pub use graph::fingerprint::fingerprint;
pub use graph::game::{
    FeatureVector, ForwardModel, GameState, Heuristic, RolloutPolicy, ScoreHeuristic, SearchRng,
    UniformRandomPolicy,
};
pub use graph::ids::{Fingerprint, NodeId, PlayerId};
pub use graph::mcgs::{
    BudgetType, IterationMetrics, RunMetrics, SearchConfig, SearchConfigError, SearchContext,
};
pub use graph::node::Node;
pub use graph::player::GraphSearchPlayer;
pub use graph::rollout::{RolloutParams, rollout};
pub use graph::search_graph::{PolicyResult, SearchGraph, Trajectory};
pub use graph::snapshot::{EdgeSnapshot, GraphSnapshot, NodeSnapshot};
pub use graph::statistics::GraphStatistics;
pub use graph::stats::ActionStats;
pub use graph::transposition::TranspositionTable;
