use crate::graph::{ids::NodeId, stats::ActionStats};

#[derive(Debug, Clone)]
/// represents “taking a particular action from this node.”
/// Holds the stats of the edge and, once the action has been tried, the node it led to.
pub struct Edge<A> {
    action: A,
    destination: Option<NodeId>,
    stats: ActionStats,
}

impl<A> Edge<A> {
    /// Create a new edge with zero statistics
    pub fn new(action: A, destination: Option<NodeId>) -> Self {
        Edge {
            action,
            destination,
            stats: ActionStats::new(),
        }
    }

    /// Getter for the action
    pub fn action(&self) -> &A {
        &self.action
    }

    /// Node this edge leads to, `None` while the action has not been tried yet.
    pub fn destination(&self) -> Option<NodeId> {
        self.destination
    }

    pub(crate) fn set_destination(&mut self, destination: NodeId) {
        self.destination = Some(destination);
    }

    /// True while the destination is unresolved or the edge was never backed up.
    pub fn is_pending(&self) -> bool {
        self.destination.is_none() || self.stats.is_unvisited()
    }

    pub fn stats(&self) -> &ActionStats {
        &self.stats
    }

    /// Return the amount of times this edge has been visited
    pub fn visits(&self) -> u64 {
        self.stats.visits()
    }

    /// Function to be used for backpropagation.
    /// Immediately records the rollout return and increments the visits.
    pub fn record(&mut self, reward: f64) {
        self.stats.record(reward);
    }

    /// Calculate the UCB score for this edge, before tie-break noise.
    ///
    /// `maximizing` is false when someone other than the searching player
    /// decides at the source node: their value is negated, assuming they
    /// minimise the searching player's return.
    pub fn ucb_score(&self, total_visits: u64, k: f64, epsilon: f64, maximizing: bool) -> f64 {
        let visits = self.stats.visits() as f64 + epsilon;
        let child_value = self.stats.total_value() / visits;
        let exploration = k * f64::sqrt(f64::ln(total_visits as f64 + 1.0) / visits);
        let signed_value = if maximizing { child_value } else { -child_value };
        signed_value + exploration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_edge_is_pending_until_resolved_and_visited() {
        let mut edge = Edge::new('a', None);
        assert!(edge.is_pending());
        edge.set_destination(NodeId::from(3));
        assert!(edge.is_pending());
        edge.record(1.0);
        assert!(!edge.is_pending());
        assert_eq!(edge.destination(), Some(NodeId::from(3)));
    }

    #[test]
    fn ucb_sign_flips_for_opponent_decisions() {
        let mut edge = Edge::new(0_u8, Some(NodeId::from(1)));
        edge.record(2.0);
        edge.record(2.0);

        let mine = edge.ucb_score(4, 0.0, 1e-6, true);
        let theirs = edge.ucb_score(4, 0.0, 1e-6, false);
        assert!((mine - 2.0).abs() < 1e-5);
        assert!((theirs + 2.0).abs() < 1e-5);
    }

    #[test]
    fn exploration_term_grows_with_parent_visits() {
        let mut edge = Edge::new(0_u8, Some(NodeId::from(1)));
        edge.record(0.0);
        let low = edge.ucb_score(1, 1.0, 1e-6, true);
        let high = edge.ucb_score(100, 1.0, 1e-6, true);
        assert!(high > low);
    }
}
