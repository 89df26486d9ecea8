use rand::Rng;
use tracing::{debug, warn};

use crate::graph::{
    arena::Arena,
    budget::SearchProgress,
    edge_table::EdgeTable,
    edges::Edge,
    error::{GraphError, SearchError, SearchPhase},
    fingerprint::fingerprint,
    game::{FeatureVector, ForwardModel, GameState, SearchRng},
    ids::{Fingerprint, NodeId, PlayerId},
    mcgs::SearchConfig,
    node::{Node, advance},
    transposition::TranspositionTable,
};

/// `(node, action)` pairs taken during one descent, consumed most recent first.
#[derive(Debug, Clone)]
pub struct Trajectory<A> {
    steps: Vec<(NodeId, A)>,
}

impl<A> Default for Trajectory<A> {
    fn default() -> Self {
        Trajectory { steps: Vec::new() }
    }
}

impl<A> Trajectory<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node_id: NodeId, action: A) {
        self.steps.push((node_id, action));
    }

    /// Take the most recent step.
    pub fn pop(&mut self) -> Option<(NodeId, A)> {
        self.steps.pop()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps from the root outwards.
    pub fn iter(&self) -> impl Iterator<Item = &(NodeId, A)> {
        self.steps.iter()
    }
}

#[derive(Debug, Clone)]
/// Outcome of one graph-policy descent.
pub struct PolicyResult<A> {
    pub trajectory: Trajectory<A>, // edges taken from root to frontier
    pub frontier: NodeId,          // node where rollout should start
    pub expanded_new_node: bool,   // whether the frontier was just allocated
}

#[derive(Debug, Clone)]
/// owns the arena, the transposition table and the edge table of one decision
/// (root is always at index 0) and provides the graph search operations.
pub struct SearchGraph<S, A> {
    arena: Arena<Node<S>>,
    transpositions: TranspositionTable,
    edges: EdgeTable<A>,
    root: NodeId,
    player: PlayerId,
    depth_reached: usize,
}

impl<S, A> SearchGraph<S, A>
where
    S: GameState,
    A: Clone + Eq + std::fmt::Debug,
{
    /// Create a graph with a single root node searched on behalf of `player`.
    pub fn new<F>(features: &F, root_state: S, player: PlayerId) -> Self
    where
        F: FeatureVector<S> + ?Sized,
    {
        let root_fingerprint = fingerprint(features, &root_state, player);
        let mut arena = Arena::new();
        let root = arena.allocate(Node::new(root_fingerprint.clone(), root_state, true));

        let mut transpositions = TranspositionTable::new();
        transpositions.put_if_absent(root_fingerprint, root);

        let mut edges = EdgeTable::new();
        edges.add_vertex(root);

        SearchGraph {
            arena,
            transpositions,
            edges,
            root,
            player,
            depth_reached: 0,
        }
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Player the search maximises for.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Return how many nodes exist in the graph arena.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Longest trajectory observed so far.
    pub fn depth_reached(&self) -> usize {
        self.depth_reached
    }

    /// Return an immutable node handle.
    pub fn node(&self, node_id: NodeId) -> Result<&Node<S>, GraphError> {
        self.arena
            .get(node_id)
            .ok_or(GraphError::MissingNode { node_id })
    }

    /// Iterate all nodes in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<S>)> {
        self.arena.iter_with_ids()
    }

    /// Canonical node for a fingerprint.
    pub fn node_for(&self, fingerprint: &Fingerprint) -> Option<NodeId> {
        self.transpositions.get(fingerprint)
    }

    pub fn transpositions(&self) -> &TranspositionTable {
        &self.transpositions
    }

    pub fn edge_table(&self) -> &EdgeTable<A> {
        &self.edges
    }

    /// Outgoing edges of a node.
    pub fn edges(&self, node_id: NodeId) -> &[Edge<A>] {
        self.edges.edges(node_id)
    }

    /// Sum of visits over the outgoing edges of a node.
    pub fn total_visits(&self, node_id: NodeId) -> u64 {
        self.edges.total_visits(node_id)
    }

    /// Selection + expansion from the root.
    ///
    /// Descends with UCB through fully expanded nodes. At the first node that
    /// still has untried actions, one of them is picked uniformly, its
    /// destination is resolved and descent stops there.
    pub fn graph_policy<M, F>(
        &mut self,
        model: &M,
        features: &F,
        config: &SearchConfig,
        rng: &mut SearchRng,
        progress: &mut SearchProgress,
    ) -> Result<PolicyResult<A>, SearchError>
    where
        M: ForwardModel<State = S, Action = A>,
        F: FeatureVector<S> + ?Sized,
    {
        let mut trajectory = Trajectory::new();
        let mut current = self.root;
        let mut state = self.node(current)?.state().clone();

        while !state.is_terminal() {
            let actions = model.available_actions(&state);
            if actions.is_empty() {
                return Err(SearchError::NoAvailableActions {
                    phase: SearchPhase::Selection,
                    depth: trajectory.len(),
                });
            }

            let mut unexpanded = Vec::new();
            for action in &actions {
                match self.edges.edge(current, action).map(Edge::is_pending) {
                    Some(false) => {}
                    Some(true) => unexpanded.push(action),
                    None => {
                        self.edges.add_edge(current, None, action.clone())?;
                        unexpanded.push(action);
                    }
                }
            }

            let expanding = !unexpanded.is_empty();
            let action = if expanding {
                unexpanded[rng.gen_range(0..unexpanded.len())].clone()
            } else {
                self.select_ucb(current, &state, &actions, config, rng)?
            };

            trajectory.push(current, action.clone());
            advance(model, &mut state, &action, progress);
            let next_fingerprint = fingerprint(features, &state, self.player);
            let (next, created) = self.resolve(current, action, next_fingerprint, &state)?;
            current = next;

            if expanding {
                self.depth_reached = self.depth_reached.max(trajectory.len());
                return Ok(PolicyResult {
                    trajectory,
                    frontier: next,
                    expanded_new_node: created,
                });
            }
        }

        self.depth_reached = self.depth_reached.max(trajectory.len());
        Ok(PolicyResult {
            trajectory,
            frontier: current,
            expanded_new_node: false,
        })
    }

    /// Find or create the node reached from `current` by `action` and point the edge at it.
    ///
    /// A destination the edge already points at is kept when its fingerprint
    /// matches. Otherwise the registered node is reused unless it already
    /// reaches `current`; in that case an unshared node is allocated so the
    /// graph stays acyclic.
    fn resolve(
        &mut self,
        current: NodeId,
        action: A,
        next_fingerprint: Fingerprint,
        state: &S,
    ) -> Result<(NodeId, bool), SearchError> {
        if let Some(existing) = self.edges.edge(current, &action).and_then(Edge::destination) {
            if *self.node(existing)?.fingerprint() == next_fingerprint {
                return Ok((existing, false));
            }
        }

        let reusable = match self.transpositions.get(&next_fingerprint) {
            Some(existing) if !self.edges.path_exists(existing, current) => Some(existing),
            Some(existing) => {
                debug!(
                    from = current.index(),
                    existing = existing.index(),
                    fingerprint = %next_fingerprint,
                    "merge would close a cycle, allocating an unshared node"
                );
                None
            }
            None => None,
        };

        let (next, created) = match reusable {
            Some(existing) => (existing, false),
            None => {
                let canonical = !self.transpositions.contains(&next_fingerprint);
                let node = Node::new(next_fingerprint.clone(), state.clone(), canonical);
                let node_id = self.arena.allocate(node);
                if canonical {
                    self.transpositions.put_if_absent(next_fingerprint, node_id);
                }
                self.edges.add_vertex(node_id);
                (node_id, true)
            }
        };

        self.edges.add_edge(current, Some(next), action)?;
        Ok((next, created))
    }

    /// UCB over the available actions of a fully expanded node.
    /// Maximises for the searching player and minimises for everyone else.
    fn select_ucb(
        &self,
        node_id: NodeId,
        state: &S,
        actions: &[A],
        config: &SearchConfig,
        rng: &mut SearchRng,
    ) -> Result<A, SearchError> {
        let total_visits = self.edges.total_visits(node_id);
        let maximizing = state.current_player() == self.player;

        let mut best: Option<(&A, f64)> = None;
        for action in actions {
            let edge = self
                .edges
                .edge(node_id, action)
                .ok_or(SearchError::ActionSelectionFailed { node_id })?;
            let score = edge.ucb_score(total_visits, config.exploration, config.epsilon, maximizing)
                + config.epsilon * rng.r#gen::<f64>();

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((action, score));
            }
        }

        best.map(|(action, _)| action.clone())
            .ok_or(SearchError::ActionSelectionFailed { node_id })
    }

    /// Record `result` on every edge of the trajectory, most recent first.
    /// The same value is applied at every depth.
    pub fn backpropagate(&mut self, mut trajectory: Trajectory<A>, result: f64) {
        while let Some((node_id, action)) = trajectory.pop() {
            if !self.edges.record(node_id, action, result) {
                warn!(
                    node = node_id.index(),
                    "backpropagation found no edge, recorded a fresh one"
                );
            }
        }
    }

    /// Recommend the root action with the highest visit count.
    /// Ties are broken with epsilon-scaled noise.
    pub fn best_action(&self, epsilon: f64, rng: &mut SearchRng) -> Result<A, SearchError> {
        let mut best: Option<(&A, f64)> = None;

        for edge in self.edges.edges(self.root) {
            let value = edge.visits() as f64 + epsilon * rng.r#gen::<f64>();
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((edge.action(), value));
            }
        }

        best.map(|(action, _)| action.clone())
            .ok_or(SearchError::EmptyRoot)
    }
}
