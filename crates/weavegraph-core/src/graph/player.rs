use rand::SeedableRng;
use tracing::debug;

use crate::graph::{
    error::SearchError,
    game::{
        FeatureVector, ForwardModel, GameState, Heuristic, RolloutPolicy, ScoreHeuristic,
        SearchRng, UniformRandomPolicy,
    },
    ids::PlayerId,
    mcgs::{RunMetrics, SearchConfig, SearchConfigError, SearchContext},
    search_graph::SearchGraph,
};

/// Decision-time planner: one fresh search graph per decision.
///
/// Owns its collaborators and a seeded generator. Two players built with
/// the same config and collaborators make the same decisions.
pub struct GraphSearchPlayer<M, F, H = ScoreHeuristic, P = UniformRandomPolicy> {
    model: M,
    features: F,
    heuristic: H,
    rollout_policy: P,
    config: SearchConfig,
    rng: SearchRng,
}

impl<M, F> GraphSearchPlayer<M, F>
where
    M: ForwardModel,
    F: FeatureVector<M::State>,
{
    /// Create a player with the default heuristic and a uniform rollout policy.
    /// Invalid configs are rejected here, never mid-search.
    pub fn new(model: M, features: F, config: SearchConfig) -> Result<Self, SearchConfigError> {
        config.validate()?;
        let rng = SearchRng::seed_from_u64(config.seed);
        Ok(GraphSearchPlayer {
            model,
            features,
            heuristic: ScoreHeuristic,
            rollout_policy: UniformRandomPolicy,
            config,
            rng,
        })
    }
}

impl<M, F, H, P> GraphSearchPlayer<M, F, H, P> {
    /// Builder pattern: replace the rollout evaluation heuristic.
    pub fn with_heuristic<H2>(self, heuristic: H2) -> GraphSearchPlayer<M, F, H2, P> {
        GraphSearchPlayer {
            model: self.model,
            features: self.features,
            heuristic,
            rollout_policy: self.rollout_policy,
            config: self.config,
            rng: self.rng,
        }
    }

    /// Builder pattern: replace the rollout policy.
    pub fn with_rollout_policy<P2>(self, rollout_policy: P2) -> GraphSearchPlayer<M, F, H, P2> {
        GraphSearchPlayer {
            model: self.model,
            features: self.features,
            heuristic: self.heuristic,
            rollout_policy,
            config: self.config,
            rng: self.rng,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M, F, H, P> GraphSearchPlayer<M, F, H, P>
where
    M: ForwardModel,
    F: FeatureVector<M::State>,
    H: Heuristic<M::State>,
    P: RolloutPolicy<M::State, M::Action>,
{
    /// Build a fresh graph rooted at `root_state` and run it to budget exhaustion.
    pub fn search(
        &mut self,
        root_state: &M::State,
        player: PlayerId,
    ) -> Result<(SearchGraph<M::State, M::Action>, RunMetrics), SearchError> {
        if root_state.is_terminal() {
            return Err(SearchError::TerminalRoot);
        }
        let num_players = root_state.num_players();
        if player >= num_players {
            return Err(SearchError::InvalidPlayer {
                player,
                num_players,
            });
        }

        let mut graph = SearchGraph::new(&self.features, root_state.clone(), player);
        let mut ctx = SearchContext {
            model: &self.model,
            features: &self.features,
            heuristic: &self.heuristic,
            rollout_policy: &mut self.rollout_policy,
            config: &self.config,
            rng: &mut self.rng,
        };
        let metrics = graph.run(&mut ctx)?;
        Ok((graph, metrics))
    }

    /// Pick an action for `player` in `root_state`.
    ///
    /// The graph is discarded once the most-visited root action is chosen.
    pub fn decide(
        &mut self,
        root_state: &M::State,
        player: PlayerId,
    ) -> Result<M::Action, SearchError> {
        let (graph, metrics) = self.search(root_state, player)?;
        let action = graph.best_action(self.config.epsilon, &mut self.rng)?;

        debug!(
            iterations = metrics.iterations_completed,
            forward_model_calls = metrics.forward_model_calls,
            elapsed_ms = metrics.elapsed.as_millis() as u64,
            statistics = %graph.statistics(),
            action = ?action,
            "MCGS decision made"
        );

        Ok(action)
    }
}
