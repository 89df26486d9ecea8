use std::{
    fmt::Debug,
    fs,
    path::Path,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::graph::{
    budget::{Budget, SearchProgress},
    error::SearchError,
    game::{FeatureVector, ForwardModel, GameState, Heuristic, RolloutPolicy, SearchRng},
    ids::NodeId,
    rollout::RolloutParams,
    search_graph::SearchGraph,
};

const DEFAULT_SEARCH_CONFIG_YAML: &str = include_str!("../../config/search.default.yaml");

/// Which stopping rule the `budget` value feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    /// `budget` is a wall-clock limit in milliseconds.
    Time,
    /// `budget` is an exact iteration count.
    #[default]
    Iterations,
    /// `budget` is a number of forward model calls.
    ForwardModelCalls,
}

/// Search configuration for MCGS decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Exploration constant `K` of the UCB rule.
    pub exploration: f64,
    /// Tie-break noise magnitude and visit-count denominator guard.
    pub epsilon: f64,
    pub rollout_length: usize,
    pub budget_type: BudgetType,
    pub budget: u64,
    pub time_safety_margin_ms: u64,
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            exploration: std::f64::consts::SQRT_2,
            epsilon: 1e-6,
            rollout_length: 10,
            budget_type: BudgetType::Iterations,
            budget: 1000,
            time_safety_margin_ms: 10,
            seed: 0,
        }
    }
}

impl SearchConfig {
    /// Parse a search config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SearchConfigError> {
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a search config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SearchConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SEARCH_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SearchConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Config with an iteration budget, handy for tests and benchmarks.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.budget_type = BudgetType::Iterations;
        self.budget = iterations;
        self
    }

    /// Builder pattern: set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject settings that can never produce a meaningful search.
    pub fn validate(&self) -> Result<(), SearchConfigError> {
        if self.budget == 0 {
            return Err(SearchConfigError::Invalid(
                "budget must be greater than 0".to_string(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchConfigError::Invalid(
                "exploration must be finite and >= 0".to_string(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SearchConfigError::Invalid(
                "epsilon must be finite and > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Lower the flat budget fields into the active stopping rule.
    pub fn budget(&self) -> Budget {
        match self.budget_type {
            BudgetType::Time => Budget::Time {
                limit: Duration::from_millis(self.budget),
                safety_margin: Duration::from_millis(self.time_safety_margin_ms),
            },
            BudgetType::Iterations => Budget::Iterations(self.budget),
            BudgetType::ForwardModelCalls => Budget::ForwardModelCalls(self.budget),
        }
    }

    fn rollout_params(&self, perspective: usize) -> RolloutParams {
        RolloutParams {
            max_steps: self.rollout_length,
            perspective,
        }
    }
}

/// Error type for loading and validating `SearchConfig`.
#[derive(Debug, Error)]
pub enum SearchConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid search config: {0}")]
    Invalid(String),
}

/// Collaborators one search borrows for its duration.
pub struct SearchContext<'a, M, F, H, P> {
    pub model: &'a M,
    pub features: &'a F,
    pub heuristic: &'a H,
    pub rollout_policy: &'a mut P,
    pub config: &'a SearchConfig,
    pub rng: &'a mut SearchRng,
}

/// Per-iteration metrics emitted by MCGS.
#[derive(Debug, Clone, Copy)]
pub struct IterationMetrics {
    pub frontier: NodeId,
    pub depth: usize,
    pub rollout_return: f64,
    pub expanded_new_node: bool,
}

/// Aggregate metrics for a complete search run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub iterations_completed: u64,
    pub forward_model_calls: u64,
    pub elapsed: Duration,
    pub total_return_sum: f64,
    pub average_return: f64,
}

impl RunMetrics {
    fn new() -> Self {
        RunMetrics {
            iterations_completed: 0,
            forward_model_calls: 0,
            elapsed: Duration::ZERO,
            total_return_sum: 0.0,
            average_return: 0.0,
        }
    }

    fn record(&mut self, metrics: &IterationMetrics) {
        self.iterations_completed += 1;
        self.total_return_sum += metrics.rollout_return;
        self.average_return = self.total_return_sum / self.iterations_completed as f64;
    }

    fn finish(mut self, progress: &SearchProgress) -> Self {
        self.forward_model_calls = progress.forward_model_calls();
        self.elapsed = progress.elapsed();
        self
    }
}

impl<S, A> SearchGraph<S, A>
where
    S: GameState,
    A: Clone + Eq + Debug,
{
    /// Execute one complete MCGS iteration: graph policy, rollout, backpropagation.
    pub fn iterate<M, F, H, P>(
        &mut self,
        ctx: &mut SearchContext<'_, M, F, H, P>,
        progress: &mut SearchProgress,
    ) -> Result<IterationMetrics, SearchError>
    where
        M: ForwardModel<State = S, Action = A>,
        F: FeatureVector<S>,
        H: Heuristic<S>,
        P: RolloutPolicy<S, A>,
    {
        let started = Instant::now();
        let policy = self.graph_policy(ctx.model, ctx.features, ctx.config, &mut *ctx.rng, progress)?;

        let rollout_return = self.node(policy.frontier)?.rollout(
            ctx.model,
            &mut *ctx.rollout_policy,
            ctx.heuristic,
            ctx.config.rollout_params(self.player()),
            &mut *ctx.rng,
            progress,
        )?;

        let depth = policy.trajectory.len();
        self.backpropagate(policy.trajectory, rollout_return);
        progress.finish_iteration(started.elapsed());

        trace!(
            iteration = progress.iterations(),
            frontier = policy.frontier.index(),
            depth,
            rollout_return,
            "MCGS iteration complete"
        );

        Ok(IterationMetrics {
            frontier: policy.frontier,
            depth,
            rollout_return,
            expanded_new_node: policy.expanded_new_node,
        })
    }

    /// Run MCGS until the configured budget is exhausted.
    pub fn run<M, F, H, P>(
        &mut self,
        ctx: &mut SearchContext<'_, M, F, H, P>,
    ) -> Result<RunMetrics, SearchError>
    where
        M: ForwardModel<State = S, Action = A>,
        F: FeatureVector<S>,
        H: Heuristic<S>,
        P: RolloutPolicy<S, A>,
    {
        self.run_with_hook(ctx, |_| {})
    }

    /// Run MCGS and invoke a callback after each completed iteration.
    ///
    /// At least one iteration runs; the stopping rule is evaluated after
    /// every completed iteration, never mid-iteration.
    pub fn run_with_hook<M, F, H, P, FHook>(
        &mut self,
        ctx: &mut SearchContext<'_, M, F, H, P>,
        mut on_iteration: FHook,
    ) -> Result<RunMetrics, SearchError>
    where
        M: ForwardModel<State = S, Action = A>,
        F: FeatureVector<S>,
        H: Heuristic<S>,
        P: RolloutPolicy<S, A>,
        FHook: FnMut(&IterationMetrics),
    {
        let budget = ctx.config.budget();
        let mut progress = SearchProgress::start();
        let mut metrics = RunMetrics::new();

        loop {
            let iteration_metrics = self.iterate(ctx, &mut progress)?;

            on_iteration(&iteration_metrics);
            metrics.record(&iteration_metrics);

            if budget.is_exhausted(&progress) {
                break;
            }
        }

        Ok(metrics.finish(&progress))
    }
}
