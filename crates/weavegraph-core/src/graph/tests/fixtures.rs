use rand::SeedableRng;

use crate::{
    FeatureVector, ForwardModel, GameState, Heuristic, PlayerId, RolloutPolicy, SearchConfig,
    SearchContext, SearchError, SearchGraph, SearchProgress, SearchRng, UniformRandomPolicy,
};

/// Two players alternately bump one of two counters.
/// Any ordering of the same bumps reaches the same state, so paths transpose.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterState {
    pub a: u32,
    pub b: u32,
    pub limit: u32,
}

impl CounterState {
    pub fn new(limit: u32) -> Self {
        CounterState { a: 0, b: 0, limit }
    }
}

impl GameState for CounterState {
    fn is_terminal(&self) -> bool {
        self.a + self.b >= self.limit
    }

    fn current_player(&self) -> PlayerId {
        ((self.a + self.b) % 2) as PlayerId
    }

    fn num_players(&self) -> usize {
        2
    }

    fn score(&self, player: PlayerId) -> f64 {
        let diff = self.a as f64 - self.b as f64;
        if player == 0 { diff } else { -diff }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bump {
    A,
    B,
}

pub struct CounterModel;

impl ForwardModel for CounterModel {
    type State = CounterState;
    type Action = Bump;

    fn available_actions(&self, state: &CounterState) -> Vec<Bump> {
        if state.is_terminal() {
            Vec::new()
        } else {
            vec![Bump::A, Bump::B]
        }
    }

    fn apply(&self, state: &mut CounterState, action: &Bump) {
        match action {
            Bump::A => state.a += 1,
            Bump::B => state.b += 1,
        }
    }
}

pub struct CounterFeatures;

impl FeatureVector<CounterState> for CounterFeatures {
    fn features(&self, state: &CounterState, _player: PlayerId) -> Vec<f64> {
        vec![state.a as f64, state.b as f64]
    }
}

/// Single player walking around a three-cell ring.
/// The step counter is not part of the features, so positions recur and
/// merging would close cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct RingState {
    pub position: u32,
    pub steps: u32,
    pub max_steps: u32,
}

impl GameState for RingState {
    fn is_terminal(&self) -> bool {
        self.steps >= self.max_steps
    }

    fn current_player(&self) -> PlayerId {
        0
    }

    fn num_players(&self) -> usize {
        1
    }

    fn score(&self, _player: PlayerId) -> f64 {
        self.position as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Forward,
    Back,
}

pub struct RingModel;

impl ForwardModel for RingModel {
    type State = RingState;
    type Action = Turn;

    fn available_actions(&self, state: &RingState) -> Vec<Turn> {
        if state.is_terminal() {
            Vec::new()
        } else {
            vec![Turn::Forward, Turn::Back]
        }
    }

    fn apply(&self, state: &mut RingState, action: &Turn) {
        state.position = match action {
            Turn::Forward => (state.position + 1) % 3,
            Turn::Back => (state.position + 2) % 3,
        };
        state.steps += 1;
    }
}

pub struct RingFeatures;

impl FeatureVector<RingState> for RingFeatures {
    fn features(&self, state: &RingState, _player: PlayerId) -> Vec<f64> {
        vec![state.position as f64]
    }
}

/// Forward model that claims the game goes on but offers nothing to play.
pub struct StuckModel;

impl ForwardModel for StuckModel {
    type State = CounterState;
    type Action = Bump;

    fn available_actions(&self, _state: &CounterState) -> Vec<Bump> {
        Vec::new()
    }

    fn apply(&self, _state: &mut CounterState, _action: &Bump) {}
}

pub struct ConstantHeuristic(pub f64);

impl<S> Heuristic<S> for ConstantHeuristic {
    fn evaluate(&self, _state: &S, _player: PlayerId) -> f64 {
        self.0
    }
}

pub struct OutOfRangePolicy;

impl<S, A> RolloutPolicy<S, A> for OutOfRangePolicy {
    fn choose_action(&mut self, _state: &S, actions: &[A], _rng: &mut SearchRng) -> usize {
        actions.len() + 3
    }
}

/// Run `iterations` iterations of a fresh search rooted at `root` for player 0.
pub fn search<M, F, H>(
    model: &M,
    features: &F,
    heuristic: &H,
    root: M::State,
    iterations: u64,
    seed: u64,
) -> Result<(SearchGraph<M::State, M::Action>, SearchProgress), SearchError>
where
    M: ForwardModel,
    F: FeatureVector<M::State>,
    H: Heuristic<M::State>,
{
    let config = SearchConfig::default().with_iterations(iterations);
    let mut rng = SearchRng::seed_from_u64(seed);
    let mut policy = UniformRandomPolicy;
    let mut ctx = SearchContext {
        model,
        features,
        heuristic,
        rollout_policy: &mut policy,
        config: &config,
        rng: &mut rng,
    };

    let mut graph = SearchGraph::new(features, root, 0);
    let mut progress = SearchProgress::start();
    for _ in 0..iterations {
        graph.iterate(&mut ctx, &mut progress)?;
    }
    Ok((graph, progress))
}

/// Counter-game search with a flat heuristic, so exploration alone drives selection.
pub fn explore_counter(
    limit: u32,
    iterations: u64,
    seed: u64,
) -> (SearchGraph<CounterState, Bump>, SearchProgress) {
    search(
        &CounterModel,
        &CounterFeatures,
        &ConstantHeuristic(0.0),
        CounterState::new(limit),
        iterations,
        seed,
    )
    .expect("counter search should succeed")
}
