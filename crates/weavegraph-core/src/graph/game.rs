use std::{fmt::Debug, hash::Hash};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::graph::ids::PlayerId;

/// The single random generator threaded through every randomized decision of a search.
pub type SearchRng = ChaCha8Rng;

/// Contract a game state must satisfy to be searched.
/// `Clone` must be a deep copy: nodes never share a mutable state.
pub trait GameState: Clone {
    /// Whether the game has ended in this state.
    fn is_terminal(&self) -> bool;

    /// The player who makes the next decision.
    fn current_player(&self) -> PlayerId;

    /// Number of players taking part in the game.
    fn num_players(&self) -> usize;

    /// Raw game score for `player`.
    fn score(&self, player: PlayerId) -> f64;
}

/// Game rules consumed by the search.
///
/// Both operations must be pure with respect to anything outside the state,
/// so that independent copies of a state can be advanced without coordination.
pub trait ForwardModel {
    type State: GameState;
    type Action: Clone + Eq + Hash + Debug;

    /// Ordered legal actions. Must be non-empty for non-terminal states.
    fn available_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Advance `state` in place by `action`.
    fn apply(&self, state: &mut Self::State, action: &Self::Action);
}

/// Numeric encoding of a state used only to fingerprint it.
pub trait FeatureVector<S> {
    fn features(&self, state: &S, player: PlayerId) -> Vec<f64>;
}

/// Scores a (usually non-terminal) state from the point of view of `player`.
/// Must return a finite value.
pub trait Heuristic<S> {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64;
}

/// Picks actions during rollouts.
/// Returns an index into `actions`.
pub trait RolloutPolicy<S, A> {
    fn choose_action(&mut self, state: &S, actions: &[A], rng: &mut SearchRng) -> usize;
}

/// Default heuristic: the game's own score for the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreHeuristic;

impl<S: GameState> Heuristic<S> for ScoreHeuristic {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64 {
        state.score(player)
    }
}

/// Default rollout policy: uniform over the available actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomPolicy;

impl<S, A> RolloutPolicy<S, A> for UniformRandomPolicy {
    fn choose_action(&mut self, _state: &S, actions: &[A], rng: &mut SearchRng) -> usize {
        rng.gen_range(0..actions.len())
    }
}
