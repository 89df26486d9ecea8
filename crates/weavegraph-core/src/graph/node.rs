use crate::graph::{
    budget::SearchProgress,
    error::SearchError,
    game::{ForwardModel, GameState, Heuristic, RolloutPolicy, SearchRng},
    ids::Fingerprint,
    rollout::{RolloutParams, rollout},
};

#[derive(Debug, Clone)]
/// represents one distinct game state in the search graph.
/// Immutable after creation; all statistics live on the edges.
pub struct Node<S> {
    fingerprint: Fingerprint,
    state: S,
    is_terminal: bool,
    canonical: bool,
}

impl<S: GameState> Node<S> {
    /// Create a node owning its own copy of `state`.
    ///
    /// `canonical` is false for the unshared nodes created when merging
    /// into the registered node for `fingerprint` would close a cycle.
    pub fn new(fingerprint: Fingerprint, state: S, canonical: bool) -> Self {
        let is_terminal = state.is_terminal();
        Node {
            fingerprint,
            state,
            is_terminal,
            canonical,
        }
    }

    /// Run a rollout from a copy of this node's state.
    pub fn rollout<M, P, H>(
        &self,
        model: &M,
        policy: &mut P,
        heuristic: &H,
        params: RolloutParams,
        rng: &mut SearchRng,
        progress: &mut SearchProgress,
    ) -> Result<f64, SearchError>
    where
        M: ForwardModel<State = S>,
        P: RolloutPolicy<S, M::Action> + ?Sized,
        H: Heuristic<S> + ?Sized,
    {
        rollout(&self.state, model, policy, heuristic, params, rng, progress)
    }
}

impl<S> Node<S> {
    /// Return the fingerprint of this node
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Check function to see if a node is terminal
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Whether this node is the one registered in the transposition table.
    pub fn is_canonical(&self) -> bool {
        self.canonical
    }
}

/// Apply `action` to `state` through the forward model, counting the call.
pub(crate) fn advance<M: ForwardModel>(
    model: &M,
    state: &mut M::State,
    action: &M::Action,
    progress: &mut SearchProgress,
) {
    model.apply(state, action);
    progress.count_forward_model_call();
}
