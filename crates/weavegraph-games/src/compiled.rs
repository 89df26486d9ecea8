use std::collections::HashMap;

use weavegraph_core::PlayerId;

use crate::{GameSpec, GameSpecError};

/// Floating point tolerance used when validating probability sums.
pub(crate) const PROB_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Dense index for states in a compiled game.
pub struct StateKey(usize);

impl StateKey {
    /// Return the underlying state index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone)]
/// Runtime form of a table game with resolved state references and precomputed CDFs.
pub struct CompiledGame {
    start: StateKey,
    players: usize,
    states: Vec<StateRec>,
    state_ids: Vec<String>,
    state_id_to_key: HashMap<String, StateKey>,
}

#[derive(Debug, Clone)]
struct StateRec {
    player: PlayerId,
    terminal: bool,
    scores: Vec<f64>,
    actions: Vec<ActionRec>,
}

#[derive(Debug, Clone)]
struct ActionRec {
    id: String,
    outcomes: Vec<StateKey>,
    cdf: Vec<f64>,
}

impl CompiledGame {
    /// Compile and validate a spec into a fast runtime representation.
    pub(crate) fn from_spec(spec: &GameSpec) -> Result<Self, GameSpecError> {
        spec.validate_with_tolerance(PROB_TOLERANCE)?;

        let mut state_id_to_key = HashMap::with_capacity(spec.states.len());
        let mut state_ids = Vec::with_capacity(spec.states.len());

        for (idx, state) in spec.states.iter().enumerate() {
            let key = StateKey::from(idx);
            state_id_to_key.insert(state.id.clone(), key);
            state_ids.push(state.id.clone());
        }

        let start = state_id_to_key.get(&spec.start).copied().ok_or_else(|| {
            GameSpecError::UnknownStartState {
                start: spec.start.clone(),
            }
        })?;

        let mut states = Vec::with_capacity(spec.states.len());
        for state in &spec.states {
            let mut actions = Vec::new();

            for action in state.actions.as_deref().unwrap_or(&[]) {
                let mut outcomes = Vec::with_capacity(action.outcomes.len());
                let mut cdf = Vec::with_capacity(action.outcomes.len());
                let mut cumulative = 0.0_f64;

                for outcome in &action.outcomes {
                    cumulative += outcome.prob;
                    cdf.push(cumulative);
                    let next = state_id_to_key.get(&outcome.next).copied().ok_or_else(|| {
                        GameSpecError::UnknownNextState {
                            state: state.id.clone(),
                            action: action.id.clone(),
                            next: outcome.next.clone(),
                        }
                    })?;
                    outcomes.push(next);
                }

                actions.push(ActionRec {
                    id: action.id.clone(),
                    outcomes,
                    cdf,
                });
            }

            states.push(StateRec {
                player: state.player.unwrap_or(0),
                terminal: state.terminal.unwrap_or(false),
                scores: state
                    .scores
                    .clone()
                    .unwrap_or_else(|| vec![0.0; spec.players]),
                actions,
            });
        }

        Ok(Self {
            start,
            players: spec.players,
            states,
            state_ids,
            state_id_to_key,
        })
    }

    /// Return the start state key.
    pub fn start(&self) -> StateKey {
        self.start
    }

    /// Number of players taking part.
    pub fn players(&self) -> usize {
        self.players
    }

    /// Return the number of compiled states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Check whether a state is terminal.
    pub fn is_terminal(&self, key: StateKey) -> Option<bool> {
        self.states.get(key.index()).map(|state| state.terminal)
    }

    /// Player deciding in a state.
    pub fn player(&self, key: StateKey) -> Option<PlayerId> {
        self.states.get(key.index()).map(|state| state.player)
    }

    /// Declared score of `player` in a state.
    pub fn score(&self, key: StateKey, player: PlayerId) -> Option<f64> {
        self.states
            .get(key.index())
            .and_then(|state| state.scores.get(player).copied())
    }

    /// Action ids available from a state, in declaration order.
    pub fn action_ids(&self, key: StateKey) -> impl Iterator<Item = &str> {
        self.states
            .get(key.index())
            .into_iter()
            .flat_map(|state| state.actions.iter().map(|action| action.id.as_str()))
    }

    /// Convert a state key back to its original string id.
    pub fn state_id(&self, key: StateKey) -> Option<&str> {
        self.state_ids.get(key.index()).map(String::as_str)
    }

    /// Convert a string id into a compiled state key.
    pub fn state_key(&self, id: &str) -> Option<StateKey> {
        self.state_id_to_key.get(id).copied()
    }

    /// Sample the next state for `(state_key, action_id)` using a uniform sample in `[0, 1)`.
    /// Terminal states and unknown actions have no transition.
    pub(crate) fn sample_transition(
        &self,
        state_key: StateKey,
        action_id: &str,
        sample: f64,
    ) -> Option<StateKey> {
        let state = self.states.get(state_key.index())?;
        if state.terminal {
            return None;
        }

        let action = state.actions.iter().find(|action| action.id == action_id)?;
        if action.outcomes.is_empty() {
            return None;
        }

        let mut chosen_idx = action.cdf.partition_point(|p| *p <= sample);
        if chosen_idx >= action.outcomes.len() {
            chosen_idx = action.outcomes.len() - 1;
        }

        Some(action.outcomes[chosen_idx])
    }
}
