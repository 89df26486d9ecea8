use std::{cell::RefCell, sync::Arc};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::warn;
use weavegraph_core::{FeatureVector, ForwardModel, GameState, PlayerId};

use crate::{CompiledGame, StateKey};

/// Position in a compiled table game.
#[derive(Debug, Clone)]
pub struct TableState {
    game: Arc<CompiledGame>,
    key: StateKey,
}

impl TableState {
    /// Return the compiled state key.
    pub fn key(&self) -> StateKey {
        self.key
    }

    /// Return the declared string id of this state.
    pub fn id(&self) -> &str {
        self.game.state_id(self.key).unwrap_or_default()
    }
}

impl GameState for TableState {
    fn is_terminal(&self) -> bool {
        self.game.is_terminal(self.key).unwrap_or(true)
    }

    fn current_player(&self) -> PlayerId {
        self.game.player(self.key).unwrap_or(0)
    }

    fn num_players(&self) -> usize {
        self.game.players()
    }

    fn score(&self, player: PlayerId) -> f64 {
        self.game.score(self.key, player).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
/// Seeded forward model over a compiled table game. Actions are the declared action ids.
///
/// Chance outcomes are drawn from a generator owned by the model, so a search
/// over the same game with the same seed replays the same outcomes.
/// That only holds while `apply` is called in the same order, which the
/// search guarantees for a fixed search seed. Cloning the model clones the
/// chance stream: two clones replay the same draws.
pub struct TableGame {
    game: Arc<CompiledGame>,
    chance: RefCell<ChaCha8Rng>,
}

impl TableGame {
    /// Create a forward model with deterministic chance seed.
    pub fn new(game: CompiledGame, seed: u64) -> Self {
        Self {
            game: Arc::new(game),
            chance: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Borrow the underlying compiled game.
    pub fn game(&self) -> &CompiledGame {
        &self.game
    }

    /// Return the start position.
    pub fn start_state(&self) -> TableState {
        self.state(self.game.start())
    }

    /// Return the position for a compiled state key.
    pub fn state(&self, key: StateKey) -> TableState {
        TableState {
            game: Arc::clone(&self.game),
            key,
        }
    }

    fn sample(&self) -> f64 {
        let raw = self.chance.borrow_mut().next_u64();
        (raw as f64) / ((u64::MAX as f64) + 1.0)
    }
}

impl ForwardModel for TableGame {
    type State = TableState;
    type Action = String;

    fn available_actions(&self, state: &TableState) -> Vec<String> {
        if state.is_terminal() {
            return Vec::new();
        }
        self.game
            .action_ids(state.key)
            .map(str::to_string)
            .collect()
    }

    fn apply(&self, state: &mut TableState, action: &String) {
        match self.game.sample_transition(state.key, action, self.sample()) {
            Some(next) => state.key = next,
            None => warn!(
                state = state.id(),
                action = action.as_str(),
                "action has no transition, state left unchanged"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Encodes a table state by its dense index.
pub struct TableFeatures;

impl FeatureVector<TableState> for TableFeatures {
    fn features(&self, state: &TableState, _player: PlayerId) -> Vec<f64> {
        vec![state.key.index() as f64]
    }
}
