use weavegraph_core::PlayerId;

use crate::{ActionSpec, CompiledGame, GameSpec, GameSpecError, OutcomeSpec, StateSpec};

#[derive(Debug, Clone, Default)]
/// Struct to build table games in code
pub struct GameBuilder {
    players: usize,
    start: Option<String>,
    states: Vec<StateSpec>,
}

impl GameBuilder {
    /// Create a builder for a game with `players` players
    pub fn new(players: usize) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    /// Define the start state of the game
    pub fn set_start(&mut self, state: impl Into<String>) -> &mut Self {
        self.start = Some(state.into());
        self
    }

    /// Add a decision state for `player`
    pub fn add_state(&mut self, id: impl Into<String>, player: PlayerId) -> &mut Self {
        self.states.push(StateSpec {
            id: id.into(),
            player: Some(player),
            terminal: Some(false),
            scores: None,
            actions: Some(Vec::new()),
        });
        self
    }

    /// Add a terminal state with one score per player
    pub fn add_terminal(&mut self, id: impl Into<String>, scores: Vec<f64>) -> &mut Self {
        self.states.push(StateSpec {
            id: id.into(),
            player: None,
            terminal: Some(true),
            scores: Some(scores),
            actions: None,
        });
        self
    }

    /// Add an action to a state
    pub fn add_action(
        &mut self,
        state_id: impl AsRef<str>,
        action_id: impl Into<String>,
    ) -> Result<&mut Self, GameSpecError> {
        let state = self.state_mut(state_id.as_ref())?;
        let actions = state.actions.get_or_insert_with(Vec::new);
        actions.push(ActionSpec {
            id: action_id.into(),
            outcomes: Vec::new(),
        });

        Ok(self)
    }

    /// Add a chance outcome to an action
    pub fn add_outcome(
        &mut self,
        state_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        next: impl Into<String>,
        prob: f64,
    ) -> Result<&mut Self, GameSpecError> {
        let state_id = state_id.as_ref();
        let action_id = action_id.as_ref();

        let state = self.state_mut(state_id)?;
        let actions = state.actions.get_or_insert_with(Vec::new);
        let action = actions
            .iter_mut()
            .find(|a| a.id == action_id)
            .ok_or_else(|| GameSpecError::BuilderUnknownAction {
                state: state_id.to_string(),
                action: action_id.to_string(),
            })?;

        action.outcomes.push(OutcomeSpec {
            next: next.into(),
            prob,
        });

        Ok(self)
    }

    fn state_mut(&mut self, state_id: &str) -> Result<&mut StateSpec, GameSpecError> {
        self.states
            .iter_mut()
            .find(|s| s.id == state_id)
            .ok_or_else(|| GameSpecError::BuilderUnknownState {
                state: state_id.to_string(),
            })
    }

    pub fn build_spec(self) -> Result<GameSpec, GameSpecError> {
        let start = self.start.ok_or(GameSpecError::MissingStart)?;
        let spec = GameSpec {
            version: Some(1),
            players: self.players,
            start,
            states: self.states,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<CompiledGame, GameSpecError> {
        let spec = self.build_spec()?;
        spec.compile()
    }
}
