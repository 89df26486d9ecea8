use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CompiledGame, GameSpecError, compiled::PROB_TOLERANCE};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Serializable table game schema used for YAML IO and validation.
pub struct GameSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Number of players taking part; player ids are `0..players`.
    pub players: usize,
    /// String id of the start state.
    pub start: String,
    /// All state declarations in the game.
    pub states: Vec<StateSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A single state declaration in the game schema.
pub struct StateSpec {
    /// Unique state id.
    pub id: String,
    /// Player deciding in this state (defaults to player 0 if omitted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<usize>,
    /// Whether this state is terminal (defaults to `false` if omitted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<bool>,
    /// Score per player, indexed by player id (all zero if omitted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    /// Available actions from this state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionSpec>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A named action and its chance outcomes.
pub struct ActionSpec {
    pub id: String,
    pub outcomes: Vec<OutcomeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One probabilistic transition for an action.
pub struct OutcomeSpec {
    pub next: String,
    pub prob: f64,
}

impl GameSpec {
    /// Validate schema invariants using the crate default tolerance.
    pub fn validate(&self) -> Result<(), GameSpecError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Validate ids, players, scores, transitions, and probability constraints.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), GameSpecError> {
        if self.players == 0 {
            return Err(GameSpecError::NoPlayers {
                players: self.players,
            });
        }

        if self.start.trim().is_empty() {
            return Err(GameSpecError::MissingStart);
        }

        let mut ids = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !ids.insert(state.id.as_str()) {
                return Err(GameSpecError::DuplicateStateId {
                    id: state.id.clone(),
                });
            }
        }

        let start = self
            .states
            .iter()
            .find(|state| state.id == self.start)
            .ok_or_else(|| GameSpecError::UnknownStartState {
                start: self.start.clone(),
            })?;
        if start.terminal.unwrap_or(false) {
            return Err(GameSpecError::TerminalStart {
                start: self.start.clone(),
            });
        }

        for state in &self.states {
            self.validate_state(state, &ids, tolerance)?;
        }

        Ok(())
    }

    fn validate_state(
        &self,
        state: &StateSpec,
        known_state_ids: &HashSet<&str>,
        tolerance: f64,
    ) -> Result<(), GameSpecError> {
        let terminal = state.terminal.unwrap_or(false);
        let actions = state.actions.as_deref().unwrap_or(&[]);

        let player = state.player.unwrap_or(0);
        if player >= self.players {
            return Err(GameSpecError::PlayerOutOfRange {
                state: state.id.clone(),
                player,
                players: self.players,
            });
        }

        if let Some(scores) = &state.scores {
            if scores.len() != self.players {
                return Err(GameSpecError::ScoreCount {
                    state: state.id.clone(),
                    expected: self.players,
                    got: scores.len(),
                });
            }
            if let Some((player, value)) = scores
                .iter()
                .copied()
                .enumerate()
                .find(|(_, value)| !value.is_finite())
            {
                return Err(GameSpecError::InvalidScore {
                    state: state.id.clone(),
                    player,
                    value,
                });
            }
        }

        if terminal && !actions.is_empty() {
            return Err(GameSpecError::TerminalStateHasActions {
                state: state.id.clone(),
            });
        }
        // The forward model must offer something in every live state.
        if !terminal && actions.is_empty() {
            return Err(GameSpecError::MissingActions {
                state: state.id.clone(),
            });
        }

        let mut action_ids = HashSet::with_capacity(actions.len());
        for action in actions {
            if !action_ids.insert(action.id.as_str()) {
                return Err(GameSpecError::DuplicateActionId {
                    state: state.id.clone(),
                    action: action.id.clone(),
                });
            }

            if action.outcomes.is_empty() {
                return Err(GameSpecError::EmptyOutcomes {
                    state: state.id.clone(),
                    action: action.id.clone(),
                });
            }

            let mut sum = 0.0_f64;
            for (i, outcome) in action.outcomes.iter().enumerate() {
                if !outcome.prob.is_finite() || outcome.prob < 0.0 {
                    return Err(GameSpecError::InvalidProbability {
                        state: state.id.clone(),
                        action: action.id.clone(),
                        outcome_index: i,
                        value: outcome.prob,
                    });
                }

                if !known_state_ids.contains(outcome.next.as_str()) {
                    return Err(GameSpecError::UnknownNextState {
                        state: state.id.clone(),
                        action: action.id.clone(),
                        next: outcome.next.clone(),
                    });
                }

                sum += outcome.prob;
            }

            // Outcome probabilities for an action must sum to 1 within tolerance.
            if (sum - 1.0).abs() > tolerance {
                return Err(GameSpecError::ProbabilitySum {
                    state: state.id.clone(),
                    action: action.id.clone(),
                    sum,
                    tolerance,
                });
            }
        }

        Ok(())
    }

    /// Compile this spec into the runtime representation.
    pub fn compile(&self) -> Result<CompiledGame, GameSpecError> {
        CompiledGame::from_spec(self)
    }
}
