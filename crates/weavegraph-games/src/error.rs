use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for table game loading, validation, compilation, and builder operations.
pub enum GameSpecError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing start state")]
    MissingStart,

    #[error("a game needs at least one player, got {players}")]
    NoPlayers { players: usize },

    #[error("start state '{start}' does not exist")]
    UnknownStartState { start: String },

    #[error("start state '{start}' is terminal, there is nothing to decide")]
    TerminalStart { start: String },

    #[error("duplicate state id '{id}'")]
    DuplicateStateId { id: String },

    #[error("duplicate action id '{action}' in state '{state}'")]
    DuplicateActionId { state: String, action: String },

    #[error("state '{state}' is terminal and cannot declare actions")]
    TerminalStateHasActions { state: String },

    #[error("state '{state}' is not terminal but declares no actions")]
    MissingActions { state: String },

    #[error("state '{state}' is decided by player {player} in a {players}-player game")]
    PlayerOutOfRange {
        state: String,
        player: usize,
        players: usize,
    },

    #[error("state '{state}' lists {got} scores for a {expected}-player game")]
    ScoreCount {
        state: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid score for player {player} in state '{state}': {value}")]
    InvalidScore {
        state: String,
        player: usize,
        value: f64,
    },

    #[error("outcome in state '{state}', action '{action}' references unknown next state '{next}'")]
    UnknownNextState {
        state: String,
        action: String,
        next: String,
    },

    #[error(
        "invalid probability in state '{state}', action '{action}', outcome {outcome_index}: {value}"
    )]
    InvalidProbability {
        state: String,
        action: String,
        outcome_index: usize,
        value: f64,
    },

    #[error(
        "probability sum for state '{state}', action '{action}' must be within {tolerance} of 1.0, got {sum}"
    )]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("state '{state}' action '{action}' must contain at least one outcome")]
    EmptyOutcomes { state: String, action: String },

    #[error("builder referenced unknown state '{state}'")]
    BuilderUnknownState { state: String },

    #[error("builder referenced unknown action '{action}' in state '{state}'")]
    BuilderUnknownAction { state: String, action: String },
}
