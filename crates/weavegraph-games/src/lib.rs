mod builder;
mod compiled;
mod error;
mod io;
mod spec;
mod table_game;
mod tictactoe;

pub use builder::GameBuilder;
pub use compiled::{CompiledGame, StateKey};
pub use error::GameSpecError;
pub use io::{compile_yaml, load_yaml, save_yaml};
pub use spec::{ActionSpec, GameSpec, OutcomeSpec, StateSpec};
pub use table_game::{TableFeatures, TableGame, TableState};
pub use tictactoe::{Cell, OpenLinesHeuristic, TicTacToe, TicTacToeFeatures, TicTacToeState};
