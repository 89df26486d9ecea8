use std::fmt;

use weavegraph_core::{FeatureVector, ForwardModel, GameState, Heuristic, PlayerId};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Mark placed by `player`; player 0 plays X.
    pub fn of(player: PlayerId) -> Self {
        if player == 0 { Cell::X } else { Cell::O }
    }
}

/// 3x3 board. X (player 0) always moves first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToeState {
    board: [Cell; 9],
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self {
            board: [Cell::Empty; 9],
        }
    }
}

impl TicTacToeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a position from a board; the player to move follows from the mark counts.
    pub fn from_board(board: [Cell; 9]) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &[Cell; 9] {
        &self.board
    }

    /// Indices of the empty cells, in board order.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn winner(&self) -> Option<Cell> {
        LINES.iter().find_map(|line| {
            let a = self.board[line[0]];
            (a != Cell::Empty && a == self.board[line[1]] && a == self.board[line[2]]).then_some(a)
        })
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|cell| *cell != Cell::Empty)
    }

    fn marks(&self, mark: Cell) -> usize {
        self.board.iter().filter(|cell| **cell == mark).count()
    }
}

impl GameState for TicTacToeState {
    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    fn current_player(&self) -> PlayerId {
        if self.marks(Cell::X) > self.marks(Cell::O) { 1 } else { 0 }
    }

    fn num_players(&self) -> usize {
        2
    }

    /// +1 for a win, -1 for a loss, 0 otherwise.
    fn score(&self, player: PlayerId) -> f64 {
        match self.winner() {
            Some(mark) if mark == Cell::of(player) => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.board.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::X => 'X',
                    Cell::O => 'O',
                };
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Rules of tic-tac-toe. An action is the index of the cell to mark.
pub struct TicTacToe;

impl ForwardModel for TicTacToe {
    type State = TicTacToeState;
    type Action = usize;

    fn available_actions(&self, state: &TicTacToeState) -> Vec<usize> {
        if state.is_terminal() {
            Vec::new()
        } else {
            state.legal_moves()
        }
    }

    fn apply(&self, state: &mut TicTacToeState, action: &usize) {
        let player = state.current_player();
        if let Some(cell) = state.board.get_mut(*action) {
            if *cell == Cell::Empty {
                *cell = Cell::of(player);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Cells seen from the searching player: own marks 1, opponent marks -1.
pub struct TicTacToeFeatures;

impl FeatureVector<TicTacToeState> for TicTacToeFeatures {
    fn features(&self, state: &TicTacToeState, player: PlayerId) -> Vec<f64> {
        let own = Cell::of(player);
        state
            .board
            .iter()
            .map(|cell| match cell {
                Cell::Empty => 0.0,
                mark if *mark == own => 1.0,
                _ => -1.0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Final score on decided boards, otherwise the balance of lines still open to each side.
pub struct OpenLinesHeuristic;

impl Heuristic<TicTacToeState> for OpenLinesHeuristic {
    fn evaluate(&self, state: &TicTacToeState, player: PlayerId) -> f64 {
        if state.is_terminal() {
            return state.score(player);
        }

        let own = Cell::of(player);
        let mut balance = 0i32;
        for line in LINES {
            let cells = line.map(|idx| state.board[idx]);
            let mine = cells.iter().any(|cell| *cell == own);
            let theirs = cells.iter().any(|cell| *cell != own && *cell != Cell::Empty);
            match (mine, theirs) {
                (true, false) => balance += 1,
                (false, true) => balance -= 1,
                _ => {}
            }
        }
        // Strictly inside (-1, 1).
        balance as f64 / (LINES.len() as f64 + 1.0)
    }
}
