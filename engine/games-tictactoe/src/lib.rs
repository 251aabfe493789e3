//! TicTacToe implementation of the `Board` trait
//!
//! This crate provides a complete reference implementation of TicTacToe
//! demonstrating how to implement the `game-core` Board trait for a search
//! consumer. It doubles as the integration fixture for the search crate's
//! tests and benchmarks.
//!
//! # Usage
//!
//! ```rust
//! use game_core::Board;
//! use games_tictactoe::{Action, State, TicTacToe};
//!
//! let board = TicTacToe::new();
//! let state = State::new();
//!
//! assert!(!board.is_ended(&state));
//! assert_eq!(board.legal_actions(&state).len(), 9);
//!
//! let next = board.next_state(&state, &Action::Place(4));
//! assert_eq!(board.legal_actions(&next).len(), 8);
//! ```

use std::collections::HashMap;

use game_core::{Board, PlayerId};


/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: 0,
        }
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state.
    ///
    /// Panics when the position is occupied, out of range, or the game has
    /// already ended; legality checking is the caller's responsibility.
    pub fn make_move(&self, position: u8) -> State {
        assert!(
            !self.is_done() && position < 9 && self.board[position as usize] == 0,
            "illegal move: position {position}"
        );

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == 0 {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        new_state
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        // Winning positions (rows, columns, diagonals)
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8], // rows
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8], // columns
            [0, 4, 8],
            [2, 4, 6], // diagonals
        ];

        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return 3; // Draw
        }

        0 // Game ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// TicTacToe action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place a piece at the given position (0-8)
    Place(u8),
}

impl Action {
    /// Get the position for this action
    pub fn position(&self) -> u8 {
        match self {
            Action::Place(pos) => *pos,
        }
    }
}

/// TicTacToe rule engine
#[derive(Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new TicTacToe board
    pub fn new() -> Self {
        Self
    }
}

impl Board for TicTacToe {
    type State = State;
    type Action = Action;

    fn is_ended(&self, state: &State) -> bool {
        state.is_done()
    }

    fn legal_actions(&self, state: &State) -> Vec<Action> {
        state.legal_moves().into_iter().map(Action::Place).collect()
    }

    fn next_state(&self, state: &State, action: &Action) -> State {
        state.make_move(action.position())
    }

    fn current_player(&self, state: &State) -> PlayerId {
        PlayerId(state.current_player)
    }

    fn points_values(&self, state: &State) -> Option<HashMap<PlayerId, i32>> {
        match state.winner {
            0 => None, // Game ongoing
            3 => Some(HashMap::from([(PlayerId(1), 0), (PlayerId(2), 0)])), // Draw
            winner => {
                let loser = if winner == 1 { 2 } else { 1 };
                Some(HashMap::from([
                    (PlayerId(winner), 1),
                    (PlayerId(loser), -1),
                ]))
            }
        }
    }
}
