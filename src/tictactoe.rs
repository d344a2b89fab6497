//! Tic-Tac-Toe board, rules and match record

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BOARD_CELLS, BoardState, Cell, Player};
pub use game::{Game, GameOutcome, MatchStatus, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
