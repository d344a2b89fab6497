//! BEMORA game core
//!
//! This crate provides:
//! - Tic-tac-toe board, match lifecycle and winning-line analysis
//! - A minimax/alpha-beta engine with difficulty-tuned random moves
//! - Procedural maze generation with a start-to-exit connectivity guarantee
//! - A match pipeline with pluggable opponents and observers
//! - Bypass-rate statistics and the `bemora` command-line interface

pub mod analysis;
pub mod app;
pub mod cli;
pub mod error;
pub mod maze;
pub mod pipeline;
pub mod ports;
pub mod search;
pub mod tictactoe;
pub mod utils;

pub use error::{Error, Result};
pub use maze::{Grid, MazeGenerator, generate};
pub use search::{Difficulty, SearchEngine, choose_move};
pub use tictactoe::{BoardState, Player};
