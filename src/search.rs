//! Adversarial move search for the BMO tic-tac-toe opponent
//!
//! The engine scores positions with depth-aware minimax (faster wins and
//! slower losses are preferred), prunes with alpha-beta, and optionally
//! degrades its play through a difficulty-driven random bypass that runs
//! before, and entirely outside, the search.

pub mod difficulty;
pub mod engine;
pub mod minimax;

pub use difficulty::Difficulty;
pub use engine::{DecisionKind, MoveDecision, SearchEngine, choose_move};
pub use minimax::{Pruning, SearchStats, WIN_SCORE, score_moves, terminal_score};
