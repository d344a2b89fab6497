//! Match record and lifecycle

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a finished board, or `None` while play continues
    pub fn from_board(board: &BoardState) -> Option<Self> {
        match board.winner() {
            Some(winner) => Some(GameOutcome::Win(winner)),
            None if board.is_full() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    /// Short label used in summaries and exports
    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::Win(Player::X) => "x_win",
            GameOutcome::Win(Player::O) => "o_win",
            GameOutcome::Draw => "draw",
        }
    }
}

/// Lifecycle of a match: Idle -> InProgress -> Terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// No mark placed yet
    Idle,
    InProgress,
    Terminal(GameOutcome),
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: BoardState,
    pub moves: Vec<Move>,
    current: BoardState,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game with X to open
    pub fn new() -> Self {
        Self::with_first_player(Player::X)
    }

    /// Create a new game opened by `first`
    pub fn with_first_player(first: Player) -> Self {
        let initial = BoardState::new_with_player(first);
        Game {
            initial,
            moves: Vec::new(),
            current: initial,
            outcome: None,
        }
    }

    /// Current board snapshot
    pub fn board(&self) -> BoardState {
        self.current
    }

    /// Side to move
    pub fn to_move(&self) -> Player {
        self.current.to_move
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn status(&self) -> MatchStatus {
        match self.outcome {
            Some(outcome) => MatchStatus::Terminal(outcome),
            None if self.moves.is_empty() => MatchStatus::Idle,
            None => MatchStatus::InProgress,
        }
    }

    /// Play a move for the side to move
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] once the match is terminal and
    /// [`crate::Error::InvalidMove`] for an occupied or out-of-range cell.
    pub fn play(&mut self, position: usize) -> Result<MatchStatus, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let next = self.current.make_move(position)?;
        self.moves.push(Move {
            position,
            player: self.current.to_move,
        });
        self.current = next;
        self.outcome = GameOutcome::from_board(&next);

        Ok(self.status())
    }

    /// Positions played, in order
    pub fn positions(&self) -> Vec<usize> {
        self.moves.iter().map(|m| m.position).collect()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
