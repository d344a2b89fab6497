//! Move selection for the automated opponent

use rand::{Rng, SeedableRng, prelude::IndexedRandom, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    difficulty::Difficulty,
    minimax::{Pruning, SearchStats, score_moves},
};
use crate::tictactoe::{BoardState, Player};

/// How a move was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    /// Best-scoring move from the full search
    Searched,
    /// Uniformly random empty cell from the difficulty bypass
    RandomBypass,
}

/// A chosen move together with how it was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDecision {
    pub position: usize,
    pub kind: DecisionKind,
    /// Minimax score of the move, present only for searched moves
    pub score: Option<i32>,
    /// Nodes visited by the search (0 for a bypass)
    pub nodes: u64,
}

/// The "BMO AI" opponent.
///
/// Plays `side` (O unless configured otherwise) as the maximizing player.
/// The random source is owned by the engine so tests can seed it.
///
/// ```
/// use bemora::search::{Difficulty, SearchEngine};
/// use bemora::tictactoe::BoardState;
///
/// let board = BoardState::from_string("XX.|OO.|...:O")?;
/// let mut engine = SearchEngine::with_seed(Difficulty::Hard, 7);
/// assert_eq!(engine.choose_move(&board), Some(5));
/// # Ok::<(), bemora::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SearchEngine<R = StdRng> {
    side: Player,
    difficulty: Difficulty,
    rng: R,
}

impl SearchEngine<StdRng> {
    /// Engine playing O with an entropy-seeded random source
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_rng(difficulty, StdRng::from_os_rng())
    }

    /// Engine playing O with a deterministic random source
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::from_rng(difficulty, StdRng::seed_from_u64(seed))
    }

    /// Replace the random source with a seeded one
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl<R: Rng> SearchEngine<R> {
    pub fn from_rng(difficulty: Difficulty, rng: R) -> Self {
        Self {
            side: Player::O,
            difficulty,
            rng,
        }
    }

    /// Play the given side instead of O
    pub fn with_side(mut self, side: Player) -> Self {
        self.side = side;
        self
    }

    pub fn side(&self) -> Player {
        self.side
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Pick a cell for the engine's mark, or `None` when the board offers no
    /// legal move (full, or already won).
    ///
    /// The engine always places its own mark; `board.to_move` is not
    /// consulted.
    pub fn choose_move(&mut self, board: &BoardState) -> Option<usize> {
        self.decide(board).map(|decision| decision.position)
    }

    /// Like [`choose_move`](Self::choose_move) but reports how the move was
    /// reached.
    pub fn decide(&mut self, board: &BoardState) -> Option<MoveDecision> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return None;
        }

        if let Some(position) = self.bypass(&legal) {
            return Some(MoveDecision {
                position,
                kind: DecisionKind::RandomBypass,
                score: None,
                nodes: 0,
            });
        }

        let mut stats = SearchStats::default();
        let (position, score) = self.search(board, &mut stats)?;
        Some(MoveDecision {
            position,
            kind: DecisionKind::Searched,
            score: Some(score),
            nodes: stats.nodes,
        })
    }

    /// Difficulty pre-check, evaluated once per request
    fn bypass(&mut self, legal: &[usize]) -> Option<usize> {
        let p = self.difficulty.bypass_probability();
        if p <= 0.0 || !self.rng.random_bool(p) {
            return None;
        }
        legal.choose(&mut self.rng).copied()
    }

    /// Deterministic search: the strictly highest-scoring move, earliest
    /// cell index on ties
    pub fn best_move(&self, board: &BoardState) -> Option<usize> {
        let mut stats = SearchStats::default();
        self.search(board, &mut stats).map(|(pos, _)| pos)
    }

    /// Every legal move with its minimax score, in cell order
    pub fn evaluate_moves(&self, board: &BoardState) -> Vec<(usize, i32)> {
        let mut stats = SearchStats::default();
        score_moves(board, self.side, Pruning::AlphaBeta, &mut stats)
    }

    fn search(&self, board: &BoardState, stats: &mut SearchStats) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        for (pos, score) in score_moves(board, self.side, Pruning::AlphaBeta, stats) {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((pos, score)),
            }
        }
        best
    }
}

/// One-shot move choice for O with an entropy-seeded random source
pub fn choose_move(board: &BoardState, difficulty: Difficulty) -> Option<usize> {
    SearchEngine::new(difficulty).choose_move(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> BoardState {
        BoardState::from_string(s).unwrap()
    }

    #[test]
    fn full_board_yields_no_move() {
        let full = board("XOX|XOO|OXX");
        let mut engine = SearchEngine::with_seed(Difficulty::Easy, 1);
        assert_eq!(engine.choose_move(&full), None);
        assert_eq!(engine.decide(&full), None);
        assert_eq!(choose_move(&full, Difficulty::Hard), None);
    }

    #[test]
    fn won_board_yields_no_move() {
        let won = board("XXX|OO.|...");
        let mut engine = SearchEngine::with_seed(Difficulty::Hard, 1);
        assert_eq!(engine.choose_move(&won), None);
    }

    #[test]
    fn takes_the_win_over_the_block() {
        // XX.
        // OO.
        // X..
        let state = board("XX.|OO.|X..:O");
        let engine = SearchEngine::with_seed(Difficulty::Hard, 3);
        assert_eq!(engine.best_move(&state), Some(5));
    }

    #[test]
    fn blocks_an_open_row() {
        // XX.
        // .O.
        // ...
        let state = board("XX.|.O.|...");
        let mut engine = SearchEngine::with_seed(Difficulty::Hard, 3);
        assert_eq!(engine.choose_move(&state), Some(2));
    }

    #[test]
    fn ties_resolve_to_earliest_cell() {
        // Every reply to a center opening scores 0 except edges, which lose;
        // corners tie and the earliest corner wins.
        let state = board("....X....");
        let engine = SearchEngine::with_seed(Difficulty::Hard, 0);
        let scores = engine.evaluate_moves(&state);
        let best = scores.iter().map(|&(_, s)| s).max().unwrap();
        let first_best = scores.iter().find(|&&(_, s)| s == best).unwrap().0;
        assert_eq!(engine.best_move(&state), Some(first_best));
        assert_eq!(first_best, 0);
    }

    #[test]
    fn decision_reports_search_details() {
        let mut engine = SearchEngine::with_seed(Difficulty::Hard, 11);
        let decision = engine.decide(&board("X........")).unwrap();
        assert_eq!(decision.kind, DecisionKind::Searched);
        assert_eq!(decision.position, 4);
        assert_eq!(decision.score, Some(0));
        assert!(decision.nodes > 0);
    }

    #[test]
    fn easy_bypass_returns_empty_cells_only() {
        let state = board("X...O...X");
        let mut engine = SearchEngine::with_seed(Difficulty::Easy, 99);
        let mut bypassed = 0;
        for _ in 0..200 {
            let decision = engine.decide(&state).unwrap();
            assert!(state.is_empty(decision.position));
            if decision.kind == DecisionKind::RandomBypass {
                assert_eq!(decision.score, None);
                bypassed += 1;
            }
        }
        assert!(bypassed > 100 && bypassed < 180, "bypassed {bypassed}/200");
    }

    #[test]
    fn engine_can_play_x() {
        // ..O
        // .XO
        // ...   X to move must block at 8
        let state = board("..O|.XO|...:X");
        let engine = SearchEngine::with_seed(Difficulty::Hard, 0).with_side(Player::X);
        assert_eq!(engine.side(), Player::X);
        assert_eq!(engine.best_move(&state), Some(8));
    }
}
