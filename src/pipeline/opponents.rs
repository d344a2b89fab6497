//! Opponents the engine can be matched against

use std::fmt;

use clap::ValueEnum;
use rand::{SeedableRng, prelude::IndexedRandom, random, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Opponent,
    search::{Pruning, SearchEngine, SearchStats, score_moves},
    tictactoe::BoardState,
};

/// Built-in opponent kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    #[default]
    Random,
    Optimal,
}

impl OpponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpponentKind::Random => "random",
            OpponentKind::Optimal => "optimal",
        }
    }

    /// Build the opponent, seeded when `seed` is given
    pub fn build(self, seed: Option<u64>) -> Box<dyn Opponent> {
        let seed = seed.unwrap_or_else(random);
        match self {
            OpponentKind::Random => Box::new(RandomOpponent::with_seed(self.as_str(), seed)),
            OpponentKind::Optimal => Box::new(OptimalOpponent::with_seed(self.as_str(), seed)),
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniformly random legal moves (baseline)
pub struct RandomOpponent {
    name: String,
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Opponent for RandomOpponent {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(crate::Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Perfect play for whichever side is to move.
///
/// Among equally scored moves one is picked at random, so repeated matches
/// explore different optimal lines.
pub struct OptimalOpponent {
    name: String,
    rng: StdRng,
}

impl OptimalOpponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// All moves sharing the best score for the side to move
    pub fn optimal_moves(state: &BoardState) -> Vec<usize> {
        let mut stats = SearchStats::default();
        let scored = score_moves(state, state.to_move, Pruning::AlphaBeta, &mut stats);
        let Some(best) = scored.iter().map(|&(_, score)| score).max() else {
            return Vec::new();
        };
        scored
            .into_iter()
            .filter(|&(_, score)| score == best)
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl Opponent for OptimalOpponent {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        Self::optimal_moves(state)
            .choose(&mut self.rng)
            .copied()
            .ok_or(crate::Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// The engine itself as an opponent, for engine-vs-engine matches.
///
/// It always places its own side's mark, so pair it with the other side.
impl Opponent for SearchEngine<StdRng> {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        self.choose_move(state).ok_or(crate::Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "engine"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.reseed(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn kinds_build_named_opponents() {
        for kind in [OpponentKind::Random, OpponentKind::Optimal] {
            let opponent = kind.build(Some(3));
            assert_eq!(opponent.name(), kind.to_string());
        }
    }

    #[test]
    fn random_opponent_stays_legal() {
        let mut opponent = RandomOpponent::with_seed("random", 5);
        let state = BoardState::from_string("XO.|.X.|O..").unwrap();
        for _ in 0..50 {
            let pos = opponent.select_move(&state).unwrap();
            assert!(state.is_empty(pos));
        }
    }

    #[test]
    fn terminal_boards_have_no_moves() {
        let won = BoardState::from_string("XXX|OO.|...").unwrap();
        assert!(matches!(
            RandomOpponent::with_seed("random", 1).select_move(&won),
            Err(crate::Error::NoValidMoves)
        ));
        assert!(matches!(
            OptimalOpponent::with_seed("optimal", 1).select_move(&won),
            Err(crate::Error::NoValidMoves)
        ));
    }

    #[test]
    fn optimal_opponent_plays_side_to_move() {
        // X to move: win at 2 beats blocking at 5
        let state = BoardState::from_string("XX.|OO.|...:X").unwrap();
        assert_eq!(state.to_move, Player::X);
        assert_eq!(OptimalOpponent::optimal_moves(&state), vec![2]);
    }

    #[test]
    fn optimal_opening_replies_to_center_are_corners() {
        let state = BoardState::from_string("....X....").unwrap();
        assert_eq!(OptimalOpponent::optimal_moves(&state), vec![0, 2, 6, 8]);
    }
}
