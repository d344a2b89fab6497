//! Opponent port - anything that can answer a board with a move

use crate::{Result, tictactoe::BoardState};

/// A player the engine can be matched against.
///
/// # Examples
///
/// ```
/// use bemora::{ports::Opponent, tictactoe::BoardState};
///
/// /// Always takes the lowest free cell
/// struct FirstFree;
///
/// impl Opponent for FirstFree {
///     fn select_move(&mut self, state: &BoardState) -> bemora::Result<usize> {
///         state
///             .legal_moves()
///             .first()
///             .copied()
///             .ok_or(bemora::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
///
/// let mut opponent = FirstFree;
/// assert_eq!(opponent.select_move(&BoardState::new())?, 0);
/// # Ok::<(), bemora::Error>(())
/// ```
pub trait Opponent: Send {
    /// Pick a cell (0-8) for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] on a terminal board.
    fn select_move(&mut self, state: &BoardState) -> Result<usize>;

    /// Name used in summaries and exports
    fn name(&self) -> &str;

    /// Reseed the opponent's random source, if it has one.
    ///
    /// The match runner calls this when it was given a seed.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
