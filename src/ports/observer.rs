//! Observer port - hooks into a batch of matches
//!
//! Observers collect progress, metrics and exports without the runner
//! knowing about any output format.

use crate::{
    Result,
    search::MoveDecision,
    tictactoe::{BoardState, Game, Player},
};

/// Receives match events from [`crate::pipeline::MatchRunner`].
///
/// # Event Sequence
///
/// 1. `on_run_start(total_games)`
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` for every placed mark
///    - `on_game_end(game_num, game)`
/// 3. `on_run_end()`
///
/// Every method defaults to a no-op.
///
/// # Examples
///
/// ```
/// use bemora::{ports::MatchObserver, tictactoe::Game};
///
/// #[derive(Default)]
/// struct LengthTracker {
///     lengths: Vec<usize>,
/// }
///
/// impl MatchObserver for LengthTracker {
///     fn on_game_end(&mut self, _game_num: usize, game: &Game) -> bemora::Result<()> {
///         self.lengths.push(game.moves.len());
///         Ok(())
///     }
/// }
/// ```
pub trait MatchObserver: Send {
    fn on_run_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// `game_num` is 0-based
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a mark is chosen and before it is placed.
    ///
    /// `decision` is present for engine moves and `None` for the opponent.
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &BoardState,
        _player: Player,
        _position: usize,
        _decision: Option<&MoveDecision>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once the game is terminal
    fn on_game_end(&mut self, _game_num: usize, _game: &Game) -> Result<()> {
        Ok(())
    }

    /// Flush files and finish progress output
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
