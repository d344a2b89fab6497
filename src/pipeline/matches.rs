//! Engine-vs-opponent match runner

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{MatchObserver, Opponent},
    search::{DecisionKind, SearchEngine},
    tictactoe::{Game, GameOutcome, Player},
};

/// Match batch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games to play
    pub games: usize,

    /// Side the engine plays; must match the engine's configured side
    pub engine_player: Player,

    /// Which side opens every game
    pub first_player: Player,

    /// Random seed for engine and opponent
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            engine_player: Player::O,
            first_player: Player::X,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Totals from the engine's point of view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// Moves the engine made
    pub engine_moves: usize,
    /// Engine moves that came from the difficulty bypass
    pub bypassed_moves: usize,
}

impl MatchSummary {
    fn rate(count: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        Self::rate(self.wins, self.total_games)
    }

    pub fn draw_rate(&self) -> f64 {
        Self::rate(self.draws, self.total_games)
    }

    pub fn loss_rate(&self) -> f64 {
        Self::rate(self.losses, self.total_games)
    }

    /// Share of engine moves that skipped the search
    pub fn bypass_rate(&self) -> f64 {
        Self::rate(self.bypassed_moves, self.engine_moves)
    }

    fn record(&mut self, outcome: GameOutcome, engine_player: Player) {
        self.total_games += 1;
        match outcome {
            GameOutcome::Win(winner) if winner == engine_player => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Plays a batch of games between a [`SearchEngine`] and an [`Opponent`],
/// reporting every step to the attached observers.
pub struct MatchRunner {
    config: MatchConfig,
    observers: Vec<Box<dyn MatchObserver>>,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn MatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run every configured game
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the engine plays a
    /// different side than `engine_player`, and propagates opponent and
    /// observer failures.
    pub fn run(
        &mut self,
        engine: &mut SearchEngine<StdRng>,
        opponent: &mut dyn Opponent,
    ) -> Result<MatchSummary> {
        if engine.side() != self.config.engine_player {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "engine plays {} but the match expects it to play {}",
                    engine.side(),
                    self.config.engine_player
                ),
            });
        }
        if let Some(seed) = self.config.seed {
            engine.reseed(seed);
            opponent.set_rng_seed(seed.wrapping_add(1));
        }

        for observer in &mut self.observers {
            observer.on_run_start(self.config.games)?;
        }

        let mut summary = MatchSummary::default();
        for game_num in 0..self.config.games {
            let game = self.play_game(game_num, engine, opponent, &mut summary)?;
            let outcome = game.outcome().ok_or(crate::Error::NoValidMoves)?;
            summary.record(outcome, self.config.engine_player);

            for observer in &mut self.observers {
                observer.on_game_end(game_num, &game)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(summary)
    }

    fn play_game(
        &mut self,
        game_num: usize,
        engine: &mut SearchEngine<StdRng>,
        opponent: &mut dyn Opponent,
        summary: &mut MatchSummary,
    ) -> Result<Game> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let mut game = Game::with_first_player(self.config.first_player);
        let mut step_num = 0;

        while game.outcome().is_none() {
            let state = game.board();
            let player = state.to_move;

            let (position, decision) = if player == self.config.engine_player {
                let decision = engine.decide(&state).ok_or(crate::Error::NoValidMoves)?;
                summary.engine_moves += 1;
                if decision.kind == DecisionKind::RandomBypass {
                    summary.bypassed_moves += 1;
                }
                (decision.position, Some(decision))
            } else {
                (opponent.select_move(&state)?, None)
            };

            for observer in &mut self.observers {
                observer.on_move(
                    game_num,
                    step_num,
                    &state,
                    player,
                    position,
                    decision.as_ref(),
                )?;
            }

            game.play(position)?;
            step_num += 1;
        }

        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::opponents::{OptimalOpponent, RandomOpponent},
        search::Difficulty,
    };

    #[test]
    fn hard_engine_never_loses_to_random() {
        let mut runner = MatchRunner::new(MatchConfig::default().with_games(30).with_seed(42));
        let mut engine = SearchEngine::with_seed(Difficulty::Hard, 0);
        let mut opponent = RandomOpponent::new("random");

        let summary = runner.run(&mut engine, &mut opponent).unwrap();
        assert_eq!(summary.total_games, 30);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.wins + summary.draws, 30);
        assert_eq!(summary.bypassed_moves, 0);
        assert!(summary.engine_moves >= 30 * 3);
    }

    #[test]
    fn hard_engine_draws_optimal_play() {
        let config = MatchConfig::default()
            .with_games(10)
            .with_first_player(Player::O)
            .with_seed(7);
        let mut runner = MatchRunner::new(config);
        let mut engine = SearchEngine::with_seed(Difficulty::Hard, 0);
        let mut opponent = OptimalOpponent::new("optimal");

        let summary = runner.run(&mut engine, &mut opponent).unwrap();
        assert_eq!(summary.draws, 10);
    }

    #[test]
    fn side_mismatch_is_rejected() {
        let config = MatchConfig {
            engine_player: Player::X,
            ..MatchConfig::default()
        };
        let mut runner = MatchRunner::new(config);
        let mut engine = SearchEngine::with_seed(Difficulty::Hard, 0);
        let mut opponent = RandomOpponent::with_seed("random", 1);
        assert!(matches!(
            runner.run(&mut engine, &mut opponent),
            Err(crate::Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn seeded_runs_repeat() {
        let run = || {
            let mut runner =
                MatchRunner::new(MatchConfig::default().with_games(20).with_seed(3));
            let mut engine = SearchEngine::with_seed(Difficulty::Easy, 99);
            let mut opponent = RandomOpponent::new("random");
            runner.run(&mut engine, &mut opponent).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn rates_handle_empty_summary() {
        let summary = MatchSummary::default();
        assert_eq!(summary.win_rate(), 0.0);
        assert_eq!(summary.bypass_rate(), 0.0);
    }
}
