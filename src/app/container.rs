//! Factory for engines, generators and opponents.
//!
//! The app owns the default seed so a whole session (engine, opponent and
//! mazes) can be made reproducible from one number without the streams
//! sharing a generator.

use rand::rngs::StdRng;

use super::config::{EngineConfig, MazeConfig};
use crate::{
    maze::MazeGenerator,
    pipeline::OpponentKind,
    ports::Opponent,
    search::SearchEngine,
    utils::{derive_seed, seeded_rng},
};

const ENGINE_STREAM: u64 = 1;
const OPPONENT_STREAM: u64 = 2;
const MAZE_STREAM: u64 = 3;

/// Application factory.
///
/// # Examples
///
/// ```
/// use bemora::app::{App, EngineConfig};
/// use bemora::search::Difficulty;
/// use bemora::tictactoe::BoardState;
///
/// let app = App::for_testing().with_default_seed(7).build();
/// let mut engine = app.create_engine(EngineConfig::new(Difficulty::Hard));
/// assert_eq!(engine.choose_move(&BoardState::from_string("XX.|OO.|...:O")?), Some(5));
/// # Ok::<(), bemora::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// App without a default seed
    pub fn new() -> Self {
        Self { default_seed: None }
    }

    /// Builder for apps with controlled randomness
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    fn stream_seed(&self, explicit: Option<u64>, stream: u64) -> Option<u64> {
        explicit.or_else(|| self.default_seed.map(|seed| derive_seed(seed, stream)))
    }

    /// Create an engine. A seed in `config` wins over the app default.
    pub fn create_engine(&self, config: EngineConfig) -> SearchEngine<StdRng> {
        let rng = seeded_rng(self.stream_seed(config.seed, ENGINE_STREAM));
        SearchEngine::from_rng(config.difficulty, rng).with_side(config.side)
    }

    /// Create a maze generator. A seed in `config` wins over the app default.
    pub fn create_generator(&self, config: MazeConfig) -> MazeGenerator<StdRng> {
        let rng = seeded_rng(self.stream_seed(config.seed, MAZE_STREAM));
        MazeGenerator::from_rng(rng)
            .with_mode(config.mode)
            .with_max_attempts(config.max_attempts)
    }

    /// Create a baseline opponent
    pub fn create_opponent(&self, kind: OpponentKind, seed: Option<u64>) -> Box<dyn Opponent> {
        kind.build(self.stream_seed(seed, OPPONENT_STREAM))
    }
}

/// Builder for [`App`].
///
/// ```
/// use bemora::app::AppBuilder;
///
/// let app = AppBuilder::new().with_default_seed(42).build();
/// ```
#[derive(Debug, Default)]
pub struct AppBuilder {
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self { default_seed: None }
    }

    /// Seed every engine, generator and opponent created by the app
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn build(self) -> App {
        App {
            default_seed: self.default_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{maze::GeneratorMode, search::Difficulty, tictactoe::Player};

    #[test]
    fn engine_config_is_applied() {
        let app = App::new();
        let engine = app.create_engine(
            EngineConfig::new(Difficulty::Medium)
                .with_side(Player::X)
                .with_seed(1),
        );
        assert_eq!(engine.difficulty(), Difficulty::Medium);
        assert_eq!(engine.side(), Player::X);
    }

    #[test]
    fn default_seed_makes_mazes_repeatable() {
        let app = App::for_testing().with_default_seed(42).build();
        let config = MazeConfig::new(GeneratorMode::Themed);
        let a = app.create_generator(config).generate(2, 15).unwrap();
        let b = app.create_generator(config).generate(2, 15).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(42).build();
        let explicit = MazeConfig::default().with_seed(5);
        let from_app = app.create_generator(explicit).generate(0, 15).unwrap();
        let direct = MazeGenerator::with_seed(5).generate(0, 15).unwrap();
        assert_eq!(from_app, direct);
    }
}
