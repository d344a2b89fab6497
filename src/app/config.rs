//! Configuration types for engine and maze creation.

use serde::{Deserialize, Serialize};

use crate::{
    maze::{DEFAULT_MAX_ATTEMPTS, GeneratorMode},
    search::Difficulty,
    tictactoe::Player,
};

/// Configuration for a [`crate::search::SearchEngine`].
///
/// # Examples
///
/// ```
/// use bemora::app::EngineConfig;
/// use bemora::search::Difficulty;
/// use bemora::tictactoe::Player;
///
/// let config = EngineConfig::new(Difficulty::Medium)
///     .with_side(Player::X)
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    /// Side the engine plays (maximizes for)
    pub side: Player,
    /// Random seed for the bypass; `None` falls back to the app default
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Engine playing O at the given difficulty
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            side: Player::O,
            seed: None,
        }
    }

    pub fn with_side(mut self, side: Player) -> Self {
        self.side = side;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

/// Configuration for a [`crate::maze::MazeGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub mode: GeneratorMode,
    /// Regeneration attempts before the repair pass
    pub max_attempts: usize,
    pub seed: Option<u64>,
}

impl MazeConfig {
    pub fn new(mode: GeneratorMode) -> Self {
        Self {
            mode,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::new(GeneratorMode::default())
    }
}
