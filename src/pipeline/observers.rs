//! Observers for match batches
//!
//! Observers collect progress, metrics and exports while the runner plays,
//! without coupling the runner to any output format.

use std::{
    fs::File,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::MatchObserver,
    search::{DecisionKind, MoveDecision},
    tictactoe::{BoardState, Game, GameOutcome, Player},
};

/// Shared observer: the runner holds one handle, the caller keeps another
/// to read results after the run.
impl<T: MatchObserver> MatchObserver for Arc<Mutex<T>> {
    fn on_run_start(&mut self, total_games: usize) -> Result<()> {
        lock(self)?.on_run_start(total_games)
    }

    fn on_game_start(&mut self, game_num: usize) -> Result<()> {
        lock(self)?.on_game_start(game_num)
    }

    fn on_move(
        &mut self,
        game_num: usize,
        step_num: usize,
        state: &BoardState,
        player: Player,
        position: usize,
        decision: Option<&MoveDecision>,
    ) -> Result<()> {
        lock(self)?.on_move(game_num, step_num, state, player, position, decision)
    }

    fn on_game_end(&mut self, game_num: usize, game: &Game) -> Result<()> {
        lock(self)?.on_game_end(game_num, game)
    }

    fn on_run_end(&mut self) -> Result<()> {
        lock(self)?.on_run_end()
    }
}

fn lock<T>(shared: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    shared.lock().map_err(|_| crate::Error::InvalidConfiguration {
        message: "shared observer lock poisoned".to_string(),
    })
}

/// Progress bar observer - shows games played and the engine's W/D/L
pub struct ProgressObserver {
    engine_player: Player,
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new(engine_player: Player) -> Self {
        Self {
            engine_player,
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl MatchObserver for ProgressObserver {
    fn on_run_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, game: &Game) -> Result<()> {
        match game.outcome() {
            Some(GameOutcome::Win(winner)) if winner == self.engine_player => self.wins += 1,
            Some(GameOutcome::Win(_)) => self.losses += 1,
            Some(GameOutcome::Draw) => self.draws += 1,
            None => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - outcome counts, game lengths and search effort
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    move_counts: Vec<usize>,
    searched_moves: usize,
    bypassed_moves: usize,
    nodes: u64,
}

/// Snapshot of [`MetricsObserver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub avg_game_length: f64,
    pub searched_moves: usize,
    pub bypassed_moves: usize,
    /// Mean nodes visited per searched move
    pub avg_nodes_per_search: f64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        let avg_nodes_per_search = if self.searched_moves == 0 {
            0.0
        } else {
            self.nodes as f64 / self.searched_moves as f64
        };
        MetricsSummary {
            total_games: self.total_games(),
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            avg_game_length: self.avg_game_length(),
            searched_moves: self.searched_moves,
            bypassed_moves: self.bypassed_moves,
            avg_nodes_per_search,
        }
    }
}

impl MatchObserver for MetricsObserver {
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &BoardState,
        _player: Player,
        _position: usize,
        decision: Option<&MoveDecision>,
    ) -> Result<()> {
        match decision.map(|d| (d.kind, d.nodes)) {
            Some((DecisionKind::Searched, nodes)) => {
                self.searched_moves += 1;
                self.nodes += nodes;
            }
            Some((DecisionKind::RandomBypass, _)) => self.bypassed_moves += 1,
            None => {}
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, game: &Game) -> Result<()> {
        self.move_counts.push(game.moves.len());
        match game.outcome() {
            Some(GameOutcome::Win(Player::X)) => self.x_wins += 1,
            Some(GameOutcome::Win(Player::O)) => self.o_wins += 1,
            Some(GameOutcome::Draw) => self.draws += 1,
            None => {}
        }
        Ok(())
    }
}

/// One row of the per-game CSV export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRow {
    pub game: usize,
    pub first_player: Player,
    pub outcome: String,
    /// Cell indices joined with `-`, in play order
    pub moves: String,
    pub length: usize,
    pub engine_moves: usize,
    pub bypassed_moves: usize,
    pub final_board: String,
}

/// CSV observer - writes one [`GameRow`] per finished game
pub struct CsvObserver {
    writer: csv::Writer<File>,
    engine_moves: usize,
    bypassed_moves: usize,
}

impl CsvObserver {
    /// Create the export file, truncating any existing one
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: csv::Writer::from_writer(file),
            engine_moves: 0,
            bypassed_moves: 0,
        })
    }
}

impl MatchObserver for CsvObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.engine_moves = 0;
        self.bypassed_moves = 0;
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &BoardState,
        _player: Player,
        _position: usize,
        decision: Option<&MoveDecision>,
    ) -> Result<()> {
        if let Some(decision) = decision {
            self.engine_moves += 1;
            if decision.kind == DecisionKind::RandomBypass {
                self.bypassed_moves += 1;
            }
        }
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, game: &Game) -> Result<()> {
        let moves = game
            .positions()
            .iter()
            .map(|pos| pos.to_string())
            .collect::<Vec<_>>()
            .join("-");
        let row = GameRow {
            game: game_num,
            first_player: game.initial.to_move,
            outcome: game
                .outcome()
                .map_or("unfinished", GameOutcome::label)
                .to_string(),
            moves,
            length: game.moves.len(),
            engine_moves: self.engine_moves,
            bypassed_moves: self.bypassed_moves,
            final_board: game.board().encode(),
        };
        self.writer.serialize(row)?;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
