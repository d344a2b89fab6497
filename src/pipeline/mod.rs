//! Match pipeline
//!
//! This module provides:
//! - A runner that plays batches of engine-vs-opponent games
//! - Baseline opponents (random, optimal)
//! - Observers for progress, metrics and CSV export

pub mod matches;
pub mod observers;
pub mod opponents;

pub use matches::{MatchConfig, MatchRunner, MatchSummary};
pub use observers::{CsvObserver, GameRow, MetricsObserver, MetricsSummary, ProgressObserver};
pub use opponents::{OpponentKind, OptimalOpponent, RandomOpponent};

pub use crate::ports::{MatchObserver, Opponent};
