//! Analyze command - per-move minimax scores and pruning effort

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::CommonArgs,
        output::{format_number, print_kv, print_section, print_subsection},
    },
    search::{Pruning, SearchStats, WIN_SCORE, score_moves},
    tictactoe::{BoardState, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Score every legal move of a position")]
pub struct AnalyzeArgs {
    /// Board as 9 cells of X, O or '.', rows optionally split by '|',
    /// with an optional ':X' / ':O' suffix for the side to move
    #[arg(long)]
    pub state: Option<String>,

    /// Side to score for (defaults to the side to move)
    #[arg(long)]
    pub side: Option<Player>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Scores under both search modes for one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionAnalysis {
    pub side: Player,
    pub scores: Vec<(usize, i32)>,
    pub pruned_nodes: u64,
    pub exhaustive_nodes: u64,
}

impl PositionAnalysis {
    /// Earliest cell with the highest score
    pub fn best(&self) -> Option<(usize, i32)> {
        self.scores
            .iter()
            .copied()
            .fold(None, |best, (pos, score)| match best {
                Some((_, best_score)) if score <= best_score => best,
                _ => Some((pos, score)),
            })
    }
}

/// Score `board` for `side` with and without pruning.
///
/// # Errors
///
/// Fails if the two modes disagree on any score.
pub fn analyze_position(board: &BoardState, side: Player) -> Result<PositionAnalysis> {
    let mut pruned = SearchStats::default();
    let mut exhaustive = SearchStats::default();
    let scores = score_moves(board, side, Pruning::AlphaBeta, &mut pruned);
    let reference = score_moves(board, side, Pruning::Exhaustive, &mut exhaustive);
    if scores != reference {
        anyhow::bail!("alpha-beta scores {scores:?} differ from minimax scores {reference:?}");
    }

    Ok(PositionAnalysis {
        side,
        scores,
        pruned_nodes: pruned.nodes,
        exhaustive_nodes: exhaustive.nodes,
    })
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let board = match &args.state {
        Some(text) => BoardState::from_string(text)
            .with_context(|| format!("could not parse board '{text}'"))?,
        None => BoardState::new(),
    };
    let side = args.side.unwrap_or(board.to_move);
    let analysis = analyze_position(&board, side)?;

    print_section("Position");
    println!("{board}");
    print_kv("Scoring for", &side.to_string());

    if analysis.scores.is_empty() {
        println!("\n  (position is terminal)");
        return Ok(());
    }

    print_subsection("Move scores");
    for &(pos, score) in &analysis.scores {
        println!("  cell {pos}: {score:>3}  {}", describe(score));
    }
    if let Some((pos, score)) = analysis.best() {
        print_kv("Best move", &format!("{pos} (score {score})"));
    }

    print_subsection("Search effort");
    print_kv("Alpha-beta nodes", &format_number(analysis.pruned_nodes));
    print_kv("Minimax nodes", &format_number(analysis.exhaustive_nodes));
    if analysis.exhaustive_nodes > 0 {
        let saved = 1.0 - analysis.pruned_nodes as f64 / analysis.exhaustive_nodes as f64;
        print_kv("Pruned away", &format!("{:.1}%", saved * 100.0));
    }
    if args.common.verbose && board.to_move != side {
        eprintln!("Note: scoring for {side} although {} is to move", board.to_move);
    }

    Ok(())
}

fn describe(score: i32) -> String {
    match score {
        0 => "draw".to_string(),
        s if s > 0 => format!("win at depth {}", WIN_SCORE - s),
        s => format!("loss at depth {}", WIN_SCORE + s),
    }
}
