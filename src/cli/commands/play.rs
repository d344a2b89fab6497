//! Play command - interactive match against the engine on stdin/stdout

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    app::EngineConfig,
    cli::config::CommonArgs,
    search::{Difficulty, SearchEngine},
    tictactoe::{BoardState, Game, GameOutcome, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play a match against the engine")]
pub struct PlayArgs {
    /// Engine strength
    #[arg(long, short = 'd', value_enum, default_value_t = Difficulty::Hard)]
    pub difficulty: Difficulty,

    /// Let the engine open the match (the human opens by default)
    #[arg(long, conflicts_with = "human_first")]
    pub ai_first: bool,

    /// Human opens the match
    #[arg(long)]
    pub human_first: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = args.common.app();
    let mut engine = app.create_engine(EngineConfig::new(args.difficulty));
    let first = if args.ai_first { Player::O } else { Player::X };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = run_session(&mut engine, first, stdin.lock(), stdout.lock())?;

    if args.common.verbose {
        eprintln!("match finished: {}", outcome.label());
    }
    Ok(())
}

/// Drive one match: the human plays X through `input`, the engine plays O.
///
/// Cells are entered as 1-9, row by row. Returns the final outcome.
pub fn run_session<R: BufRead, W: Write>(
    engine: &mut SearchEngine,
    first: Player,
    mut input: R,
    mut output: W,
) -> Result<GameOutcome> {
    let mut game = Game::with_first_player(first);
    writeln!(output, "You are X, the engine is O ({}).", engine.difficulty())?;
    writeln!(output, "Cells are numbered 1-9, left to right, top to bottom.")?;

    loop {
        if let Some(outcome) = game.outcome() {
            writeln!(output, "\n{}", game.board())?;
            writeln!(output, "{}", describe(outcome))?;
            return Ok(outcome);
        }

        let board = game.board();
        if board.to_move == engine.side() {
            let position = engine
                .choose_move(&board)
                .context("engine found no move on a live board")?;
            game.play(position)?;
            writeln!(output, "\nEngine plays {}.", position + 1)?;
            continue;
        }

        writeln!(output, "\n{}", numbered(&board))?;
        write!(output, "Your move: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read move")? == 0 {
            bail!("input closed before the match ended");
        }
        match parse_cell(&line) {
            Some(position) => {
                if let Err(err) = game.play(position) {
                    writeln!(output, "{err}")?;
                }
            }
            None => writeln!(output, "Enter a number from 1 to 9.")?,
        }
    }
}

fn parse_cell(line: &str) -> Option<usize> {
    match line.trim().parse::<usize>() {
        Ok(n @ 1..=9) => Some(n - 1),
        _ => None,
    }
}

/// Board with empty cells shown as their 1-9 number
fn numbered(board: &BoardState) -> String {
    board
        .cells
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell.owner() {
                    Some(player) => player.to_string(),
                    None => (row * 3 + col + 1).to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Win(Player::X) => "You win!",
        GameOutcome::Win(Player::O) => "The engine wins.",
        GameOutcome::Draw => "Draw.",
    }
}
