//! BEMORA CLI - play the tic-tac-toe engine, simulate matches and generate
//! maze levels

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bemora")]
#[command(version, about = "Game engines behind the BEMORA mini-games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play tic-tac-toe against the engine
    Play(bemora::cli::commands::play::PlayArgs),

    /// Simulate engine-vs-opponent matches
    Simulate(bemora::cli::commands::simulate::SimulateArgs),

    /// Generate a maze level
    Maze(bemora::cli::commands::maze::MazeArgs),

    /// Score the legal moves of a position
    Analyze(bemora::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => bemora::cli::commands::play::execute(args),
        Commands::Simulate(args) => bemora::cli::commands::simulate::execute(args),
        Commands::Maze(args) => bemora::cli::commands::maze::execute(args),
        Commands::Analyze(args) => bemora::cli::commands::analyze::execute(args),
    }
}
