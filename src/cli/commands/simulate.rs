//! Simulate command - batches of engine-vs-opponent matches

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    analysis::BypassCalibration,
    app::EngineConfig,
    cli::{
        config::CommonArgs,
        output::{format_share, print_kv, print_section, print_subsection},
    },
    pipeline::{
        CsvObserver, MatchConfig, MatchRunner, MetricsObserver, OpponentKind, ProgressObserver,
    },
    search::Difficulty,
};

#[derive(Parser, Debug)]
#[command(about = "Run engine-vs-opponent matches and report statistics")]
pub struct SimulateArgs {
    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Engine strength
    #[arg(long, short = 'd', value_enum, default_value_t = Difficulty::Hard)]
    pub difficulty: Difficulty,

    /// Opponent type
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Let the engine open every game
    #[arg(long)]
    pub engine_first: bool,

    /// Write one CSV row per game
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    if args.games == 0 {
        return Err(anyhow!("--games must be at least 1"));
    }

    let app = args.common.app();
    let engine_config = EngineConfig::new(args.difficulty);
    let mut engine = app.create_engine(engine_config);
    let mut opponent = app.create_opponent(args.opponent, None);
    let first_player = if args.engine_first {
        engine_config.side
    } else {
        engine_config.side.opponent()
    };

    print_section("Simulation");
    print_kv("Games", &args.games.to_string());
    print_kv("Difficulty", args.difficulty.as_str());
    print_kv("Opponent", opponent.name());
    print_kv("Engine plays", &engine.side().to_string());
    print_kv("First player", &first_player.to_string());
    if let Some(seed) = args.common.seed {
        print_kv("Seed", &seed.to_string());
    }

    let config = MatchConfig {
        games: args.games,
        engine_player: engine.side(),
        first_player,
        seed: None,
    };
    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut runner = MatchRunner::new(config).with_observer(Box::new(Arc::clone(&metrics)));
    if !args.no_progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new(engine.side())));
    }
    if let Some(path) = &args.export {
        let csv = CsvObserver::new(path)
            .with_context(|| format!("failed to open export file {}", path.display()))?;
        runner = runner.with_observer(Box::new(csv));
    }

    let summary = runner.run(&mut engine, opponent.as_mut())?;
    let metrics = metrics
        .lock()
        .map_err(|_| anyhow!("metrics observer lock poisoned"))?
        .summary();

    print_section("Results");
    print_kv("Engine wins", &format_share(summary.wins, summary.win_rate()));
    print_kv("Draws", &format_share(summary.draws, summary.draw_rate()));
    print_kv("Engine losses", &format_share(summary.losses, summary.loss_rate()));
    print_kv("Avg game length", &format!("{:.2}", metrics.avg_game_length));
    print_kv(
        "Avg nodes/search",
        &format!("{:.0}", metrics.avg_nodes_per_search),
    );

    print_subsection("Difficulty bypass");
    let expected = args.difficulty.bypass_probability();
    print_kv("Expected rate", &format!("{:.1}%", expected * 100.0));
    print_kv(
        "Measured rate",
        &format_share(summary.bypassed_moves, summary.bypass_rate()),
    );
    if summary.engine_moves > 0 {
        let calibration = BypassCalibration::from_counts(
            args.difficulty,
            summary.bypassed_moves,
            summary.engine_moves,
            0.95,
        )?;
        let estimate = calibration.estimate;
        print_kv(
            "95% interval",
            &format!("[{:.3}, {:.3}]", estimate.lower, estimate.upper),
        );
        if !calibration.is_consistent() {
            eprintln!(
                "Warning: configured bypass rate {expected} is outside the 95% interval around the measured {:.3}",
                estimate.proportion
            );
        }
    }

    if let Some(path) = &args.export {
        println!("\nPer-game results exported to: {}", path.display());
    }
    if args.common.verbose && summary.losses > 0 && args.difficulty == Difficulty::Hard {
        eprintln!(
            "Warning: hard engine lost {} game(s) as {}",
            summary.losses,
            engine.side()
        );
    }

    Ok(())
}
