//! End-to-end tests for match batches, the app container and CLI parsing

use std::sync::{Arc, Mutex};

use bemora::{
    app::{App, EngineConfig, MazeConfig},
    maze::GeneratorMode,
    pipeline::{
        CsvObserver, GameRow, MatchConfig, MatchRunner, MetricsObserver, OpponentKind,
        OptimalOpponent, RandomOpponent,
    },
    search::{Difficulty, SearchEngine},
    tictactoe::Player,
};

mod matches {
    use super::*;

    #[test]
    fn csv_export_has_one_row_per_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");

        let mut engine = SearchEngine::with_seed(Difficulty::Medium, 1);
        let mut opponent = RandomOpponent::with_seed("random", 2);
        let summary = MatchRunner::new(MatchConfig::default().with_games(10).with_seed(3))
            .with_observer(Box::new(CsvObserver::new(&path).unwrap()))
            .run(&mut engine, &mut opponent)
            .unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<GameRow> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 10);

        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.game, i);
            assert_eq!(row.first_player, Player::X);
            assert_eq!(row.moves.split('-').count(), row.length);
            assert!((5..=9).contains(&row.length));
            assert!(row.bypassed_moves <= row.engine_moves);
            assert_eq!(row.final_board.len(), 11);
        }

        let engine_moves: usize = rows.iter().map(|row| row.engine_moves).sum();
        let bypassed: usize = rows.iter().map(|row| row.bypassed_moves).sum();
        assert_eq!(engine_moves, summary.engine_moves);
        assert_eq!(bypassed, summary.bypassed_moves);
    }

    #[test]
    fn shared_metrics_agree_with_the_summary() {
        let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
        let mut engine = SearchEngine::with_seed(Difficulty::Hard, 0);
        let mut opponent = RandomOpponent::with_seed("random", 9);

        let summary = MatchRunner::new(MatchConfig::default().with_games(40))
            .with_observer(Box::new(Arc::clone(&metrics)))
            .run(&mut engine, &mut opponent)
            .unwrap();
        let metrics = metrics.lock().unwrap().summary();

        assert_eq!(metrics.total_games, 40);
        assert_eq!(metrics.o_wins, summary.wins);
        assert_eq!(metrics.x_wins, summary.losses);
        assert_eq!(metrics.draws, summary.draws);
        assert_eq!(summary.losses, 0);
        assert_eq!(metrics.bypassed_moves, 0);
        assert_eq!(metrics.searched_moves, summary.engine_moves);
        assert!(metrics.avg_game_length >= 5.0);
        assert!(metrics.avg_nodes_per_search > 0.0);
    }

    #[test]
    fn perfect_players_always_draw() {
        for first in [Player::X, Player::O] {
            let mut engine = SearchEngine::with_seed(Difficulty::Hard, 4);
            let mut opponent = OptimalOpponent::with_seed("optimal", 5);
            let summary = MatchRunner::new(
                MatchConfig::default().with_games(15).with_first_player(first),
            )
            .run(&mut engine, &mut opponent)
            .unwrap();
            assert_eq!(summary.draws, 15, "{first} opening");
        }
    }

    #[test]
    fn engine_can_play_x() {
        let mut engine = SearchEngine::with_seed(Difficulty::Hard, 0).with_side(Player::X);
        let mut opponent = RandomOpponent::with_seed("random", 1);
        let config = MatchConfig {
            engine_player: Player::X,
            ..MatchConfig::default().with_games(20)
        };
        let summary = MatchRunner::new(config)
            .run(&mut engine, &mut opponent)
            .unwrap();
        assert_eq!(summary.losses, 0);
        assert!(summary.wins > 0);
    }

    #[test]
    fn seeded_batches_repeat() {
        let run = || {
            let mut engine = SearchEngine::with_seed(Difficulty::Easy, 100);
            let mut opponent = RandomOpponent::with_seed("random", 200);
            MatchRunner::new(MatchConfig::default().with_games(25).with_seed(77))
                .run(&mut engine, &mut opponent)
                .unwrap()
        };
        assert_eq!(run(), run());
    }
}

mod container {
    use super::*;

    #[test]
    fn seeded_apps_build_identical_components() {
        let board = bemora::BoardState::from_string("X...O....").unwrap();
        let picks = || {
            let app = App::for_testing().with_default_seed(42).build();
            let mut engine = app.create_engine(EngineConfig::new(Difficulty::Easy));
            (0..20).map(|_| engine.choose_move(&board)).collect::<Vec<_>>()
        };
        assert_eq!(picks(), picks());

        let maze = || {
            App::for_testing()
                .with_default_seed(42)
                .build()
                .create_generator(MazeConfig::new(GeneratorMode::Themed))
                .generate(3, 11)
                .unwrap()
        };
        assert_eq!(maze(), maze());
    }

    #[test]
    fn created_opponent_plays_legal_moves() {
        let app = App::for_testing().with_default_seed(8).build();
        let board = bemora::BoardState::from_string("XO.|.X.|...").unwrap();
        for kind in [OpponentKind::Random, OpponentKind::Optimal] {
            let mut opponent = app.create_opponent(kind, None);
            let pos = opponent.select_move(&board).unwrap();
            assert!(board.is_empty(pos), "{kind}");
        }
    }
}

mod cli {
    use bemora::cli::commands::{
        analyze::AnalyzeArgs, maze::MazeArgs, play::PlayArgs, simulate::SimulateArgs,
    };
    use clap::Parser;

    use super::*;

    #[test]
    fn maze_flags() {
        let args =
            MazeArgs::try_parse_from(["maze", "--level", "3", "--mode", "themed", "--seed", "7"])
                .unwrap();
        assert_eq!(args.level, 3);
        assert_eq!(args.size, 15);
        assert_eq!(args.mode, GeneratorMode::Themed);
        assert_eq!(args.common.seed, Some(7));
        assert!(!args.solve);
    }

    #[test]
    fn simulate_defaults_and_overrides() {
        let args = SimulateArgs::try_parse_from(["simulate"]).unwrap();
        assert_eq!(args.games, 100);
        assert_eq!(args.difficulty, Difficulty::Hard);
        assert_eq!(args.opponent, OpponentKind::Random);

        let args = SimulateArgs::try_parse_from([
            "simulate", "-g", "12", "-d", "easy", "-o", "optimal", "--engine-first",
        ])
        .unwrap();
        assert_eq!(args.games, 12);
        assert_eq!(args.difficulty, Difficulty::Easy);
        assert_eq!(args.opponent, OpponentKind::Optimal);
        assert!(args.engine_first);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!(SimulateArgs::try_parse_from(["simulate", "-d", "impossible"]).is_err());
        assert!(PlayArgs::try_parse_from(["play", "--difficulty", "nightmare"]).is_err());
    }

    #[test]
    fn analyze_accepts_side() {
        let args = AnalyzeArgs::try_parse_from(["analyze", "--state", "X........", "--side", "O"])
            .unwrap();
        assert_eq!(args.state.as_deref(), Some("X........"));
        assert_eq!(args.side, Some(Player::O));
    }
}
