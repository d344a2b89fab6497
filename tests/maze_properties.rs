//! Structural guarantees of generated maze levels

use std::collections::HashSet;

use bemora::{
    Error,
    maze::{
        Coordinate, GeneratorMode, MazeGenerator, MazeStyle, Tile, is_connected, is_perfect,
        shortest_path,
    },
};

const SIZES: [usize; 6] = [5, 7, 9, 11, 15, 21];
const SEEDS: [u64; 4] = [0, 1, 42, 9_001];

mod connectivity {
    use super::*;

    fn assert_all_connected(mode: GeneratorMode) {
        for seed in SEEDS {
            let mut generator = MazeGenerator::with_seed(seed).with_mode(mode);
            for size in SIZES {
                for level in 0..12 {
                    let (grid, report) = generator.generate_with_report(level, size).unwrap();
                    assert!(
                        is_connected(&grid),
                        "{mode} seed {seed} size {size} level {level} ({})",
                        report.style
                    );
                    assert_eq!(grid.size(), size);
                    assert_eq!(grid.tile(grid.start()), Some(Tile::Path));
                    assert_eq!(grid.tile(grid.exit()), Some(Tile::Path));
                }
            }
        }
    }

    #[test]
    fn canonical_levels_are_always_solvable() {
        assert_all_connected(GeneratorMode::Canonical);
    }

    #[test]
    fn themed_levels_are_always_solvable() {
        assert_all_connected(GeneratorMode::Themed);
    }

    #[test]
    fn single_attempt_falls_back_to_repair() {
        for seed in SEEDS {
            let mut generator = MazeGenerator::with_seed(seed)
                .with_mode(GeneratorMode::Themed)
                .with_max_attempts(1);
            for level in 0..8 {
                let (grid, report) = generator.generate_with_report(level, 11).unwrap();
                assert_eq!(report.attempts, 1);
                assert!(is_connected(&grid), "seed {seed} level {level}");
            }
        }
    }

    #[test]
    fn border_stays_solid() {
        let mut generator = MazeGenerator::with_seed(5).with_mode(GeneratorMode::Themed);
        for level in 0..8 {
            let grid = generator.generate(level, 13).unwrap();
            let last = grid.size() - 1;
            for i in 0..grid.size() {
                for coord in [
                    Coordinate::new(0, i),
                    Coordinate::new(last, i),
                    Coordinate::new(i, 0),
                    Coordinate::new(i, last),
                ] {
                    assert_eq!(grid.tile(coord), Some(Tile::Wall), "level {level} {coord}");
                }
            }
        }
    }
}

mod backtracking {
    use super::*;

    #[test]
    fn level_zero_is_a_perfect_maze() {
        for seed in SEEDS {
            let mut generator = MazeGenerator::with_seed(seed);
            for size in SIZES {
                let (grid, report) = generator.generate_with_report(0, size).unwrap();
                assert_eq!(report.style, MazeStyle::Backtracking);
                assert_eq!(report.extra_paths, 0);
                assert!(is_perfect(&grid), "seed {seed} size {size}");
                assert_eq!(report.carving_steps, Some(grid.path_count() - 1));
            }
        }
    }

    #[test]
    fn smallest_maze_has_a_short_route() {
        for seed in 0..20 {
            let grid = MazeGenerator::with_seed(seed).generate(0, 5).unwrap();
            let route = shortest_path(&grid, grid.start(), grid.exit()).unwrap();
            assert_eq!(route.first(), Some(&Coordinate::new(1, 1)));
            assert_eq!(route.last(), Some(&Coordinate::new(3, 3)));
            assert!(route.len() <= 8, "seed {seed}: {} cells", route.len());
        }
    }
}

mod augmentation {
    use super::*;

    fn path_set(level: usize, seed: u64, size: usize) -> HashSet<Coordinate> {
        MazeGenerator::with_seed(seed)
            .generate(level, size)
            .unwrap()
            .path_cells()
            .into_iter()
            .collect()
    }

    #[test]
    fn higher_levels_only_add_path() {
        for seed in SEEDS {
            let base = path_set(0, seed, 15);
            for level in 1..10 {
                let opened = path_set(level, seed, 15);
                assert!(base.is_subset(&opened), "seed {seed} level {level}");
                assert!(opened.len() > base.len());
                assert!(opened.len() - base.len() <= 2 * level);
            }
        }
    }

    #[test]
    fn extra_paths_are_reported() {
        let (grid, report) = MazeGenerator::with_seed(3).generate_with_report(4, 15).unwrap();
        let base = MazeGenerator::with_seed(3).generate(0, 15).unwrap();
        assert_eq!(report.extra_paths, 8);
        assert_eq!(report.extra_paths, grid.path_count() - base.path_count());
    }
}

mod rejection {
    use super::*;

    #[test]
    fn even_and_tiny_sizes_are_refused() {
        let mut generator = MazeGenerator::with_seed(0);
        for size in [0, 3, 4, 10] {
            assert!(matches!(
                generator.generate(0, size),
                Err(Error::InvalidGridSize { .. })
            ));
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::with_seed(11)
            .with_mode(GeneratorMode::Themed)
            .generate(6, 15)
            .unwrap();
        let b = MazeGenerator::with_seed(11)
            .with_mode(GeneratorMode::Themed)
            .generate(6, 15)
            .unwrap();
        assert_eq!(a, b);
    }
}
