//! Level-driven maze generation with a connectivity guarantee

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use rand::{Rng, SeedableRng, prelude::IndexedRandom, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    backtracker,
    grid::{Coordinate, Grid},
    patterns,
    reachability::{is_connected, walls_to_carve},
};

/// Regeneration attempts for patterns that can come out disconnected
pub const DEFAULT_MAX_ATTEMPTS: usize = 8;

/// Carving strategy behind a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MazeStyle {
    /// Perfect maze from recursive backtracking
    Backtracking,
    Spiral,
    /// Middle cross with scattered rooms
    Cross,
    /// Per-cell random fill
    Scatter,
}

impl MazeStyle {
    pub const ALL: [MazeStyle; 4] = [
        MazeStyle::Backtracking,
        MazeStyle::Spiral,
        MazeStyle::Cross,
        MazeStyle::Scatter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MazeStyle::Backtracking => "backtracking",
            MazeStyle::Spiral => "spiral",
            MazeStyle::Cross => "cross",
            MazeStyle::Scatter => "scatter",
        }
    }
}

impl fmt::Display for MazeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How levels map onto styles
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorMode {
    /// Every level is a backtracking maze
    #[default]
    Canonical,
    /// Levels cycle through backtracking, spiral, cross and scatter
    Themed,
}

impl GeneratorMode {
    pub fn style_for_level(self, level: usize) -> MazeStyle {
        match self {
            GeneratorMode::Canonical => MazeStyle::Backtracking,
            GeneratorMode::Themed => MazeStyle::ALL[level % MazeStyle::ALL.len()],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorMode::Canonical => "canonical",
            GeneratorMode::Themed => "themed",
        }
    }
}

impl fmt::Display for GeneratorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(GeneratorMode::Canonical),
            "themed" => Ok(GeneratorMode::Themed),
            _ => Err(crate::Error::ParseGeneratorMode {
                input: s.to_string(),
                expected: "canonical, themed".to_string(),
            }),
        }
    }
}

/// What happened while producing one grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub level: usize,
    pub style: MazeStyle,
    /// Carving attempts, including the accepted one
    pub attempts: usize,
    /// Wall cells opened by the repair pass (0 when no repair ran)
    pub repaired_cells: usize,
    /// Extra Path cells added for difficulty scaling
    pub extra_paths: usize,
    /// Carving steps of the backtracker, before augmentation
    pub carving_steps: Option<usize>,
}

impl GenerationReport {
    pub fn repaired(&self) -> bool {
        self.repaired_cells > 0
    }
}

/// Extra Path cells carved for `level`: none on level 0, then two per level,
/// capped at the grid size.
pub fn extra_paths_for_level(level: usize, size: usize) -> usize {
    level.saturating_mul(2).min(size)
}

/// Produces one playable maze per level.
///
/// ```
/// use bemora::maze::{MazeGenerator, is_connected};
///
/// let mut generator = MazeGenerator::with_seed(3);
/// let grid = generator.generate(0, 15)?;
/// assert!(is_connected(&grid));
/// # Ok::<(), bemora::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MazeGenerator<R = StdRng> {
    mode: GeneratorMode,
    max_attempts: usize,
    rng: R,
}

impl MazeGenerator<StdRng> {
    /// Canonical generator with an entropy-seeded random source
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for MazeGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self {
            mode: GeneratorMode::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rng,
        }
    }

    pub fn with_mode(mut self, mode: GeneratorMode) -> Self {
        self.mode = mode;
        self
    }

    /// At least one attempt is always made
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn mode(&self) -> GeneratorMode {
        self.mode
    }

    /// Generate the maze for `level`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidGridSize`] unless `size` is odd and at
    /// least 5.
    pub fn generate(&mut self, level: usize, size: usize) -> Result<Grid, crate::Error> {
        self.generate_with_report(level, size).map(|(grid, _)| grid)
    }

    /// Generate the maze for `level` and describe how it was built
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidGridSize`] for bad sizes and
    /// [`crate::Error::UnsolvableMaze`] if even the repair pass could not
    /// join start and exit.
    pub fn generate_with_report(
        &mut self,
        level: usize,
        size: usize,
    ) -> Result<(Grid, GenerationReport), crate::Error> {
        Grid::validate_size(size)?;
        let style = self.mode.style_for_level(level);

        let mut attempts = 0;
        let (mut grid, carving_steps) = loop {
            attempts += 1;
            let carved = self.carve(style, level, size)?;
            if is_connected(&carved.0) || attempts >= self.max_attempts {
                break carved;
            }
        };

        let repaired_cells = if is_connected(&grid) {
            0
        } else {
            repair(&mut grid).ok_or(crate::Error::UnsolvableMaze { attempts })?
        };
        if !is_connected(&grid) {
            return Err(crate::Error::UnsolvableMaze { attempts });
        }

        let extra_paths = self.augment(&mut grid, extra_paths_for_level(level, size));

        let report = GenerationReport {
            level,
            style,
            attempts,
            repaired_cells,
            extra_paths,
            carving_steps,
        };
        Ok((grid, report))
    }

    fn carve(
        &mut self,
        style: MazeStyle,
        level: usize,
        size: usize,
    ) -> Result<(Grid, Option<usize>), crate::Error> {
        let rng = &mut self.rng;
        match style {
            MazeStyle::Backtracking => {
                let carving = backtracker::carve(size, rng)?;
                Ok((carving.grid, Some(carving.steps)))
            }
            MazeStyle::Spiral => Ok((patterns::spiral(size, 1 + level / 4, rng)?, None)),
            MazeStyle::Cross => Ok((patterns::cross(size, 2 + level % 3, rng)?, None)),
            MazeStyle::Scatter => {
                let density = 0.65 - 0.02 * level.min(10) as f64;
                Ok((patterns::scatter(size, density, rng)?, None))
            }
        }
    }

    /// Open up to `count` interior walls that already touch a Path cell.
    /// Only adds Path, so reachability is preserved.
    fn augment(&mut self, grid: &mut Grid, count: usize) -> usize {
        if count == 0 {
            return 0;
        }

        let candidates: Vec<Coordinate> = grid
            .coordinates()
            .filter(|c| grid.is_interior(*c) && !grid.is_path(*c))
            .filter(|c| grid.path_neighbors(*c).next().is_some())
            .collect();
        let chosen: Vec<Coordinate> = candidates
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();

        chosen.into_iter().filter(|c| grid.carve(*c)).count()
    }
}

/// Carve the fewest walls that join start and exit. Returns the number of
/// cells opened, or `None` if no interior route exists.
fn repair(grid: &mut Grid) -> Option<usize> {
    let walls = walls_to_carve(grid, grid.start(), grid.exit())?;
    Some(walls.into_iter().filter(|wall| grid.carve(*wall)).count())
}

/// One-shot canonical generation with an entropy-seeded random source
///
/// # Errors
///
/// Returns [`crate::Error::InvalidGridSize`] for even or too-small sizes.
pub fn generate(level: usize, size: usize) -> Result<Grid, crate::Error> {
    MazeGenerator::new().generate(level, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::reachability::is_perfect;

    #[test]
    fn themed_mode_cycles_styles() {
        let styles: Vec<_> = (0..5)
            .map(|level| GeneratorMode::Themed.style_for_level(level))
            .collect();
        assert_eq!(
            styles,
            vec![
                MazeStyle::Backtracking,
                MazeStyle::Spiral,
                MazeStyle::Cross,
                MazeStyle::Scatter,
                MazeStyle::Backtracking
            ]
        );
        assert_eq!(
            GeneratorMode::Canonical.style_for_level(7),
            MazeStyle::Backtracking
        );
    }

    #[test]
    fn level_zero_is_an_unaugmented_perfect_maze() {
        let mut generator = MazeGenerator::with_seed(10);
        let (grid, report) = generator.generate_with_report(0, 15).unwrap();
        assert_eq!(report.extra_paths, 0);
        assert_eq!(report.attempts, 1);
        assert!(!report.repaired());
        assert_eq!(report.carving_steps, Some(grid.path_count() - 1));
        assert!(is_perfect(&grid));
    }

    #[test]
    fn higher_levels_add_bounded_extra_paths() {
        assert_eq!(extra_paths_for_level(0, 15), 0);
        assert_eq!(extra_paths_for_level(3, 15), 6);
        assert_eq!(extra_paths_for_level(40, 15), 15);

        let mut generator = MazeGenerator::with_seed(10);
        let (grid, report) = generator.generate_with_report(3, 15).unwrap();
        assert_eq!(report.extra_paths, 6);
        assert_eq!(
            grid.path_count(),
            report.carving_steps.unwrap() + 1 + report.extra_paths
        );
        assert!(is_connected(&grid));
    }

    #[test]
    fn scatter_failures_are_repaired() {
        // Density 0.65 on a 5x5 often leaves the start boxed in; with a
        // single attempt allowed the repair pass has to step in.
        let mut repaired = 0;
        for seed in 0..50 {
            let mut generator = MazeGenerator::with_seed(seed)
                .with_mode(GeneratorMode::Themed)
                .with_max_attempts(1);
            let (grid, report) = generator.generate_with_report(3, 5).unwrap();
            assert_eq!(report.style, MazeStyle::Scatter);
            assert!(is_connected(&grid), "seed {seed}");
            if report.repaired() {
                repaired += 1;
            }
        }
        assert!(repaired > 0, "expected at least one repair in 50 runs");
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        let mut generator = MazeGenerator::with_seed(0);
        for size in [3, 4, 14] {
            assert!(matches!(
                generator.generate(0, size),
                Err(crate::Error::InvalidGridSize { .. })
            ));
        }
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(
            "Themed".parse::<GeneratorMode>().unwrap(),
            GeneratorMode::Themed
        );
        assert!("chaotic".parse::<GeneratorMode>().is_err());
        assert_eq!(GeneratorMode::default().to_string(), "canonical");
    }
}
