//! Maze levels
//!
//! Square odd-sized grids with a solid border, a start at `(1, 1)` and an exit
//! at `(size - 2, size - 2)`. Every grid handed out by [`MazeGenerator`] has a
//! Path-only route from start to exit.

pub mod backtracker;
pub mod generator;
pub mod grid;
pub mod patterns;
pub mod reachability;

pub use backtracker::{Carving, carve};
pub use generator::{
    DEFAULT_MAX_ATTEMPTS, GenerationReport, GeneratorMode, MazeGenerator, MazeStyle,
    extra_paths_for_level, generate,
};
pub use grid::{Coordinate, DEFAULT_GRID_SIZE, Direction, Grid, MIN_GRID_SIZE, Tile};
pub use reachability::{
    distances_from, is_connected, is_perfect, is_reachable, shortest_path, walls_to_carve,
};
