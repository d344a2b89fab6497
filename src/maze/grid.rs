//! Maze grid representation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest grid that leaves room for a start, an exit and a wall between them
pub const MIN_GRID_SIZE: usize = 5;

/// Grid size used by the site's maze levels
pub const DEFAULT_GRID_SIZE: usize = 15;

/// A single maze square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    Wall,
    Path,
}

/// A `(row, col)` position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed offset; `None` if either component would go negative
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Coordinate> {
        Some(Coordinate {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    pub fn step(self, direction: Direction, distance: isize) -> Option<Coordinate> {
        let (d_row, d_col) = direction.delta();
        self.offset(d_row * distance, d_col * distance)
    }

    pub fn manhattan(self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Square maze of walls and paths with a fixed start and exit.
///
/// Start is `(1, 1)` and exit is `(size - 2, size - 2)`. The border is never
/// carved by the generators in this crate. Player position lives with the
/// caller, not in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord")]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
    start: Coordinate,
    exit: Coordinate,
}

/// Unchecked serialized form of [`Grid`]
#[derive(Deserialize)]
struct GridRecord {
    size: usize,
    tiles: Vec<Tile>,
    start: Coordinate,
    exit: Coordinate,
}

impl TryFrom<GridRecord> for Grid {
    type Error = crate::Error;

    fn try_from(record: GridRecord) -> Result<Self, Self::Error> {
        let mut grid = Grid::walled(record.size)?;
        if record.tiles.len() != grid.tiles.len() {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "grid of size {} needs {} tiles, got {}",
                    record.size,
                    grid.tiles.len(),
                    record.tiles.len()
                ),
            });
        }
        if record.start != grid.start || record.exit != grid.exit {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "grid endpoints must be {} and {}, got {} and {}",
                    grid.start, grid.exit, record.start, record.exit
                ),
            });
        }
        grid.tiles = record.tiles;
        Ok(grid)
    }
}

impl Grid {
    /// Check that `size` is odd and at least [`MIN_GRID_SIZE`]
    pub fn validate_size(size: usize) -> Result<(), crate::Error> {
        if size < MIN_GRID_SIZE || size.is_multiple_of(2) {
            return Err(crate::Error::InvalidGridSize {
                size,
                minimum: MIN_GRID_SIZE,
            });
        }
        Ok(())
    }

    /// A grid of solid walls
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidGridSize`] for even or too-small sizes.
    pub fn walled(size: usize) -> Result<Self, crate::Error> {
        Self::validate_size(size)?;
        Ok(Grid {
            size,
            tiles: vec![Tile::Wall; size * size],
            start: Coordinate::new(1, 1),
            exit: Coordinate::new(size - 2, size - 2),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn exit(&self) -> Coordinate {
        self.exit
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Inside the outer wall ring
    pub fn is_interior(&self, coord: Coordinate) -> bool {
        (1..self.size - 1).contains(&coord.row) && (1..self.size - 1).contains(&coord.col)
    }

    /// Bounds-check a coordinate
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] when the coordinate is off the grid.
    pub fn check(&self, coord: Coordinate) -> Result<Coordinate, crate::Error> {
        if self.contains(coord) {
            Ok(coord)
        } else {
            Err(crate::Error::OutOfBounds {
                row: coord.row,
                col: coord.col,
                size: self.size,
            })
        }
    }

    pub(crate) fn index(&self, coord: Coordinate) -> Option<usize> {
        self.contains(coord)
            .then_some(coord.row * self.size + coord.col)
    }

    pub fn tile(&self, coord: Coordinate) -> Option<Tile> {
        self.index(coord).and_then(|idx| self.tiles.get(idx).copied())
    }

    pub fn is_path(&self, coord: Coordinate) -> bool {
        self.tile(coord) == Some(Tile::Path)
    }

    /// A move onto `coord` is legal iff it is an on-grid Path cell
    pub fn is_passable(&self, coord: Coordinate) -> bool {
        self.is_path(coord)
    }

    /// Mark a cell as Path. Returns `true` if it was a wall; off-grid
    /// coordinates are ignored.
    pub fn carve(&mut self, coord: Coordinate) -> bool {
        self.set(coord, Tile::Path)
    }

    pub(crate) fn set(&mut self, coord: Coordinate, tile: Tile) -> bool {
        match self.index(coord) {
            Some(idx) if self.tiles[idx] != tile => {
                self.tiles[idx] = tile;
                true
            }
            _ => false,
        }
    }

    /// On-grid 4-neighbours of `coord`
    pub fn neighbors(&self, coord: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| coord.step(dir, 1))
            .filter(move |next| self.contains(*next))
    }

    /// 4-neighbours of `coord` that are Path
    pub fn path_neighbors(&self, coord: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        self.neighbors(coord).filter(move |next| self.is_path(*next))
    }

    pub fn path_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Path).count()
    }

    /// All Path cells in row-major order
    pub fn path_cells(&self) -> Vec<Coordinate> {
        self.coordinates().filter(|c| self.is_path(*c)).collect()
    }

    /// Every coordinate in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Coordinate::new(row, col)))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size)
    }

    /// Swap rows and columns. Start and exit sit on the diagonal, so they
    /// stay put.
    pub(crate) fn transpose(&mut self) {
        for row in 0..self.size {
            for col in (row + 1)..self.size {
                self.tiles.swap(row * self.size + col, col * self.size + row);
            }
        }
    }

    /// Text rendering with `route` cells drawn as `*`
    pub fn render_with(&self, route: &[Coordinate]) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for coord in self.coordinates() {
            let ch = if coord == self.start {
                'S'
            } else if coord == self.exit {
                'E'
            } else if route.contains(&coord) {
                '*'
            } else {
                match self.tile(coord) {
                    Some(Tile::Path) => '.',
                    _ => '#',
                }
            };
            out.push(ch);
            if coord.col + 1 == self.size && coord.row + 1 < self.size {
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&[]))
    }
}
