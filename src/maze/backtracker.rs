//! Recursive-backtracking carver
//!
//! Rooms sit on odd coordinates with wall pillars between them. The carver
//! walks an explicit stack from the start room, knocking through to a random
//! unvisited room two cells away and backing up at dead ends, until every
//! room is visited. The result is a perfect maze spanning all rooms.

use rand::{Rng, prelude::IndexedRandom};

use super::grid::{Coordinate, Direction, Grid};

/// A freshly carved perfect maze
#[derive(Debug, Clone)]
pub struct Carving {
    pub grid: Grid,
    /// Cells turned from Wall to Path after the start cell, one per carve.
    /// On an unaugmented carving `grid.path_count() - 1 == steps`.
    pub steps: usize,
}

/// Carve a perfect maze of the given size
///
/// # Errors
///
/// Returns [`crate::Error::InvalidGridSize`] for even or too-small sizes.
pub fn carve<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Carving, crate::Error> {
    let mut grid = Grid::walled(size)?;
    let start = grid.start();
    let mut visited = vec![false; size * size];
    let mut steps = 0;

    grid.carve(start);
    if let Some(idx) = grid.index(start) {
        visited[idx] = true;
    }
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let candidates: Vec<(Coordinate, Coordinate)> = Direction::ALL
            .into_iter()
            .filter_map(|dir| Some((current.step(dir, 1)?, current.step(dir, 2)?)))
            .filter(|(_, room)| grid.is_interior(*room))
            .filter(|(_, room)| grid.index(*room).is_some_and(|idx| !visited[idx]))
            .collect();

        let Some(&(wall, room)) = candidates.choose(rng) else {
            stack.pop();
            continue;
        };

        for cell in [wall, room] {
            if grid.carve(cell) {
                steps += 1;
            }
        }
        if let Some(idx) = grid.index(room) {
            visited[idx] = true;
        }
        stack.push(room);
    }

    Ok(Carving { grid, steps })
}
