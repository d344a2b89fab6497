//! Themed carving patterns for the later maze levels
//!
//! Unlike the backtracker these do not all connect start to exit on their
//! own. Each pattern forces the endpoints open; the generator then checks
//! reachability and retries or repairs.

use rand::{Rng, prelude::IndexedRandom};

use super::grid::{Coordinate, Grid};

/// Open start, exit and the two exit neighbours that face the interior
pub fn open_endpoints(grid: &mut Grid) {
    let exit = grid.exit();
    let start = grid.start();
    grid.carve(start);
    grid.carve(exit);
    for near in [exit.offset(-1, 0), exit.offset(0, -1)].into_iter().flatten() {
        grid.carve(near);
    }
}

fn carve_segment(grid: &mut Grid, from: Coordinate, to: Coordinate) {
    let (r0, r1) = (from.row.min(to.row), from.row.max(to.row));
    let (c0, c1) = (from.col.min(to.col), from.col.max(to.col));
    for row in r0..=r1 {
        for col in c0..=c1 {
            grid.carve(Coordinate::new(row, col));
        }
    }
}

/// Corners of an inward rectangular spiral on odd rows and columns,
/// starting at `(1, 1)`
fn spiral_corners(size: usize) -> Vec<Coordinate> {
    let (mut top, mut bottom, mut left, mut right) = (1isize, size as isize - 2, 1isize, size as isize - 2);
    let mut corners = vec![(top, left)];

    loop {
        if left > right {
            break;
        }
        corners.push((top, right));
        top += 2;
        if top > bottom {
            break;
        }
        corners.push((bottom, right));
        right -= 2;
        if left > right {
            break;
        }
        corners.push((bottom, left));
        bottom -= 2;
        if top > bottom {
            break;
        }
        corners.push((top, left));
        left += 2;
    }

    corners
        .into_iter()
        .map(|(row, col)| Coordinate::new(row as usize, col as usize))
        .collect()
}

/// Inward spiral corridor. Randomly transposed, with `shortcuts` extra gaps
/// knocked through the walls between neighbouring turns.
pub fn spiral<R: Rng + ?Sized>(
    size: usize,
    shortcuts: usize,
    rng: &mut R,
) -> Result<Grid, crate::Error> {
    let mut grid = Grid::walled(size)?;
    let corners = spiral_corners(size);
    for pair in corners.windows(2) {
        carve_segment(&mut grid, pair[0], pair[1]);
    }

    // Interior walls with a Path cell on two opposite sides join two
    // stretches of the corridor.
    let gaps: Vec<Coordinate> = grid
        .coordinates()
        .filter(|c| grid.is_interior(*c) && !grid.is_path(*c))
        .filter(|c| {
            let vertical = [c.offset(-1, 0), c.offset(1, 0)];
            let horizontal = [c.offset(0, -1), c.offset(0, 1)];
            [vertical, horizontal].iter().any(|pair| {
                pair.iter()
                    .all(|side| side.is_some_and(|side| grid.is_path(side)))
            })
        })
        .collect();
    for gap in gaps.choose_multiple(rng, shortcuts).copied().collect::<Vec<_>>() {
        grid.carve(gap);
    }

    if rng.random_bool(0.5) {
        grid.transpose();
    }
    open_endpoints(&mut grid);
    Ok(grid)
}

/// A full-width row and full-height column through the middle, plus
/// `rooms` random 3x3 rooms.
pub fn cross<R: Rng + ?Sized>(size: usize, rooms: usize, rng: &mut R) -> Result<Grid, crate::Error> {
    let mut grid = Grid::walled(size)?;
    let mid = size / 2;
    carve_segment(&mut grid, Coordinate::new(mid, 1), Coordinate::new(mid, size - 2));
    carve_segment(&mut grid, Coordinate::new(1, mid), Coordinate::new(size - 2, mid));

    let centers: Vec<usize> = (2..size - 2).collect();
    for _ in 0..rooms {
        let (Some(&row), Some(&col)) = (centers.choose(rng), centers.choose(rng)) else {
            break;
        };
        carve_segment(
            &mut grid,
            Coordinate::new(row - 1, col - 1),
            Coordinate::new(row + 1, col + 1),
        );
    }

    open_endpoints(&mut grid);
    Ok(grid)
}

/// Each interior cell becomes Path with probability `density`
pub fn scatter<R: Rng + ?Sized>(size: usize, density: f64, rng: &mut R) -> Result<Grid, crate::Error> {
    if !(0.0..=1.0).contains(&density) {
        return Err(crate::Error::InvalidConfiguration {
            message: format!("scatter density {density} must lie in [0, 1]"),
        });
    }

    let mut grid = Grid::walled(size)?;
    let interior: Vec<Coordinate> = grid.coordinates().filter(|c| grid.is_interior(*c)).collect();
    for cell in interior {
        if rng.random_bool(density) {
            grid.carve(cell);
        }
    }

    open_endpoints(&mut grid);
    Ok(grid)
}
