//! Breadth-first reachability over Path cells

use std::collections::VecDeque;

use super::grid::{Coordinate, Grid};

/// BFS distance (in steps) from `origin` to every cell, `None` where
/// unreachable. Indexed row-major. Empty when `origin` is not a Path cell.
pub fn distances_from(grid: &Grid, origin: Coordinate) -> Vec<Option<usize>> {
    let mut distances = vec![None; grid.size() * grid.size()];
    let Some(origin_idx) = grid.index(origin).filter(|_| grid.is_path(origin)) else {
        return distances;
    };

    distances[origin_idx] = Some(0);
    let mut queue = VecDeque::from([origin]);

    while let Some(current) = queue.pop_front() {
        let Some(dist) = grid.index(current).and_then(|idx| distances[idx]) else {
            continue;
        };
        for next in grid.path_neighbors(current) {
            if let Some(idx) = grid.index(next)
                && distances[idx].is_none()
            {
                distances[idx] = Some(dist + 1);
                queue.push_back(next);
            }
        }
    }

    distances
}

/// Whether a Path-only route joins `from` and `to`
pub fn is_reachable(grid: &Grid, from: Coordinate, to: Coordinate) -> bool {
    let distances = distances_from(grid, from);
    grid.index(to)
        .and_then(|idx| distances[idx])
        .is_some()
}

/// Whether start reaches exit
pub fn is_connected(grid: &Grid) -> bool {
    is_reachable(grid, grid.start(), grid.exit())
}

/// Shortest Path-only route, endpoints included
pub fn shortest_path(grid: &Grid, from: Coordinate, to: Coordinate) -> Option<Vec<Coordinate>> {
    let distances = distances_from(grid, from);
    let mut remaining = grid.index(to).and_then(|idx| distances[idx])?;

    // Walk back downhill from `to`.
    let mut route = vec![to];
    let mut current = to;
    while remaining > 0 {
        current = grid.path_neighbors(current).find(|next| {
            grid.index(*next).and_then(|idx| distances[idx]) == Some(remaining - 1)
        })?;
        route.push(current);
        remaining -= 1;
    }
    route.reverse();
    Some(route)
}

/// Whether the Path component containing start is a tree: every pair of
/// reachable cells is joined by exactly one simple path.
pub fn is_perfect(grid: &Grid) -> bool {
    let distances = distances_from(grid, grid.start());
    let mut nodes = 0usize;
    let mut edges = 0usize;

    for coord in grid.coordinates() {
        let reachable = grid
            .index(coord)
            .and_then(|idx| distances[idx])
            .is_some();
        if !reachable {
            continue;
        }
        nodes += 1;
        // Count each undirected edge once, from its upper/left end.
        edges += [(1, 0), (0, 1)]
            .into_iter()
            .filter_map(|(dr, dc)| coord.offset(dr, dc))
            .filter(|next| grid.is_path(*next))
            .count();
    }

    nodes > 0 && edges + 1 == nodes
}

/// Route from `from` to `to` through interior cells that crosses the fewest
/// walls (0-1 BFS: Path costs nothing, Wall costs one). Returns the wall
/// cells that would have to be carved, or `None` if an endpoint is not
/// interior.
pub fn walls_to_carve(grid: &Grid, from: Coordinate, to: Coordinate) -> Option<Vec<Coordinate>> {
    if !grid.is_interior(from) || !grid.is_interior(to) {
        return None;
    }

    let size = grid.size();
    let mut cost = vec![usize::MAX; size * size];
    let mut parent: Vec<Option<Coordinate>> = vec![None; size * size];
    let from_idx = grid.index(from)?;
    cost[from_idx] = usize::from(!grid.is_path(from));

    let mut deque = VecDeque::from([from]);
    while let Some(current) = deque.pop_front() {
        let current_cost = cost[grid.index(current)?];
        if current == to {
            break;
        }
        for next in grid.neighbors(current) {
            if !grid.is_interior(next) {
                continue;
            }
            let step = usize::from(!grid.is_path(next));
            let idx = grid.index(next)?;
            if current_cost + step < cost[idx] {
                cost[idx] = current_cost + step;
                parent[idx] = Some(current);
                if step == 0 {
                    deque.push_front(next);
                } else {
                    deque.push_back(next);
                }
            }
        }
    }

    let mut walls = Vec::new();
    let mut current = to;
    loop {
        if !grid.is_path(current) {
            walls.push(current);
        }
        if current == from {
            break;
        }
        current = parent[grid.index(current)?]?;
    }
    walls.reverse();
    Some(walls)
}
