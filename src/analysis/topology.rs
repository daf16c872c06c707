//! Structural checks on generated mazes
//!
//! A maze is perfect when its open edges form a spanning tree over the grid.
//! These helpers verify the pieces of that claim separately so a failing check
//! points at the broken property.

use std::collections::VecDeque;

use crate::algorithm::bitset::CellSet;
use crate::spatial::{Direction, Grid, Position};

/// Number of open interior edges, each shared edge counted once
pub fn open_edge_count(grid: &Grid) -> usize {
    grid.positions()
        .map(|position| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter(|&direction| {
                    grid.contains(position.step(direction)) && !grid.wall_at(position, direction)
                })
                .count()
        })
        .sum()
}

/// Cells reachable from `origin` through open edges
///
/// Returns an empty set when `origin` lies outside the grid.
pub fn reachable_cells(grid: &Grid, origin: Position) -> CellSet {
    let mut reached = CellSet::for_grid(grid);
    if !reached.insert(origin) {
        return reached;
    }

    let mut queue = VecDeque::from([origin]);
    while let Some(position) = queue.pop_front() {
        for direction in Direction::ALL {
            let neighbour = position.step(direction);
            if !grid.wall_at(position, direction) && reached.insert(neighbour) {
                queue.push_back(neighbour);
            }
        }
    }

    reached
}

/// Whether every cell can reach every other cell
pub fn is_fully_connected(grid: &Grid) -> bool {
    grid.positions()
        .next()
        .is_none_or(|origin| reachable_cells(grid, origin).is_full())
}

/// Whether each interior edge reads the same from both of its cells
pub fn has_symmetric_walls(grid: &Grid) -> bool {
    grid.positions().all(|position| {
        [Direction::East, Direction::South]
            .into_iter()
            .all(|direction| {
                let neighbour = position.step(direction);
                !grid.contains(neighbour)
                    || grid.wall_at(position, direction)
                        == grid.wall_at(neighbour, direction.opposite())
            })
    })
}

/// Whether every edge on the outer border is walled
pub fn has_closed_boundary(grid: &Grid) -> bool {
    grid.positions().all(|position| {
        Direction::ALL.into_iter().all(|direction| {
            grid.contains(position.step(direction)) || grid.wall_at(position, direction)
        })
    })
}

/// Whether the maze is a spanning tree over its cells
pub fn is_perfect(grid: &Grid) -> bool {
    let expected_edges = grid.cell_count().saturating_sub(1);
    has_symmetric_walls(grid)
        && has_closed_boundary(grid)
        && open_edge_count(grid) == expected_edges
        && is_fully_connected(grid)
}

/// Cells with exactly one open edge
pub fn dead_ends(grid: &Grid) -> Vec<Position> {
    grid.positions()
        .filter(|&position| grid.walls(position).open_count() == 1)
        .collect()
}
