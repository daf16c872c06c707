//! Randomized depth-first backtracker producing perfect mazes
//!
//! The descent is driven by an explicit frame stack that replays the order of
//! the recursive formulation exactly: each frame shuffles its four directions
//! when the cell is entered and walks them with a cursor. Memory is bounded by
//! one frame per cell, independent of the thread's call stack.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::algorithm::bitset::CellSet;
use crate::io::configuration::{MAX_GRID_DIMENSION, START_INSET};
use crate::io::error::{Result, invalid_dimensions};
use crate::spatial::{Direction, Grid, Position};

/// Pending work for one cell of the descent
struct Frame {
    position: Position,
    directions: [Direction; 4],
    next: usize,
}

/// Seeded maze generator
///
/// Successive calls to [`MazeGenerator::generate`] continue the same random
/// stream, so a generator seeded once yields a reproducible sequence of mazes.
pub struct MazeGenerator {
    rng: StdRng,
}

impl MazeGenerator {
    /// Create a deterministic generator
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Carve a perfect maze into a fresh `rows` x `cols` grid
    ///
    /// The descent starts one cell in from the north-west corner, clamped into
    /// the grid when it is narrower than two cells.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MazeError::InvalidDimensions`] if either dimension is
    /// zero or exceeds [`MAX_GRID_DIMENSION`].
    pub fn generate(&mut self, rows: usize, cols: usize) -> Result<Grid> {
        validate_dimensions(rows, cols)?;

        let mut grid = Grid::new(rows, cols);
        let mut visited = CellSet::new(rows, cols);

        let origin = Position::new(
            START_INSET.min(cols as i32 - 1),
            START_INSET.min(rows as i32 - 1),
        );
        visited.insert(origin);

        let mut stack = vec![self.enter(origin)];
        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.directions.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let position = frame.position;
            let neighbour = position.step(direction);
            if grid.contains(neighbour) && visited.insert(neighbour) {
                grid.carve(position, direction);
                stack.push(self.enter(neighbour));
            }
        }

        log::debug!(
            "Generated {rows}x{cols} maze, {} cells reached",
            visited.count()
        );

        Ok(grid)
    }

    fn enter(&mut self, position: Position) -> Frame {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        Frame {
            position,
            directions,
            next: 0,
        }
    }
}

/// Generate a perfect maze from a seed
///
/// # Errors
///
/// Returns [`crate::MazeError::InvalidDimensions`] if either dimension is
/// zero or exceeds [`MAX_GRID_DIMENSION`].
pub fn generate(rows: usize, cols: usize, seed: u64) -> Result<Grid> {
    MazeGenerator::new(seed).generate(rows, cols)
}

fn validate_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(invalid_dimensions(
            rows,
            cols,
            &"grid must contain at least one cell",
        ));
    }
    if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
        return Err(invalid_dimensions(
            rows,
            cols,
            &format!("dimensions are limited to {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
