use bitvec::prelude::*;
use std::fmt;

use crate::spatial::{Grid, Position};

/// Fixed-size set of grid cells backed by a bitset
///
/// Positions are mapped to row-major indices. Positions outside the grid
/// the set was sized for are never members and are ignored on insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellSet {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl CellSet {
    /// Create an empty set for a `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create an empty set sized for `grid`
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        let row = usize::try_from(position.y).ok()?;
        let col = usize::try_from(position.x).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Insert a position, returning `true` if it was not yet a member
    pub fn insert(&mut self, position: Position) -> bool {
        let Some(index) = self.index_of(position) else {
            return false;
        };
        !self.bits.replace(index, true)
    }

    /// Test membership
    pub fn contains(&self, position: Position) -> bool {
        self.index_of(position)
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Test if no cell is present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Test if every cell is present
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Member positions in row-major order
    pub fn positions(&self) -> Vec<Position> {
        let cols = self.cols.max(1);
        self.bits
            .iter_ones()
            .map(|index| Position::new((index % cols) as i32, (index / cols) as i32))
            .collect()
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CellSet({}/{} cells)",
            self.count(),
            self.rows * self.cols
        )
    }
}
