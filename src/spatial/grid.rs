//! Cell and grid model shared by the true maze and the robot's discovered maze
//!
//! Cells are stored row-major in an `ndarray` matrix indexed `[y, x]`. Every
//! query taking a [`Position`] tolerates coordinates outside the grid: walls
//! there read as closed and nothing is ever written.

use std::fmt;

use ndarray::Array2;

use crate::spatial::direction::Direction;

/// Cell coordinates, `x` is the column and `y` the row
///
/// Signed so that the neighbour of a border cell is still representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Column index
    pub x: i32,
    /// Row index, growing southwards
    pub y: i32,
}

impl Position {
    /// Create a position from column and row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Adjacent position one cell away in `direction`
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Wall flags on the four edges of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walls {
    /// Edge shared with the cell above
    pub north: bool,
    /// Edge shared with the cell to the right
    pub east: bool,
    /// Edge shared with the cell below
    pub south: bool,
    /// Edge shared with the cell to the left
    pub west: bool,
}

impl Walls {
    /// Every edge walled
    pub const CLOSED: Self = Self {
        north: true,
        east: true,
        south: true,
        west: true,
    };

    /// Whether the edge in `direction` is walled
    pub const fn get(self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Set or clear the edge in `direction`
    pub const fn set(&mut self, direction: Direction, walled: bool) {
        match direction {
            Direction::North => self.north = walled,
            Direction::East => self.east = walled,
            Direction::South => self.south = walled,
            Direction::West => self.west = walled,
        }
    }

    /// Number of open edges
    pub fn open_count(self) -> usize {
        Direction::ALL.iter().filter(|&&d| !self.get(d)).count()
    }
}

/// One maze cell
///
/// `visited` and `sensed` are only meaningful in the discovered maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Wall flags of the four edges
    pub walls: Walls,
    /// The robot has entered this cell
    pub visited: bool,
    /// The walls of this cell have been copied from the true maze
    pub sensed: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            walls: Walls::CLOSED,
            visited: false,
            sensed: false,
        }
    }
}

/// Fixed-size rectangular maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Create a fully walled grid with no visited or sensed cell
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), Cell::default()),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid dimensions as `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `position` lies inside the grid
    pub fn contains(&self, position: Position) -> bool {
        self.index_of(position).is_some()
    }

    fn index_of(&self, position: Position) -> Option<[usize; 2]> {
        let row = usize::try_from(position.y).ok()?;
        let col = usize::try_from(position.x).ok()?;
        (row < self.rows() && col < self.cols()).then_some([row, col])
    }

    /// Cell at `position`, `None` outside the grid
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index_of(position).and_then(|index| self.cells.get(index))
    }

    fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index_of(position)
            .and_then(move |index| self.cells.get_mut(index))
    }

    /// Whether the edge of `position` facing `direction` is walled
    ///
    /// Positions outside the grid are always walled.
    pub fn wall_at(&self, position: Position, direction: Direction) -> bool {
        self.cell(position)
            .is_none_or(|cell| cell.walls.get(direction))
    }

    /// Wall flags of a cell, all closed outside the grid
    pub fn walls(&self, position: Position) -> Walls {
        self.cell(position).map_or(Walls::CLOSED, |cell| cell.walls)
    }

    /// Overwrite the wall flags of a cell and mark it sensed
    ///
    /// Returns `false` if `position` is outside the grid.
    pub fn record_walls(&mut self, position: Position, walls: Walls) -> bool {
        self.cell_mut(position).is_some_and(|cell| {
            cell.walls = walls;
            cell.sensed = true;
            true
        })
    }

    /// Whether the robot has entered `position`
    pub fn is_visited(&self, position: Position) -> bool {
        self.cell(position).is_some_and(|cell| cell.visited)
    }

    /// Whether the walls of `position` have been sensed
    pub fn is_sensed(&self, position: Position) -> bool {
        self.cell(position).is_some_and(|cell| cell.sensed)
    }

    /// Mark a cell visited, returning `true` if it was not visited before
    pub fn mark_visited(&mut self, position: Position) -> bool {
        self.cell_mut(position)
            .is_some_and(|cell| !std::mem::replace(&mut cell.visited, true))
    }

    /// Open the edge between `position` and its neighbour in `direction`
    ///
    /// Both sides are cleared together. Returns `false` and leaves the grid
    /// untouched when either cell lies outside the grid.
    pub fn carve(&mut self, position: Position, direction: Direction) -> bool {
        let neighbour = position.step(direction);
        if !self.contains(position) || !self.contains(neighbour) {
            return false;
        }

        if let Some(cell) = self.cell_mut(position) {
            cell.walls.set(direction, false);
        }
        if let Some(cell) = self.cell_mut(neighbour) {
            cell.walls.set(direction.opposite(), false);
        }
        true
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols();
        let rows = self.rows();
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| Position::new(col as i32, row as i32))
        })
    }
}
