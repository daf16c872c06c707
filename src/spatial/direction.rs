//! Compass headings and the minimal-turn model
//!
//! Headings form a cyclic group of order four. Rotations are exposed as named
//! operations so no raw ordinal ever reaches a heading field.

use std::fmt;

use crate::spatial::grid::Position;

/// Absolute compass direction on the grid
///
/// Ordinals run clockwise from north, so `+1` is a right turn, `+3` a left
/// turn and `+2` the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    North,
    /// Towards the last column
    East,
    /// Towards the last row
    South,
    /// Towards column 0
    West,
}

impl Direction {
    /// All directions in ordinal order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Ordinal in `0..4`
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction for an ordinal, reduced modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// Heading after a quarter turn counter-clockwise
    pub const fn left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Heading after a quarter turn clockwise
    pub const fn right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Heading after a half turn
    pub const fn behind(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Same as [`Direction::behind`], reads better when talking about walls
    pub const fn opposite(self) -> Self {
        self.behind()
    }

    /// Unit step `(dx, dy)`; y grows southwards
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Direction leading from `from` to an orthogonally adjacent `to`
    ///
    /// Returns `None` when the two cells are not neighbours.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let delta = (to.x - from.x, to.y - from.y);
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }

    /// Minimal rotation that reorients `self` to `target`
    pub const fn turn_to(self, target: Self) -> Turn {
        match (target.index() + 4 - self.index()) % 4 {
            0 => Turn::None,
            1 => Turn::Right,
            2 => Turn::Around,
            _ => Turn::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

/// A single discrete rotation of the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Keep the current heading
    None,
    /// Quarter turn counter-clockwise
    Left,
    /// Quarter turn clockwise
    Right,
    /// Half turn, performed as one reverse operation
    Around,
}

impl Turn {
    /// Heading obtained by performing this turn from `heading`
    pub const fn apply(self, heading: Direction) -> Direction {
        match self {
            Self::None => heading,
            Self::Left => heading.left(),
            Self::Right => heading.right(),
            Self::Around => heading.behind(),
        }
    }

    /// Magnitude in quarter turns (0, 1 or 2)
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Left | Self::Right => 1,
            Self::Around => 2,
        }
    }
}
