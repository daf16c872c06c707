//! Spatial data structures for the maze
//!
//! This module contains:
//! - The cell and grid model shared by the true and discovered mazes
//! - Compass headings and the minimal-turn model

/// Headings, rotations and minimal turns
pub mod direction;
/// Cell walls, visited flags and the grid container
pub mod grid;

pub use direction::{Direction, Turn};
pub use grid::{Cell, Grid, Position, Walls};
