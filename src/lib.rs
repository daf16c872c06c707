//! Micromouse maze simulator with randomized maze generation and partial-knowledge exploration
//!
//! A perfect maze is carved by a seeded depth-first backtracker. A robot then
//! explores it knowing only the walls of the cells it has stood on, moving
//! into unvisited neighbours in a fixed turn-preference order and retracing
//! its path out of dead ends until it reaches the goal.

#![forbid(unsafe_code)]

/// Maze generation, wall sensing, the exploration solver and the simulation controller
pub mod algorithm;
/// Run statistics and structural checks on mazes
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Cell grid, positions and compass headings
pub mod spatial;

pub use algorithm::executor::Simulation;
pub use io::error::{MazeError, Result};
