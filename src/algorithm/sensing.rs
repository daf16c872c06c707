//! Local wall sensing from the true maze into the discovered maze

use crate::spatial::{Grid, Position};

/// Copy the four walls of `position` from the true maze into the discovered maze
///
/// Models a full sensor sweep: all four edges are read regardless of the
/// robot's heading. The cell is marked sensed but not visited, since entering
/// a cell is the solver's business. Returns `false` for positions outside the
/// grid, leaving the discovered maze untouched.
pub fn sense_and_record(true_maze: &Grid, discovered: &mut Grid, position: Position) -> bool {
    if !true_maze.contains(position) {
        return false;
    }
    discovered.record_walls(position, true_maze.walls(position))
}
