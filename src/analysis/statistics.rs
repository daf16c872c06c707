//! Per-run tallies of solver outcomes

use std::fmt;

use crate::algorithm::solver::{StepOutcome, Transition};
use crate::spatial::Turn;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunOutcome {
    /// The robot reached the goal
    Completed,
    /// Exploration was exhausted without reaching the goal
    Stuck,
    /// The step budget ran out first
    #[default]
    BudgetExhausted,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Stuck => f.write_str("stuck"),
            Self::BudgetExhausted => f.write_str("step budget exhausted"),
        }
    }
}

/// Number of turns of each kind performed during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnCounts {
    /// Moves without rotating
    pub none: usize,
    /// Quarter turns left
    pub left: usize,
    /// Quarter turns right
    pub right: usize,
    /// Reversals
    pub around: usize,
}

impl TurnCounts {
    fn record(&mut self, turn: Turn) {
        match turn {
            Turn::None => self.none += 1,
            Turn::Left => self.left += 1,
            Turn::Right => self.right += 1,
            Turn::Around => self.around += 1,
        }
    }

    /// Total rotation in quarter turns
    pub const fn quarter_turns(&self) -> usize {
        self.left + self.right + 2 * self.around
    }
}

/// Statistics accumulated over one exploration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStatistics {
    /// Steps that moved the robot
    pub steps: usize,
    /// Forward moves into unvisited cells
    pub moves: usize,
    /// Moves retracing a dead end
    pub backtracks: usize,
    /// Rotations performed before each move
    pub turns: TurnCounts,
    /// How the run ended
    pub outcome: RunOutcome,
    /// Cells entered by the end of the run, start included
    pub cells_visited: usize,
    /// Cells in the maze
    pub cell_count: usize,
}

impl RunStatistics {
    /// Empty statistics for a run that has not started
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one step outcome
    pub fn record(&mut self, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Moved(transition) => {
                self.moves += 1;
                self.record_transition(transition);
            }
            StepOutcome::Backtracked(transition) => {
                self.backtracks += 1;
                self.record_transition(transition);
            }
            StepOutcome::Completed => self.outcome = RunOutcome::Completed,
            StepOutcome::Stuck => self.outcome = RunOutcome::Stuck,
        }
    }

    fn record_transition(&mut self, transition: &Transition) {
        self.steps += 1;
        self.turns.record(transition.turn);
    }

    /// Store the final coverage of the run
    pub const fn finish(&mut self, cells_visited: usize, cell_count: usize) {
        self.cells_visited = cells_visited;
        self.cell_count = cell_count;
    }

    /// Fraction of the maze entered, in `[0, 1]`
    pub fn coverage(&self) -> f64 {
        if self.cell_count == 0 {
            return 0.0;
        }
        self.cells_visited as f64 / self.cell_count as f64
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} steps ({} moves, {} backtracks, {} quarter turns), visited {}/{} cells ({:.1}%)",
            self.outcome,
            self.steps,
            self.moves,
            self.backtracks,
            self.turns.quarter_turns(),
            self.cells_visited,
            self.cell_count,
            self.coverage() * 100.0
        )
    }
}
